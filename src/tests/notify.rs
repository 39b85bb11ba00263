use crate::notify::{Mailbox, TickCounter, TickFlag};

#[test]
fn flag_toggles_once_per_invocation() {
    let flag = TickFlag::new();
    let handler = flag.handler();
    assert!(!flag.get());
    handler();
    assert!(flag.get());
    handler();
    assert!(!flag.get());
    // No missed or doubled transitions over many invocations.
    for i in 0..100 {
        handler();
        assert_eq!(flag.get(), i % 2 == 0);
    }
}

#[test]
fn direct_toggle_interleaves_with_the_handler() {
    let flag = TickFlag::new();
    let handler = flag.handler();
    handler();
    assert!(flag.get());
    // The main flow can flip the flag back itself, e.g. to park an output
    // low after stopping; toggle reports the value it replaced.
    assert!(flag.toggle());
    assert!(!flag.get());
    assert!(!flag.toggle());
    handler();
    assert!(!flag.get());
}

#[test]
fn counter_counts_invocations() {
    let counter = TickCounter::new();
    let handler = counter.handler();
    for _ in 0..5 {
        handler();
    }
    assert_eq!(counter.count(), 5);
}

#[test]
fn mailbox_overwrites_and_drains() {
    let mailbox: Mailbox<u32> = Mailbox::new();
    assert!(mailbox.is_empty());
    mailbox.post(1);
    mailbox.post(2);
    // A slow reader sees the latest value, not a backlog.
    assert_eq!(mailbox.take(), Some(2));
    assert_eq!(mailbox.take(), None);
}

#[test]
fn mailbox_sender_posts_from_handler_context() {
    let mailbox = Mailbox::new();
    let handler = mailbox.sender("tick");
    handler();
    assert_eq!(mailbox.take(), Some("tick"));
    // Tolerates being the last invocation after a stop.
    handler();
    drop(handler);
    assert_eq!(mailbox.take(), Some("tick"));
}
