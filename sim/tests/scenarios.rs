//! End-to-end timing scenarios against the simulated board.

use timer_hal::{Heartbeat, Period, Pin, Port, TickCounter, TickFlag, TimerId, TimerMode};
use timer_sim::{Level, SimBoard, SimError};

const PA0: Pin = Pin::new(Port::A, 0);

#[test]
fn toggle_channel_transitions_once_per_period() {
    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim2).unwrap();
    tim.configure_mode(1, TimerMode::OutputCompareToggle, Some(PA0))
        .unwrap();
    tim.set_period(Period::Micros(1_000_000)).unwrap();
    tim.start().unwrap();

    assert_eq!(board.pin_level(PA0), Ok(Level::Low));
    board.advance(999_999);
    assert_eq!(board.transitions(PA0), Ok(0));
    board.advance(1);
    assert_eq!(board.transitions(PA0), Ok(1));
    assert_eq!(board.pin_level(PA0), Ok(Level::High));

    // Ten more seconds, zero further calls from the main flow.
    board.advance(10_000_000);
    assert_eq!(board.transitions(PA0), Ok(11));
    assert_eq!(board.pin_level(PA0), Ok(Level::High));
}

#[test]
fn interrupt_fires_once_per_second() {
    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim6).unwrap();
    tim.set_period(Period::Hertz(1)).unwrap();
    let counter = TickCounter::new();
    tim.attach_interrupt(counter.handler()).unwrap();
    tim.start().unwrap();

    board.advance(5_000_000);
    assert_eq!(counter.count(), 5);
    // Non-uniform steps accumulate the same count.
    for step in [250_000u64, 750_000, 1_000_000, 500_000, 500_000] {
        board.advance(step);
    }
    assert_eq!(counter.count(), 8);
}

#[test]
fn flag_handler_toggles_exactly_once_per_invocation() {
    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim7).unwrap();
    tim.set_period(Period::Micros(1_000_000)).unwrap();
    let flag = TickFlag::new();
    tim.attach_interrupt(flag.handler()).unwrap();
    tim.start().unwrap();

    for second in 1..=6 {
        board.advance(1_000_000);
        assert_eq!(flag.get(), second % 2 == 1, "flag wrong after {second} s");
    }
}

#[test]
fn stop_halts_further_invocations() {
    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim6).unwrap();
    tim.set_period(Period::Micros(100_000)).unwrap();
    let counter = TickCounter::new();
    tim.attach_interrupt(counter.handler()).unwrap();
    tim.start().unwrap();

    board.advance(550_000);
    assert_eq!(counter.count(), 5);
    tim.stop();
    board.advance(1_000_000);
    assert_eq!(counter.count(), 5);

    // Restart: the counter picks up mid-period where it was halted.
    tim.start().unwrap();
    board.advance(50_000);
    assert_eq!(counter.count(), 6);
}

#[test]
fn pwm_duty_latches_at_the_period_boundary() {
    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim2).unwrap();
    tim.set_pwm(1, PA0, 1_000, 25.0).unwrap();
    assert_eq!(board.latched_duty(TimerId::Tim2, 1), Some(25.0));
    tim.start().unwrap();

    board.advance(500);
    tim.set_duty(1, 75.0).unwrap();
    // Mid-period: the hardware still outputs the old duty.
    assert_eq!(board.latched_duty(TimerId::Tim2, 1), Some(25.0));
    board.advance(500);
    assert_eq!(board.latched_duty(TimerId::Tim2, 1), Some(75.0));
}

#[test]
fn units_are_singletons_across_the_board() {
    let board = SimBoard::new();
    let tim1 = board.claim(TimerId::Tim1).unwrap();
    assert!(board.claim(TimerId::Tim1).is_err());
    assert!(board.is_claimed(TimerId::Tim1));
    board.release(tim1);
    board.claim(TimerId::Tim1).unwrap();
}

#[test]
fn unrouted_pins_are_not_observable() {
    let board = SimBoard::new();
    let pb6 = Pin::new(Port::B, 6);
    assert_eq!(board.pin_level(pb6), Err(SimError::NotRouted(pb6)));
    let mut tim = board.claim(TimerId::Tim4).unwrap();
    tim.configure_mode(1, TimerMode::OutputCompareToggle, Some(pb6))
        .unwrap();
    assert_eq!(board.pin_level(pb6), Ok(Level::Low));
}

#[test]
fn heartbeat_sweep_drives_the_latched_duty() {
    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim2).unwrap();
    let hb = Heartbeat::new(1, PA0, 1_000, 12.5, 2.0);

    hb.update(&mut tim, 0).unwrap();
    tim.start().unwrap();
    for t in (100..=4_000).step_by(100) {
        hb.update(&mut tim, t).unwrap();
        // 100 ms crosses many 1 kHz carrier periods, so the write latches.
        board.advance(100_000);
        let latched = board.latched_duty(TimerId::Tim2, 1).unwrap();
        let expected = hb.duty_at(t);
        assert!(
            (latched - expected).abs() < 0.01,
            "latched {latched} vs expected {expected} at t={t}"
        );
    }
    assert_eq!(board.now_micros(), 4_000_000);
}
