//! Interrupt-side notification primitives.
//!
//! A period-elapsed handler runs preemptively with respect to the main flow
//! and shares only what it explicitly touches. The types here are the safe
//! things to share: single-word atomics for flags and counts, and a
//! single-slot mailbox when the handler should behave like a channel send
//! read by application logic.
//!
//! Handlers must stay minimal and non-blocking, and must tolerate being the
//! last invocation after `stop()`: the hardware may already have one event
//! in flight when the counter halts.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::sync::{Arc, Mutex};

/// Zero-argument reaction invoked when a timer period elapses.
///
/// Invocations for one timer unit are serialized by the hardware (one
/// counter, one update event at a time) and never nest.
pub type TickHandler = Arc<dyn Fn() + Send + Sync>;

/// A boolean the handler flips once per invocation.
///
/// Clones share the same flag. The flip is a single atomic
/// read-modify-write, so the main flow can never observe a torn update.
#[derive(Clone, Default)]
pub struct TickFlag {
    inner: Arc<AtomicBool>,
}

impl TickFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value.
    pub fn get(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }

    /// Flips the flag, returning the previous value.
    pub fn toggle(&self) -> bool {
        self.inner.fetch_xor(true, Ordering::AcqRel)
    }

    /// A handler that toggles this flag on every invocation.
    pub fn handler(&self) -> TickHandler {
        let inner = Arc::clone(&self.inner);
        Arc::new(move || {
            inner.fetch_xor(true, Ordering::AcqRel);
        })
    }
}

/// A counter incremented once per handler invocation. Clones share it.
#[derive(Clone, Default)]
pub struct TickCounter {
    inner: Arc<AtomicU32>,
}

impl TickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.inner.load(Ordering::Acquire)
    }

    /// A handler that increments this counter on every invocation.
    pub fn handler(&self) -> TickHandler {
        let inner = Arc::clone(&self.inner);
        Arc::new(move || {
            inner.fetch_add(1, Ordering::AcqRel);
        })
    }
}

/// Single-slot mailbox: a post overwrites whatever is pending.
///
/// Models the handler as a message send from interrupt context; the main
/// flow drains it with [`Mailbox::take`]. Overwrite-on-post means a slow
/// reader sees the latest value, never a backlog. Clones share the slot.
pub struct Mailbox<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Deposits a value, replacing any pending one.
    pub fn post(&self, value: T) {
        *self.slot.lock() = Some(value);
    }

    /// Removes and returns the pending value, if any.
    pub fn take(&self) -> Option<T> {
        self.slot.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Mailbox<T> {
    /// A handler that posts a clone of `value` on every invocation.
    pub fn sender(&self, value: T) -> TickHandler {
        let mailbox = self.clone();
        Arc::new(move || {
            mailbox.post(value.clone());
        })
    }
}
