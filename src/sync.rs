//! Locking shim shared by the registry and the mailbox.
//!
//! `std` builds use the standard mutex; `no_std` builds take the `lock-free`
//! feature's `spin` mutex instead. A poisoned lock is recovered, not
//! propagated: everything guarded here is slot state that stays consistent
//! across a panicking owner, and the bank must keep serving claims after an
//! application thread dies.

#[cfg(not(feature = "std"))]
pub use alloc::sync::Arc;
#[cfg(feature = "std")]
pub use std::sync::Arc;

#[cfg(feature = "std")]
pub struct Mutex<T>(std::sync::Mutex<T>);

#[cfg(feature = "std")]
impl<T> Mutex<T> {
    pub fn new(value: T) -> Self {
        Self(std::sync::Mutex::new(value))
    }

    pub fn lock(&self) -> std::sync::MutexGuard<'_, T> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(not(feature = "std"))]
pub struct Mutex<T>(spin::Mutex<T>);

#[cfg(not(feature = "std"))]
impl<T> Mutex<T> {
    pub fn new(value: T) -> Self {
        Self(spin::Mutex::new(value))
    }

    pub fn lock(&self) -> spin::MutexGuard<'_, T> {
        self.0.lock()
    }
}
