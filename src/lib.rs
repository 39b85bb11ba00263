//! # timer-hal
//!
//! Vendor-agnostic abstraction over microcontroller timer peripherals:
//! interrupt-driven timing, hardware-toggle output channels, and PWM
//! generation. The crate owns the configuration model and its validation;
//! the actual register writes go through the [`TimerRegs`] trait so that
//! vendor crates (or the `timer-sim` software backend) can plug in.
//!
//! ## Module Overview
//! - [`unit`]       – Physical timer identifiers and static capabilities.
//! - [`pinmap`]     – Fixed alternate-function pin routing table.
//! - [`config`]     – Period, mode, and per-channel configuration model.
//! - [`controller`] – The timer unit state machine and its operations.
//! - [`registry`]   – Arena of claimable physical units.
//! - [`notify`]     – Interrupt-side notification primitives.
//! - [`heartbeat`]  – Polled sinusoidal duty-cycle driver.
//!
//! The modules are loosely coupled so alternative backends can reuse the
//! same primitives.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod controller;
pub mod error;
pub mod heartbeat;
pub mod notify;
pub mod pinmap;
pub mod registry;
pub mod sync;
pub mod unit;

pub use config::{Period, TimerMode, TIMER_CLOCK_HZ};
pub use controller::{TimerRegs, TimerState, TimerUnit};
pub use error::{TimerError, TimerResult};
pub use heartbeat::Heartbeat;
pub use notify::{Mailbox, TickCounter, TickFlag, TickHandler};
pub use registry::TimerBank;
pub use unit::{Pin, Port, TimerId};

#[cfg(test)]
mod tests;
