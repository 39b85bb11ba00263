//! # timer-sim
//!
//! Deterministic software backend for `timer-hal`. Each physical unit gets
//! an in-memory register file; a [`SimBoard`] owns all of them plus the pin
//! states and a microsecond clock, and [`SimBoard::advance`] plays the role
//! of the silicon: it steps every enabled counter, fires rollovers in order,
//! toggles routed pins, latches pending duty writes, and invokes attached
//! handlers.
//!
//! Rollovers for one unit are delivered strictly in sequence and never nest,
//! matching the hardware guarantee the core documents.

mod board;
mod regs;

use thiserror::Error;

use timer_hal::Pin;

pub use board::SimBoard;
pub use regs::SimTimer;

/// Digital level of a routed pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn flipped(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Errors raised by the simulator's observation surface.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    #[error("pin {0} is not routed to any timer channel")]
    NotRouted(Pin),
}
