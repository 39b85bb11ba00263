//! Common error types for timer operations.
//!
//! Every variant describes a configuration mistake detected synchronously at
//! the call site. Nothing here is transient or retryable at runtime; the
//! remedy is always to correct the configuration and call again.

use core::fmt;

use crate::unit::{Pin, TimerId};

/// Timer configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Channel number is out of range for this timer unit.
    InvalidChannel { channel: u8, limit: u8 },
    /// Pin is not routable to this `(timer, channel)` by the alternate-function map.
    InvalidPinMapping {
        timer: TimerId,
        channel: u8,
        pin: Pin,
    },
    /// A value (period, frequency, duty cycle) falls outside the representable range.
    OutOfRange(&'static str),
    /// The physical timer unit is already claimed by another configuration.
    AlreadyClaimed(TimerId),
    /// Operation requires a configured timer (mode and/or period set first).
    NotConfigured,
    /// Interrupt attachment conflicts with a hardware-driven channel mode.
    ModeConflict,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChannel { channel, limit } => {
                write!(f, "channel {channel} out of range (unit has {limit})")
            }
            Self::InvalidPinMapping {
                timer,
                channel,
                pin,
            } => {
                write!(f, "pin {pin} cannot carry {timer} channel {channel}")
            }
            Self::OutOfRange(what) => write!(f, "{what} out of range"),
            Self::AlreadyClaimed(timer) => write!(f, "{timer} is already claimed"),
            Self::NotConfigured => write!(f, "timer is not configured"),
            Self::ModeConflict => {
                write!(f, "interrupt handler conflicts with toggle/PWM channel mode")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimerError {}

/// Result type for timer operations.
pub type TimerResult<T> = Result<T, TimerError>;
