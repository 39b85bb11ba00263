//! Period, mode, and per-channel configuration model.

use crate::error::{TimerError, TimerResult};
use crate::unit::Pin;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timer input clock after bus prescaling, in Hz.
pub const TIMER_CLOCK_HZ: u32 = 72_000_000;

/// Counter ticks per microsecond at [`TIMER_CLOCK_HZ`].
pub const TICKS_PER_MICRO: u64 = (TIMER_CLOCK_HZ / 1_000_000) as u64;

/// Operating mode of one output channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Count and fire update events; no pin activity.
    OutputCompare,
    /// Hardware flips the routed pin on every period, no software involved.
    OutputCompareToggle,
    /// Pulse-width modulation on the routed pin.
    Pwm,
}

/// Counting period, expressed whichever way the caller thinks in.
///
/// The supplied representation is authoritative; the other one is derived on
/// demand and may round.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Micros(u64),
    Hertz(u32),
}

impl Period {
    /// Period length in microseconds (rounded down; 0 above 1 MHz).
    ///
    /// Display convenience only. Divisor derivation works from the
    /// authoritative representation and never goes through this.
    pub fn as_micros(self) -> u64 {
        match self {
            Self::Micros(us) => us,
            Self::Hertz(0) => 0,
            Self::Hertz(hz) => 1_000_000 / u64::from(hz),
        }
    }

    /// Period as a frequency in Hz (rounded down).
    pub fn as_hertz(self) -> u32 {
        match self {
            Self::Hertz(hz) => hz,
            Self::Micros(0) => 0,
            Self::Micros(us) => (1_000_000 / us) as u32,
        }
    }
}

/// Configuration of one output channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    pub mode: TimerMode,
    pub pin: Option<Pin>,
    /// Only meaningful in [`TimerMode::Pwm`].
    pub duty_percent: Option<f32>,
}

/// Validates a duty cycle percentage. Rejects NaN.
pub fn validate_duty(duty_percent: f32) -> TimerResult<()> {
    if (0.0..=100.0).contains(&duty_percent) {
        Ok(())
    } else {
        Err(TimerError::OutOfRange("duty cycle"))
    }
}
