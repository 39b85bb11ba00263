//! Physical timer unit identifiers and their static capabilities.
//!
//! The set of timer units is fixed by the silicon. Units are addressed by
//! identifier and looked up by index into a fixed arena, never allocated.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier for one physical timer unit.
///
/// `Tim6` and `Tim7` are basic timers: they count and fire update events but
/// have no output channels, so they only support pure interrupt timing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerId {
    Tim1,
    Tim2,
    Tim3,
    Tim4,
    Tim6,
    Tim7,
}

impl TimerId {
    /// Every physical unit, in arena order.
    pub const ALL: [TimerId; 6] = [
        TimerId::Tim1,
        TimerId::Tim2,
        TimerId::Tim3,
        TimerId::Tim4,
        TimerId::Tim6,
        TimerId::Tim7,
    ];

    /// Number of physical units.
    pub const COUNT: usize = 6;

    /// Arena slot index for this unit.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Static capabilities of this unit.
    pub const fn capabilities(self) -> TimerCaps {
        match self {
            TimerId::Tim2 => TimerCaps {
                channels: 4,
                counter_bits: 32,
            },
            TimerId::Tim1 | TimerId::Tim3 | TimerId::Tim4 => TimerCaps {
                channels: 4,
                counter_bits: 16,
            },
            TimerId::Tim6 | TimerId::Tim7 => TimerCaps {
                channels: 0,
                counter_bits: 16,
            },
        }
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tim1 => write!(f, "TIM1"),
            Self::Tim2 => write!(f, "TIM2"),
            Self::Tim3 => write!(f, "TIM3"),
            Self::Tim4 => write!(f, "TIM4"),
            Self::Tim6 => write!(f, "TIM6"),
            Self::Tim7 => write!(f, "TIM7"),
        }
    }
}

/// Hardware capabilities of a timer unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerCaps {
    /// Number of output-compare channels (1-based channel numbers up to this).
    pub channels: u8,
    /// Counter register width in bits (16 or 32).
    pub counter_bits: u8,
}

impl TimerCaps {
    /// Largest reload value the counter register can hold.
    pub const fn max_reload(&self) -> u64 {
        if self.counter_bits >= 32 {
            u32::MAX as u64
        } else {
            u16::MAX as u64
        }
    }
}

/// GPIO port identifier.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Port {
    A,
    B,
}

/// A physical pin, `PA0`-style.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin {
    port: Port,
    index: u8,
}

impl Pin {
    pub const fn new(port: Port, index: u8) -> Self {
        Self { port, index }
    }

    pub const fn port(self) -> Port {
        self.port
    }

    pub const fn index(self) -> u8 {
        self.index
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let port = match self.port {
            Port::A => 'A',
            Port::B => 'B',
        };
        write!(f, "P{}{}", port, self.index)
    }
}
