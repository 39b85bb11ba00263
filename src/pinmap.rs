//! Fixed alternate-function routing table.
//!
//! Which pins can carry which timer channel is decided by the chip's
//! alternate-function matrix. It is static input data, never computed; the
//! table below mirrors the default (no-remap) mapping of an STM32F1-class
//! part.

use crate::unit::{Pin, Port, TimerId};

/// One entry of the alternate-function matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFunction {
    pub timer: TimerId,
    pub channel: u8,
    pub pin: Pin,
}

const fn pf(timer: TimerId, channel: u8, port: Port, index: u8) -> PinFunction {
    PinFunction {
        timer,
        channel,
        pin: Pin::new(port, index),
    }
}

/// The full routing table. Basic timers (TIM6/TIM7) have no entries.
pub const ALTERNATE_FUNCTIONS: &[PinFunction] = &[
    pf(TimerId::Tim1, 1, Port::A, 8),
    pf(TimerId::Tim1, 2, Port::A, 9),
    pf(TimerId::Tim1, 3, Port::A, 10),
    pf(TimerId::Tim1, 4, Port::A, 11),
    pf(TimerId::Tim2, 1, Port::A, 0),
    pf(TimerId::Tim2, 2, Port::A, 1),
    pf(TimerId::Tim2, 3, Port::A, 2),
    pf(TimerId::Tim2, 4, Port::A, 3),
    pf(TimerId::Tim3, 1, Port::A, 6),
    pf(TimerId::Tim3, 2, Port::A, 7),
    pf(TimerId::Tim3, 3, Port::B, 0),
    pf(TimerId::Tim3, 4, Port::B, 1),
    pf(TimerId::Tim4, 1, Port::B, 6),
    pf(TimerId::Tim4, 2, Port::B, 7),
    pf(TimerId::Tim4, 3, Port::B, 8),
    pf(TimerId::Tim4, 4, Port::B, 9),
];

/// Whether `pin` can carry the signal of `(timer, channel)`.
pub fn is_routable(timer: TimerId, channel: u8, pin: Pin) -> bool {
    ALTERNATE_FUNCTIONS
        .iter()
        .any(|f| f.timer == timer && f.channel == channel && f.pin == pin)
}

/// The pin assigned to `(timer, channel)` by the default mapping, if any.
pub fn default_pin(timer: TimerId, channel: u8) -> Option<Pin> {
    ALTERNATE_FUNCTIONS
        .iter()
        .find(|f| f.timer == timer && f.channel == channel)
        .map(|f| f.pin)
}

/// All routing entries for one timer unit.
pub fn functions_of(timer: TimerId) -> impl Iterator<Item = &'static PinFunction> {
    ALTERNATE_FUNCTIONS.iter().filter(move |f| f.timer == timer)
}
