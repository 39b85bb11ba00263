//! Polled sinusoidal duty-cycle driver.
//!
//! Computes `duty(t) = A·sin(2π·t / (1000·T)) + A` for elapsed time `t` in
//! milliseconds and pushes it to a PWM channel. Pure in `t`: the caller may
//! poll at arbitrary, non-uniform intervals; this type is not a scheduler.

use core::f64::consts::TAU;

use crate::controller::{TimerRegs, TimerUnit};
use crate::error::TimerResult;
use crate::unit::Pin;

/// Sine-wave duty sweep for one PWM channel.
#[derive(Debug, Clone, Copy)]
pub struct Heartbeat {
    channel: u8,
    pin: Pin,
    frequency_hz: u32,
    /// Amplitude `A` in duty percent; the wave spans `[0, 2A]`.
    amplitude: f64,
    /// Sweep period `T` in seconds.
    period_secs: f64,
}

impl Heartbeat {
    pub fn new(channel: u8, pin: Pin, frequency_hz: u32, amplitude: f64, period_secs: f64) -> Self {
        Self {
            channel,
            pin,
            frequency_hz,
            amplitude,
            period_secs,
        }
    }

    /// Duty percentage at `elapsed_ms` on the monotonic clock.
    ///
    /// Clamped to `[0, 100]` even though an amplitude within `[0, 50]`
    /// already keeps it in range.
    pub fn duty_at(&self, elapsed_ms: u64) -> f32 {
        let t = elapsed_ms as f64;
        let phase = TAU * t / (1000.0 * self.period_secs);
        let raw = self.amplitude * libm::sin(phase) + self.amplitude;
        raw.clamp(0.0, 100.0) as f32
    }

    /// Pushes the duty for `elapsed_ms` to the timer.
    pub fn update<R: TimerRegs>(
        &self,
        unit: &mut TimerUnit<R>,
        elapsed_ms: u64,
    ) -> TimerResult<()> {
        unit.set_pwm(
            self.channel,
            self.pin,
            self.frequency_hz,
            self.duty_at(elapsed_ms),
        )
    }
}
