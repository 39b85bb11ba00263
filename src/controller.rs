//! Timer unit state machine and its operations.
//!
//! [`TimerUnit`] owns the configuration of one physical timer and translates
//! high-level requests into low-level register writes through [`TimerRegs`].
//! All validation happens here, synchronously; backends only ever see values
//! that already passed it.

use log::{debug, trace};

use crate::config::{validate_duty, ChannelConfig, Period, TimerMode, TICKS_PER_MICRO, TIMER_CLOCK_HZ};
use crate::error::{TimerError, TimerResult};
use crate::notify::TickHandler;
use crate::pinmap;
use crate::unit::{Pin, TimerCaps, TimerId};

/// Output channels per unit, upper bound across all units.
pub const MAX_CHANNELS: usize = 4;

/// Low-level register access implemented by backends.
///
/// Register writes cannot fail; anything that can is rejected by
/// [`TimerUnit`] before reaching this trait.
pub trait TimerRegs: Send {
    /// Program a channel's mode and optional pin routing.
    fn write_mode(&mut self, channel: u8, mode: TimerMode, pin: Option<Pin>);

    /// Program prescaler and reload. Resets the counter.
    fn write_period(&mut self, prescaler: u16, reload: u32);

    /// Program a channel's compare value in reload ticks.
    ///
    /// While the counter runs, the value latches at the next period
    /// boundary; stopped, it applies immediately.
    fn write_compare(&mut self, channel: u8, ticks: u32);

    /// Gate the free-running counter on or off.
    fn write_enabled(&mut self, enabled: bool);

    /// Install or remove the period-elapsed handler.
    fn write_handler(&mut self, handler: Option<TickHandler>);
}

/// Lifecycle of a timer unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No mode or period set yet.
    Unconfigured,
    /// Configured, counter halted.
    Stopped,
    /// Counter free-running.
    Running,
}

/// One claimed physical timer unit.
pub struct TimerUnit<R: TimerRegs> {
    id: TimerId,
    caps: TimerCaps,
    state: TimerState,
    period: Option<Period>,
    prescaler: u16,
    reload: u32,
    channels: [Option<ChannelConfig>; MAX_CHANNELS],
    handler_attached: bool,
    regs: R,
}

impl<R: TimerRegs> TimerUnit<R> {
    /// Wraps a backend for the given unit. Usually reached through
    /// [`crate::registry::TimerBank::claim`].
    pub fn new(id: TimerId, regs: R) -> Self {
        Self {
            id,
            caps: id.capabilities(),
            state: TimerState::Unconfigured,
            period: None,
            prescaler: 0,
            reload: 0,
            channels: [None; MAX_CHANNELS],
            handler_attached: false,
            regs,
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// The authoritative period, as last supplied.
    pub fn period(&self) -> Option<Period> {
        self.period
    }

    /// Configuration of a channel, if it has been configured.
    pub fn channel(&self, channel: u8) -> Option<&ChannelConfig> {
        self.check_channel(channel).ok()?;
        self.channels[usize::from(channel) - 1].as_ref()
    }

    /// Derived prescaler/reload pair, for inspection.
    pub fn divisors(&self) -> (u16, u32) {
        (self.prescaler, self.reload)
    }

    /// Sets a channel's operating mode and, optionally, routes it to a pin.
    pub fn configure_mode(
        &mut self,
        channel: u8,
        mode: TimerMode,
        pin: Option<Pin>,
    ) -> TimerResult<()> {
        self.check_channel(channel)?;
        if let Some(pin) = pin {
            self.check_routing(channel, pin)?;
        }
        if self.handler_attached && mode != TimerMode::OutputCompare {
            return Err(TimerError::ModeConflict);
        }

        let slot = &mut self.channels[usize::from(channel) - 1];
        let config = ChannelConfig {
            mode,
            pin,
            duty_percent: slot.as_ref().and_then(|c| c.duty_percent),
        };
        let changed = slot.map(|c| (c.mode, c.pin)) != Some((mode, pin));
        *slot = Some(config);
        if changed {
            self.regs.write_mode(channel, mode, pin);
        }
        self.leave_unconfigured();
        debug!("{} ch{channel}: mode {mode:?}, pin {pin:?}", self.id);
        Ok(())
    }

    /// Sets the counting period from either representation.
    pub fn set_period(&mut self, period: Period) -> TimerResult<()> {
        let (prescaler, reload) = self.derive_divisors(period)?;
        self.period = Some(period);
        if (prescaler, reload) != (self.prescaler, self.reload) {
            self.prescaler = prescaler;
            self.reload = reload;
            self.regs.write_period(prescaler, reload);
        }
        self.leave_unconfigured();
        debug!(
            "{}: period {period:?} -> psc {prescaler}, reload {reload}",
            self.id
        );
        Ok(())
    }

    /// Registers a period-elapsed handler.
    ///
    /// Only valid once the unit is configured, and only while every
    /// configured channel uses [`TimerMode::OutputCompare`]; combining a
    /// handler with hardware toggle or PWM output is rejected.
    pub fn attach_interrupt(&mut self, handler: TickHandler) -> TimerResult<()> {
        if self.state == TimerState::Unconfigured {
            return Err(TimerError::NotConfigured);
        }
        let hardware_driven = self
            .channels
            .iter()
            .flatten()
            .any(|c| c.mode != TimerMode::OutputCompare);
        if hardware_driven {
            return Err(TimerError::ModeConflict);
        }
        self.regs.write_handler(Some(handler));
        self.handler_attached = true;
        debug!("{}: interrupt handler attached", self.id);
        Ok(())
    }

    /// Removes the period-elapsed handler. A final invocation may already be
    /// in flight; handlers must tolerate it.
    pub fn detach_interrupt(&mut self) {
        if self.handler_attached {
            self.regs.write_handler(None);
            self.handler_attached = false;
            debug!("{}: interrupt handler detached", self.id);
        }
    }

    /// Atomically configures PWM: mode, pin routing, period, and duty in one
    /// call. Nothing is written until every argument has been validated.
    ///
    /// Callable while running; the duty latches at the next period boundary.
    pub fn set_pwm(
        &mut self,
        channel: u8,
        pin: Pin,
        frequency_hz: u32,
        duty_percent: f32,
    ) -> TimerResult<()> {
        self.check_channel(channel)?;
        self.check_routing(channel, pin)?;
        validate_duty(duty_percent)?;
        if self.handler_attached {
            return Err(TimerError::ModeConflict);
        }
        let period = Period::Hertz(frequency_hz);
        let (prescaler, reload) = self.derive_divisors(period)?;

        // Validation done; apply, skipping unchanged registers so repeated
        // calls do not restart the counter.
        let slot = &mut self.channels[usize::from(channel) - 1];
        let previous = *slot;
        *slot = Some(ChannelConfig {
            mode: TimerMode::Pwm,
            pin: Some(pin),
            duty_percent: Some(duty_percent),
        });
        if previous.map(|c| (c.mode, c.pin)) != Some((TimerMode::Pwm, Some(pin))) {
            self.regs.write_mode(channel, TimerMode::Pwm, Some(pin));
        }
        self.period = Some(period);
        if (prescaler, reload) != (self.prescaler, self.reload) {
            self.prescaler = prescaler;
            self.reload = reload;
            self.regs.write_period(prescaler, reload);
        }
        self.regs
            .write_compare(channel, duty_ticks(reload, duty_percent));
        self.leave_unconfigured();
        trace!(
            "{} ch{channel}: pwm {frequency_hz} Hz, duty {duty_percent:.2}%",
            self.id
        );
        Ok(())
    }

    /// Updates the duty cycle of an already configured PWM channel.
    pub fn set_duty(&mut self, channel: u8, duty_percent: f32) -> TimerResult<()> {
        self.check_channel(channel)?;
        validate_duty(duty_percent)?;
        let reload = self.reload;
        if self.period.is_none() {
            return Err(TimerError::NotConfigured);
        }
        let slot = &mut self.channels[usize::from(channel) - 1];
        match slot {
            Some(config) if config.mode == TimerMode::Pwm => {
                config.duty_percent = Some(duty_percent);
            }
            _ => return Err(TimerError::NotConfigured),
        }
        self.regs
            .write_compare(channel, duty_ticks(reload, duty_percent));
        trace!("{} ch{channel}: duty {duty_percent:.2}%", self.id);
        Ok(())
    }

    /// Starts the free-running counter. Idempotent.
    pub fn start(&mut self) -> TimerResult<()> {
        if self.state == TimerState::Unconfigured || self.period.is_none() {
            return Err(TimerError::NotConfigured);
        }
        if self.state != TimerState::Running {
            self.regs.write_enabled(true);
            self.state = TimerState::Running;
            debug!("{}: started", self.id);
        }
        Ok(())
    }

    /// Halts the counter. Idempotent and immediate; a handler invocation
    /// already in flight may still land after this returns.
    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.regs.write_enabled(false);
            self.state = TimerState::Stopped;
            debug!("{}: stopped", self.id);
        }
    }

    /// Consumes the unit and hands back its backend.
    pub fn into_regs(self) -> R {
        self.regs
    }

    fn check_channel(&self, channel: u8) -> TimerResult<()> {
        if channel == 0 || channel > self.caps.channels {
            return Err(TimerError::InvalidChannel {
                channel,
                limit: self.caps.channels,
            });
        }
        Ok(())
    }

    fn check_routing(&self, channel: u8, pin: Pin) -> TimerResult<()> {
        if !pinmap::is_routable(self.id, channel, pin) {
            return Err(TimerError::InvalidPinMapping {
                timer: self.id,
                channel,
                pin,
            });
        }
        Ok(())
    }

    fn derive_divisors(&self, period: Period) -> TimerResult<(u16, u32)> {
        // Ticks are derived from the authoritative representation directly:
        // funneling a frequency through microseconds would truncate anything
        // above 1 MHz to zero and drift on non-divisor rates.
        let total_ticks = match period {
            Period::Micros(us) => us
                .checked_mul(TICKS_PER_MICRO)
                .ok_or(TimerError::OutOfRange("period"))?,
            Period::Hertz(hz) => {
                let hz = u64::from(hz);
                if hz == 0 {
                    return Err(TimerError::OutOfRange("period"));
                }
                (u64::from(TIMER_CLOCK_HZ) + hz / 2) / hz
            }
        };
        if total_ticks == 0 {
            return Err(TimerError::OutOfRange("period"));
        }
        // divider = prescaler + 1; rounding up keeps reload <= max_reload.
        let max_reload = self.caps.max_reload();
        let divider = total_ticks.div_ceil(max_reload);
        if divider > u64::from(u16::MAX) + 1 {
            return Err(TimerError::OutOfRange("period"));
        }
        let prescaler = (divider - 1) as u16;
        let reload = (total_ticks / divider) as u32;
        Ok((prescaler, reload))
    }

    fn leave_unconfigured(&mut self) {
        if self.state == TimerState::Unconfigured {
            self.state = TimerState::Stopped;
        }
    }
}

/// Compare value corresponding to a duty percentage of the reload range.
fn duty_ticks(reload: u32, duty_percent: f32) -> u32 {
    libm::round(f64::from(reload) * f64::from(duty_percent) / 100.0) as u32
}
