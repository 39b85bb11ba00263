//! The simulated board: clock, pin states, and the timer arena.

use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;

use timer_hal::config::TICKS_PER_MICRO;
use timer_hal::controller::MAX_CHANNELS;
use timer_hal::{Pin, TimerBank, TimerId, TimerMode, TimerResult, TimerUnit};

use crate::regs::{PinTable, RegFile, SimTimer};
use crate::{Level, SimError};

/// One simulated chip: six timer units, the pins they can drive, and a
/// monotonic microsecond clock that only moves when told to.
pub struct SimBoard {
    clock_us: Mutex<u64>,
    files: Vec<(TimerId, Arc<Mutex<RegFile>>)>,
    pins: Arc<Mutex<PinTable>>,
    bank: TimerBank<SimTimer>,
}

impl SimBoard {
    pub fn new() -> Self {
        let pins = Arc::new(Mutex::new(PinTable::default()));
        let files: Vec<(TimerId, Arc<Mutex<RegFile>>)> = TimerId::ALL
            .iter()
            .map(|&id| (id, Arc::new(Mutex::new(RegFile::default()))))
            .collect();
        let bank = {
            let files = files.clone();
            let pins = Arc::clone(&pins);
            TimerBank::new(move |id| {
                SimTimer::new(id, Arc::clone(&files[id.index()].1), Arc::clone(&pins))
            })
        };
        Self {
            clock_us: Mutex::new(0),
            files,
            pins,
            bank,
        }
    }

    /// Takes exclusive ownership of one timer unit.
    pub fn claim(&self, id: TimerId) -> TimerResult<TimerUnit<SimTimer>> {
        self.bank.claim(id)
    }

    /// Returns a unit to the arena.
    pub fn release(&self, unit: TimerUnit<SimTimer>) {
        self.bank.release(unit);
    }

    pub fn is_claimed(&self, id: TimerId) -> bool {
        self.bank.is_claimed(id)
    }

    /// Monotonic simulated time.
    pub fn now_micros(&self) -> u64 {
        *self.clock_us.lock()
    }

    /// Advances simulated time, stepping every enabled counter.
    ///
    /// Rollovers are delivered in order, one at a time per unit: latch
    /// pending compares, toggle routed toggle-mode pins, then invoke the
    /// attached handler. The handler runs with no register lock held, as an
    /// interrupt would.
    pub fn advance(&self, micros: u64) {
        *self.clock_us.lock() += micros;
        for (id, file) in &self.files {
            let mut budget_ticks = micros.saturating_mul(TICKS_PER_MICRO);
            loop {
                let mut f = file.lock();
                if !f.enabled || f.reload == 0 {
                    break;
                }
                let remaining = f.period_ticks() - f.counter_ticks;
                if budget_ticks < remaining {
                    f.counter_ticks += budget_ticks;
                    break;
                }
                budget_ticks -= remaining;
                f.counter_ticks = 0;

                for slot in 0..MAX_CHANNELS {
                    if let Some(ticks) = f.pending_compare[slot].take() {
                        f.compare[slot] = ticks;
                    }
                }
                let mut toggles: Vec<Pin> = Vec::new();
                for cfg in f.modes.iter().flatten() {
                    if let (TimerMode::OutputCompareToggle, Some(pin)) = *cfg {
                        toggles.push(pin);
                    }
                }
                let handler = f.handler.clone();
                drop(f);

                trace!("{id}: rollover at {} us", self.now_micros());
                {
                    let mut pins = self.pins.lock();
                    for pin in toggles {
                        pins.toggle(pin);
                    }
                }
                if let Some(handler) = handler {
                    handler();
                }
            }
        }
    }

    /// Current level of a routed pin.
    pub fn pin_level(&self, pin: Pin) -> Result<Level, SimError> {
        self.pins
            .lock()
            .get(pin)
            .map(|s| s.level)
            .ok_or(SimError::NotRouted(pin))
    }

    /// Total level transitions observed on a routed pin.
    pub fn transitions(&self, pin: Pin) -> Result<u64, SimError> {
        self.pins
            .lock()
            .get(pin)
            .map(|s| s.transitions)
            .ok_or(SimError::NotRouted(pin))
    }

    /// Duty cycle the hardware is currently outputting on a PWM channel, in
    /// percent. Pending writes that have not crossed a period boundary yet
    /// are not reflected.
    pub fn latched_duty(&self, id: TimerId, channel: u8) -> Option<f32> {
        let file = &self.files[id.index()].1;
        let f = file.lock();
        let slot = usize::from(channel).checked_sub(1)?;
        match f.modes.get(slot)? {
            Some((TimerMode::Pwm, _)) if f.reload > 0 => {
                Some(f.compare[slot] as f32 / f.reload as f32 * 100.0)
            }
            _ => None,
        }
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}
