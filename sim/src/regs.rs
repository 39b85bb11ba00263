//! In-memory register files and the [`TimerRegs`] implementation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use timer_hal::controller::MAX_CHANNELS;
use timer_hal::{Pin, TickHandler, TimerId, TimerMode, TimerRegs};

use crate::Level;

/// Register file of one simulated timer unit.
#[derive(Default)]
pub(crate) struct RegFile {
    pub enabled: bool,
    pub prescaler: u16,
    pub reload: u32,
    /// Counter position within the current period, in clock ticks.
    pub counter_ticks: u64,
    pub modes: [Option<(TimerMode, Option<Pin>)>; MAX_CHANNELS],
    /// Active compare values, in reload ticks.
    pub compare: [u32; MAX_CHANNELS],
    /// Compare writes waiting for the next period boundary.
    pub pending_compare: [Option<u32>; MAX_CHANNELS],
    pub handler: Option<TickHandler>,
}

impl RegFile {
    /// Length of one full period in clock ticks, or 0 if unprogrammed.
    pub fn period_ticks(&self) -> u64 {
        (u64::from(self.prescaler) + 1) * u64::from(self.reload)
    }
}

/// State of one routed pin.
pub(crate) struct PinState {
    pub level: Level,
    pub transitions: u64,
}

/// All pins the simulated alternate-function matrix has routed so far.
#[derive(Default)]
pub(crate) struct PinTable {
    map: HashMap<Pin, PinState>,
}

impl PinTable {
    /// Registers a pin, initially driven low.
    pub fn route(&mut self, pin: Pin) {
        self.map.entry(pin).or_insert(PinState {
            level: Level::Low,
            transitions: 0,
        });
    }

    pub fn toggle(&mut self, pin: Pin) {
        if let Some(state) = self.map.get_mut(&pin) {
            state.level = state.level.flipped();
            state.transitions += 1;
        }
    }

    pub fn get(&self, pin: Pin) -> Option<&PinState> {
        self.map.get(&pin)
    }
}

/// Backend handle for one simulated unit; implements [`TimerRegs`].
pub struct SimTimer {
    id: TimerId,
    file: Arc<Mutex<RegFile>>,
    pins: Arc<Mutex<PinTable>>,
}

impl SimTimer {
    pub(crate) fn new(id: TimerId, file: Arc<Mutex<RegFile>>, pins: Arc<Mutex<PinTable>>) -> Self {
        Self { id, file, pins }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }
}

impl TimerRegs for SimTimer {
    fn write_mode(&mut self, channel: u8, mode: TimerMode, pin: Option<Pin>) {
        self.file.lock().modes[usize::from(channel) - 1] = Some((mode, pin));
        if let Some(pin) = pin {
            self.pins.lock().route(pin);
        }
    }

    fn write_period(&mut self, prescaler: u16, reload: u32) {
        let mut file = self.file.lock();
        file.prescaler = prescaler;
        file.reload = reload;
        file.counter_ticks = 0;
    }

    fn write_compare(&mut self, channel: u8, ticks: u32) {
        let mut file = self.file.lock();
        let slot = usize::from(channel) - 1;
        if file.enabled {
            file.pending_compare[slot] = Some(ticks);
        } else {
            file.compare[slot] = ticks;
        }
    }

    fn write_enabled(&mut self, enabled: bool) {
        self.file.lock().enabled = enabled;
    }

    fn write_handler(&mut self, handler: Option<TickHandler>) {
        self.file.lock().handler = handler;
    }
}
