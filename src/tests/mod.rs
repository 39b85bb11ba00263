use std::sync::{Arc, Mutex};

use crate::config::TimerMode;
use crate::controller::{TimerRegs, TimerUnit};
use crate::notify::TickHandler;
use crate::unit::{Pin, TimerId};

mod heartbeat;
mod notify;

/// Register write recorded by [`MockRegs`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RegWrite {
    Mode(u8, TimerMode, Option<Pin>),
    Period(u16, u32),
    Compare(u8, u32),
    Enabled(bool),
    Handler(bool),
}

/// Backend that records every write for inspection.
#[derive(Clone, Default)]
pub(crate) struct MockRegs {
    writes: Arc<Mutex<Vec<RegWrite>>>,
}

impl MockRegs {
    pub(crate) fn writes(&self) -> Vec<RegWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> Option<RegWrite> {
        self.writes.lock().unwrap().last().cloned()
    }
}

impl TimerRegs for MockRegs {
    fn write_mode(&mut self, channel: u8, mode: TimerMode, pin: Option<Pin>) {
        self.writes
            .lock()
            .unwrap()
            .push(RegWrite::Mode(channel, mode, pin));
    }

    fn write_period(&mut self, prescaler: u16, reload: u32) {
        self.writes
            .lock()
            .unwrap()
            .push(RegWrite::Period(prescaler, reload));
    }

    fn write_compare(&mut self, channel: u8, ticks: u32) {
        self.writes
            .lock()
            .unwrap()
            .push(RegWrite::Compare(channel, ticks));
    }

    fn write_enabled(&mut self, enabled: bool) {
        self.writes.lock().unwrap().push(RegWrite::Enabled(enabled));
    }

    fn write_handler(&mut self, handler: Option<TickHandler>) {
        self.writes
            .lock()
            .unwrap()
            .push(RegWrite::Handler(handler.is_some()));
    }
}

pub(crate) fn mock_unit(id: TimerId) -> (TimerUnit<MockRegs>, MockRegs) {
    let regs = MockRegs::default();
    (TimerUnit::new(id, regs.clone()), regs)
}
