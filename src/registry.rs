//! Arena of claimable physical timer units.
//!
//! Each physical unit is a process-wide singleton: it lives in a fixed slot
//! indexed by [`TimerId`] and can be claimed by at most one owner at a time.

use log::debug;

use crate::controller::{TimerRegs, TimerUnit};
use crate::error::{TimerError, TimerResult};
use crate::sync::Mutex;
use crate::unit::TimerId;

/// Fixed-slot arena over the physical timer units.
pub struct TimerBank<R: TimerRegs> {
    slots: Mutex<[Option<TimerUnit<R>>; TimerId::COUNT]>,
}

impl<R: TimerRegs> TimerBank<R> {
    /// Builds the bank, constructing one backend per physical unit.
    pub fn new<F>(mut make_regs: F) -> Self
    where
        F: FnMut(TimerId) -> R,
    {
        let slots = core::array::from_fn(|i| {
            let id = TimerId::ALL[i];
            Some(TimerUnit::new(id, make_regs(id)))
        });
        Self {
            slots: Mutex::new(slots),
        }
    }

    /// Takes exclusive ownership of one unit.
    pub fn claim(&self, id: TimerId) -> TimerResult<TimerUnit<R>> {
        let unit = self.slots.lock()[id.index()]
            .take()
            .ok_or(TimerError::AlreadyClaimed(id))?;
        debug!("{id}: claimed");
        Ok(unit)
    }

    /// Returns a unit to its slot, making it claimable again.
    ///
    /// The unit keeps whatever configuration it had; registers on this class
    /// of device only reset on power loss.
    pub fn release(&self, unit: TimerUnit<R>) {
        let id = unit.id();
        self.slots.lock()[id.index()] = Some(unit);
        debug!("{id}: released");
    }

    /// Whether a unit is currently claimed.
    pub fn is_claimed(&self, id: TimerId) -> bool {
        self.slots.lock()[id.index()].is_none()
    }
}
