//! Hardware-only toggle channel.
//!
//! TIM2 channel 1 flips PA0 once per period entirely in hardware; after
//! `start()` the main flow makes zero further calls.

use log::info;

use timer_hal::{Period, Pin, Port, TimerId, TimerMode};
use timer_sim::SimBoard;

const PA0: Pin = Pin::new(Port::A, 0);

fn main() {
    env_logger::init();

    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim2).expect("TIM2 is free at reset");
    tim.configure_mode(1, TimerMode::OutputCompareToggle, Some(PA0))
        .expect("PA0 carries TIM2 ch1");
    tim.set_period(Period::Micros(1_000_000)).expect("period fits");
    tim.start().expect("configured");

    for second in 1..=5 {
        board.advance(1_000_000);
        info!(
            "t={second}s PA0={:?} ({} transitions)",
            board.pin_level(PA0).expect("routed"),
            board.transitions(PA0).expect("routed"),
        );
    }
}
