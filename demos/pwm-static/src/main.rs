//! Static PWM duty cycle.
//!
//! One `set_pwm` call programs mode, pin routing, carrier frequency, and
//! duty together; after `start()` the hardware keeps producing the waveform
//! with no further involvement from the main flow.

use log::info;

use timer_hal::{Pin, Port, TimerId};
use timer_sim::SimBoard;

const PA6: Pin = Pin::new(Port::A, 6);

fn main() {
    env_logger::init();

    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim3).expect("TIM3 is free at reset");
    tim.set_pwm(1, PA6, 20_000, 30.0).expect("PA6 carries TIM3 ch1");
    tim.start().expect("configured");

    board.advance(1_000_000);
    info!(
        "after 1s: PA6 duty latched at {:.1}%",
        board.latched_duty(TimerId::Tim3, 1).expect("pwm channel"),
    );
}
