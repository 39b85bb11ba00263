//! Breathing PWM.
//!
//! Starts a 1 kHz PWM carrier on TIM2 channel 1 / PA0 and sweeps the duty
//! cycle sinusoidally from the polled main loop: amplitude 12.5 %, sweep
//! period 2 s, so the duty breathes between 0 % and 25 %.

use log::info;

use timer_hal::{Heartbeat, Pin, Port, TimerId};
use timer_sim::SimBoard;

const PA0: Pin = Pin::new(Port::A, 0);

fn main() {
    env_logger::init();

    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim2).expect("TIM2 is free at reset");
    let heartbeat = Heartbeat::new(1, PA0, 1_000, 12.5, 2.0);

    heartbeat.update(&mut tim, 0).expect("valid pwm setup");
    tim.start().expect("configured");

    for elapsed_ms in (100..=4_000).step_by(100) {
        board.advance(100_000);
        heartbeat.update(&mut tim, elapsed_ms).expect("valid duty");
        info!(
            "t={elapsed_ms}ms duty={:.2}% (latched {:.2}%)",
            heartbeat.duty_at(elapsed_ms),
            board.latched_duty(TimerId::Tim2, 1).unwrap_or(0.0),
        );
    }
}
