//! Interrupt-driven blink.
//!
//! A basic timer fires once per second; the handler flips a shared flag and
//! nothing else. The main flow mirrors the flag to a log line, standing in
//! for the LED write.

use log::info;

use timer_hal::{Period, TickFlag, TimerId};
use timer_sim::SimBoard;

fn main() {
    env_logger::init();

    let board = SimBoard::new();
    let mut tim = board.claim(TimerId::Tim6).expect("TIM6 is free at reset");
    tim.set_period(Period::Micros(1_000_000)).expect("period fits");

    let led = TickFlag::new();
    tim.attach_interrupt(led.handler()).expect("pure interrupt mode");
    tim.start().expect("configured");

    for _ in 0..10 {
        board.advance(1_000_000);
        info!("LED {}", if led.get() { "on" } else { "off" });
    }
    tim.stop();

    // Park the LED low; the handler no longer runs, so the main flow owns
    // the flag again.
    if led.get() {
        led.toggle();
    }
    info!("LED off");
}
