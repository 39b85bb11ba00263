use super::mock_unit;
use crate::heartbeat::Heartbeat;
use crate::unit::{Pin, Port, TimerId};
use crate::TimerState;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn reference() -> Heartbeat {
    // A = 12.5 %, T = 2 s, 1 kHz carrier on TIM2 ch1.
    Heartbeat::new(1, Pin::new(Port::A, 0), 1_000, 12.5, 2.0)
}

#[test]
fn known_points_of_the_sweep() {
    let hb = reference();
    assert!(close(hb.duty_at(0), 12.5));
    assert!(close(hb.duty_at(500), 25.0));
    assert!(close(hb.duty_at(1000), 12.5));
    assert!(close(hb.duty_at(1500), 0.0));
}

#[test]
fn periodic_with_period_1000_t() {
    let hb = reference();
    for t in (0..4000).step_by(37) {
        assert!(
            close(hb.duty_at(t), hb.duty_at(t + 2000)),
            "duty not periodic at t={t}"
        );
    }
}

#[test]
fn bounded_by_twice_the_amplitude() {
    let hb = reference();
    for t in (0..10_000).step_by(13) {
        let duty = hb.duty_at(t);
        assert!((0.0..=25.0).contains(&duty), "duty {duty} out of [0, 2A] at t={t}");
    }
}

#[test]
fn oversized_amplitude_is_clamped() {
    let hb = Heartbeat::new(1, Pin::new(Port::A, 0), 1_000, 75.0, 1.0);
    for t in (0..2_000).step_by(7) {
        let duty = hb.duty_at(t);
        assert!((0.0..=100.0).contains(&duty));
    }
    // Peak of the sine sits above 100 % and must clamp exactly.
    assert!(close(hb.duty_at(250), 100.0));
}

#[test]
fn update_pushes_duty_through_set_pwm() {
    let hb = reference();
    let (mut unit, _) = mock_unit(TimerId::Tim2);
    hb.update(&mut unit, 500).unwrap();
    assert_eq!(unit.state(), TimerState::Stopped);
    let config = unit.channel(1).unwrap();
    assert!(close(config.duty_percent.unwrap(), 25.0));

    // Safe at arbitrary, non-uniform polling intervals, including while running.
    unit.start().unwrap();
    for t in [501, 733, 734, 2_900, 10_000] {
        hb.update(&mut unit, t).unwrap();
    }
    assert_eq!(unit.state(), TimerState::Running);
}
