#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::float_cmp)]

//! Integration tests for the pendulum models covering energy behavior,
//! determinism, long-duration stability, and extreme parameters.

use std::f64::consts::{FRAC_PI_2, PI};

use pendulum::{
    fps, total_energy, DoublePendulum, PendulumError, PendulumParams, PendulumState, Point,
    Recorder, SimplePendulum, SimplePendulumState, Simulation,
};

fn unit(dt: f64) -> DoublePendulum {
    DoublePendulum::new(dt, PendulumParams::default()).unwrap()
}

/// Largest relative rise of total energy above its starting value.
fn peak_energy_growth(pendulum: &DoublePendulum, initial: PendulumState, steps: usize) -> f64 {
    let params = pendulum.params();
    let e0 = total_energy(params, &initial);
    let mut state = initial;
    let mut peak = e0;
    for _ in 0..steps {
        state = pendulum.step(state).unwrap();
        peak = peak.max(total_energy(params, &state));
    }
    (peak - e0) / e0.abs()
}

// =============================================================================
// Energy
// =============================================================================

#[test]
fn energy_bounded_for_moderate_swing() {
    // 15 simulated seconds at the animation frame rate
    let growth = peak_energy_growth(&unit(fps(30)), PendulumState::at_rest(0.5, 0.8), 450);
    assert!(growth < 0.05, "energy grew by {growth:.4}");
}

#[test]
fn energy_bounded_for_release_at_fine_step() {
    // The chaotic release needs a finer step than the animation uses to
    // keep the drift small.
    let growth = peak_energy_growth(&unit(fps(300)), PendulumState::released(), 4500);
    assert!(growth < 0.05, "energy grew by {growth:.4}");
}

#[test]
fn energy_drift_shrinks_with_step_size() {
    let coarse = peak_energy_growth(&unit(fps(30)), PendulumState::at_rest(0.5, 0.8), 450);
    let fine = peak_energy_growth(&unit(fps(120)), PendulumState::at_rest(0.5, 0.8), 1800);
    assert!(fine < coarse, "fine={fine} coarse={coarse}");
}

#[test]
fn energy_never_exceeds_release_by_much() {
    // Even at the coarse step the released pendulum cannot gain enough
    // energy to spin the upper arm over the top (E = 3 for unit params).
    let pendulum = unit(fps(30));
    let mut state = PendulumState::released();
    for _ in 0..450 {
        state = pendulum.step(state).unwrap();
        assert!(total_energy(pendulum.params(), &state) < 1.5);
    }
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn identical_runs_are_bit_identical() {
    let run = || {
        let mut sim = Simulation::for_duration(unit(fps(30)), PendulumState::released(), 15.0)
            .unwrap();
        let mut recorder = Recorder::default();
        sim.drive(&mut recorder).unwrap();
        recorder.frames
    };

    let first = run();
    for _ in 0..3 {
        let again = run();
        assert_eq!(first.len(), again.len());
        for (a, b) in first.iter().zip(&again) {
            assert_eq!(a.state.theta1.to_bits(), b.state.theta1.to_bits());
            assert_eq!(a.state.theta2.to_bits(), b.state.theta2.to_bits());
            assert_eq!(a.state.theta1_dot.to_bits(), b.state.theta1_dot.to_bits());
            assert_eq!(a.state.theta2_dot.to_bits(), b.state.theta2_dot.to_bits());
        }
    }
}

#[test]
fn chaotic_sensitivity_to_initial_conditions() {
    let pendulum = unit(fps(30));
    let mut a = PendulumState::released();
    let mut b = PendulumState::at_rest(FRAC_PI_2 + 1e-9, FRAC_PI_2 + 1.0);
    for _ in 0..450 {
        a = pendulum.step(a).unwrap();
        b = pendulum.step(b).unwrap();
    }
    assert_ne!(a, b);
}

// =============================================================================
// Long-duration stability
// =============================================================================

#[test]
fn ten_minutes_stay_finite() {
    let pendulum = unit(fps(30));
    let mut state = PendulumState::released();
    for _ in 0..18_000 {
        let bobs = pendulum.update(&mut state).unwrap();
        assert!(state.is_finite());
        assert!(bobs.upper.is_finite());
        assert!(bobs.lower.is_finite());
    }
}

#[test]
fn arms_keep_their_length() {
    let pendulum = unit(fps(30))
        .with_pivot(Point::new(0.0, 2.0))
        .with_scale(2.5)
        .unwrap();
    let mut state = PendulumState::released();
    for _ in 0..450 {
        let bobs = pendulum.update(&mut state).unwrap();
        assert!((bobs.upper.distance(pendulum.pivot()) - 2.5).abs() < 1e-9);
        assert!((bobs.lower.distance(bobs.upper) - 2.5).abs() < 1e-9);
    }
}

// =============================================================================
// Extreme parameters
// =============================================================================

#[test]
fn earth_gravity_uneven_arms() {
    let params = PendulumParams::new(9.81, 2.0, 1.0, 1.0, 0.5);
    let pendulum = DoublePendulum::new(fps(60), params).unwrap();
    let mut state = PendulumState::at_rest(1.0, -0.5);
    for _ in 0..900 {
        state = pendulum.step(state).unwrap();
        assert!(state.is_finite());
    }
}

#[test]
fn heavy_lower_bob_near_alignment_is_flagged() {
    let params = PendulumParams::default().with_masses(1e-7, 1.0);
    let pendulum = DoublePendulum::new(fps(30), params).unwrap();

    let aligned = PendulumState::at_rest(0.3, 0.3);
    assert!(matches!(
        pendulum.step(aligned),
        Err(PendulumError::DegenerateConfiguration { .. })
    ));

    // Folded back on itself is just as degenerate.
    let folded = PendulumState::at_rest(0.3, 0.3 + PI);
    assert!(pendulum.step(folded).unwrap_err().is_degenerate());

    // At right angles the system is well conditioned.
    let crossed = PendulumState::at_rest(0.3, 0.3 + FRAC_PI_2);
    assert!(pendulum.step(crossed).is_ok());
}

#[test]
fn invalid_configuration_rejected_at_setup() {
    for params in [
        PendulumParams::default().with_gravity(-9.81),
        PendulumParams::default().with_masses(0.0, 1.0),
        PendulumParams::default().with_lengths(1.0, f64::INFINITY),
    ] {
        assert!(matches!(
            DoublePendulum::new(fps(30), params),
            Err(PendulumError::InvalidParameter { .. })
        ));
    }
}

#[test]
fn unwrapped_angles_are_equivalent_to_wrapped() {
    let pendulum = unit(fps(30));
    let wrapped = pendulum.step(PendulumState::at_rest(0.4, -0.7)).unwrap();
    let unwrapped = pendulum
        .step(PendulumState::at_rest(0.4 + 4.0 * PI, -0.7 - 2.0 * PI))
        .unwrap();
    assert!((wrapped.theta1_dot - unwrapped.theta1_dot).abs() < 1e-12);
    assert!((wrapped.theta2_dot - unwrapped.theta2_dot).abs() < 1e-12);
    assert!((unwrapped.theta1 - 4.0 * PI - wrapped.theta1).abs() < 1e-12);
}

// =============================================================================
// Simple pendulum
// =============================================================================

#[test]
fn simple_pendulum_period_from_zero_crossings() {
    let pendulum = SimplePendulum::new(fps(1000), 1.0, 1.0).unwrap();
    let amplitude = 2.0;
    let expected = pendulum.period(amplitude).unwrap();

    let mut state = SimplePendulumState::at_rest(amplitude);
    let mut crossings = Vec::new();
    for i in 1..=20_000_i32 {
        let next = pendulum.step(state);
        if state.angle > 0.0 && next.angle <= 0.0 {
            crossings.push(f64::from(i) * pendulum.delta_time());
        }
        state = next;
    }

    assert!(crossings.len() >= 2);
    let measured = crossings[1] - crossings[0];
    assert!(
        (measured - expected).abs() < 0.01,
        "measured {measured}, expected {expected}"
    );
    assert!(measured > pendulum.small_angle_period());
}
