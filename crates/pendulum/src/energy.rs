//! Mechanical energy of the double pendulum.
//!
//! These functions work from the state alone and share no code with the
//! integrator, so they can be used to audit it. Heights are measured from
//! the pivot, which makes the potential energy negative at rest.

use serde::{Deserialize, Serialize};

use crate::params::PendulumParams;
use crate::state::PendulumState;

/// Kinetic, potential, and total energy at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    /// Kinetic energy.
    pub kinetic: f64,
    /// Potential energy relative to the pivot height.
    pub potential: f64,
}

impl Energy {
    /// Evaluates both energy terms for `state`.
    pub fn of(params: &PendulumParams, state: &PendulumState) -> Self {
        Self {
            kinetic: kinetic_energy(params, state),
            potential: potential_energy(params, state),
        }
    }

    /// Kinetic plus potential energy.
    #[inline]
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// `½(M1+M2)R1²θ1'² + ½M2R2²θ2'² + M2R1R2θ1'θ2'cos(θ1-θ2)`
pub fn kinetic_energy(params: &PendulumParams, state: &PendulumState) -> f64 {
    let PendulumParams {
        mass1: m1,
        mass2: m2,
        length1: r1,
        length2: r2,
        ..
    } = *params;
    let (w1, w2) = (state.theta1_dot, state.theta2_dot);

    0.5 * (m1 + m2) * r1 * r1 * w1 * w1
        + 0.5 * m2 * r2 * r2 * w2 * w2
        + m2 * r1 * r2 * w1 * w2 * state.delta().cos()
}

/// `-(M1+M2)gR1cos(θ1) - M2gR2cos(θ2)`
pub fn potential_energy(params: &PendulumParams, state: &PendulumState) -> f64 {
    let g = params.gravity;
    -params.total_mass() * g * params.length1 * state.theta1.cos()
        - params.mass2 * g * params.length2 * state.theta2.cos()
}

/// Total mechanical energy.
pub fn total_energy(params: &PendulumParams, state: &PendulumState) -> f64 {
    Energy::of(params, state).total()
}
