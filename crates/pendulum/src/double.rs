//! Double pendulum equations of motion and fixed-step integration.
//!
//! The two arms are rigid and massless with point masses at their ends,
//! swinging in a vertical plane under uniform gravity. Writing the
//! Lagrangian equations as a 2x2 linear system
//!
//! ```text
//! b·θ1'' + c·θ2'' = a
//! w·θ1'' + k·θ2'' = f
//! ```
//!
//! and eliminating θ1'' gives the accelerations used by
//! [`DoublePendulum::accelerations`]. The state is then advanced with a
//! semi-implicit Euler step: velocities first, then positions from the new
//! velocities.

use tracing::{debug, warn};

use crate::error::{PendulumError, Result};
use crate::geometry::{arm, Point};
use crate::params::PendulumParams;
use crate::state::PendulumState;

/// Relative size below which the elimination denominator `k - c*w/b` is
/// treated as zero. The check is `|k - c*w/b| <= DEGENERACY_TOLERANCE * k`.
pub const DEGENERACY_TOLERANCE: f64 = 1e-6;

/// Returns a time delta for a given number of frames per second.
///
/// # Example
///
/// ```rust
/// use pendulum::{fps, DoublePendulum, PendulumParams};
///
/// let pendulum = DoublePendulum::new(fps(30), PendulumParams::default()).unwrap();
/// assert!((pendulum.delta_time() - 1.0 / 30.0).abs() < 1e-15);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / f64::from(n)
}

/// Coefficients of the linear system solved for the angular accelerations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquationTerms {
    /// Right-hand side of the upper-arm equation.
    pub a: f64,
    /// θ1'' coefficient of the upper-arm equation.
    pub b: f64,
    /// θ2'' coefficient of the upper-arm equation.
    pub c: f64,
    /// Right-hand side of the lower-arm equation.
    pub f: f64,
    /// θ2'' coefficient of the lower-arm equation.
    pub k: f64,
    /// θ1'' coefficient of the lower-arm equation.
    pub w: f64,
}

impl EquationTerms {
    /// Denominator of the θ2'' solution, `k - c*w/b`.
    #[inline]
    pub fn denominator(&self) -> f64 {
        self.k - self.c * self.w / self.b
    }
}

/// Angular accelerations of both arms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accelerations {
    /// θ1''.
    pub theta1_ddot: f64,
    /// θ2''.
    pub theta2_ddot: f64,
}

/// Cartesian positions of the two bobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BobPositions {
    /// End of the upper arm.
    pub upper: Point,
    /// End of the lower arm.
    pub lower: Point,
}

/// A double pendulum with fixed parameters and time step.
///
/// The pendulum itself holds no angular state. Each call to
/// [`step`](Self::step) maps a [`PendulumState`] to the next one, so the
/// caller decides where the state lives.
///
/// # Example
///
/// ```rust
/// use pendulum::{fps, DoublePendulum, PendulumParams, PendulumState};
///
/// let pendulum = DoublePendulum::new(fps(30), PendulumParams::default()).unwrap();
///
/// let mut state = PendulumState::released();
/// for _ in 0..30 {
///     state = pendulum.step(state).unwrap();
/// }
/// assert!(state.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePendulum {
    params: PendulumParams,
    delta_time: f64,
    pivot: Point,
    scale: f64,
}

impl DoublePendulum {
    /// Creates a double pendulum advancing by `delta_time` per step.
    ///
    /// The pivot starts at the origin and positions are reported in
    /// physical length units.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] if `delta_time` or any
    /// physical parameter is non-finite or non-positive.
    pub fn new(delta_time: f64, params: PendulumParams) -> Result<Self> {
        PendulumError::require_positive("delta_time", delta_time)?;
        params.validate()?;
        debug!(delta_time, ?params, "double pendulum configured");
        Ok(Self {
            params,
            delta_time,
            pivot: Point::origin(),
            scale: 1.0,
        })
    }

    /// Moves the fixed pivot.
    pub fn with_pivot(mut self, pivot: Point) -> Self {
        self.pivot = pivot;
        self
    }

    /// Sets display units per physical length unit for bob positions.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for a non-positive or
    /// non-finite scale.
    pub fn with_scale(mut self, scale: f64) -> Result<Self> {
        self.scale = PendulumError::require_positive("scale", scale)?;
        Ok(self)
    }

    /// Returns the physical parameters.
    #[inline]
    pub const fn params(&self) -> &PendulumParams {
        &self.params
    }

    /// Returns the time step.
    #[inline]
    pub const fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Returns the pivot position.
    #[inline]
    pub const fn pivot(&self) -> Point {
        self.pivot
    }

    /// Returns the display scale.
    #[inline]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Evaluates the coefficients of the equations of motion at `state`.
    pub fn terms(&self, state: &PendulumState) -> EquationTerms {
        let PendulumParams {
            gravity: g,
            mass1: m1,
            mass2: m2,
            length1: r1,
            length2: r2,
        } = self.params;
        let (sin_delta, cos_delta) = state.delta().sin_cos();

        EquationTerms {
            a: -(m1 + m2) * g * r1 * state.theta1.sin()
                - m2 * r1 * r2 * state.theta2_dot * state.theta2_dot * sin_delta,
            b: (m1 + m2) * r1 * r1,
            c: m2 * r1 * r2 * cos_delta,
            f: -m2 * g * r2 * state.theta2.sin()
                + m2 * r1 * r2 * state.theta1_dot * state.theta1_dot * sin_delta,
            k: m2 * r2 * r2,
            w: m2 * r1 * r2 * cos_delta,
        }
    }

    /// Solves for the angular accelerations at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::NonFiniteState`] for NaN or infinite input
    /// and [`PendulumError::DegenerateConfiguration`] when the elimination
    /// denominator is within [`DEGENERACY_TOLERANCE`] of zero relative to
    /// `k`, or when the solution is not finite.
    pub fn accelerations(&self, state: &PendulumState) -> Result<Accelerations> {
        state.ensure_finite()?;

        let EquationTerms { a, b, c, f, k, w } = self.terms(state);
        let denominator = k - c * w / b;
        let degenerate = || PendulumError::DegenerateConfiguration {
            denominator,
            theta1: state.theta1,
            theta2: state.theta2,
        };

        if denominator.abs() <= DEGENERACY_TOLERANCE * k {
            return Err(degenerate());
        }

        let theta2_ddot = (f - a * w / b) / denominator;
        let theta1_ddot = a / b - c * theta2_ddot / b;

        if !(theta1_ddot.is_finite() && theta2_ddot.is_finite()) {
            return Err(degenerate());
        }

        Ok(Accelerations {
            theta1_ddot,
            theta2_ddot,
        })
    }

    /// Advances `state` by one time step.
    ///
    /// Velocities are updated from the accelerations before the angles are
    /// updated from the new velocities.
    ///
    /// # Errors
    ///
    /// See [`accelerations`](Self::accelerations). A step whose result would
    /// not be finite is rejected the same way.
    pub fn step(&self, state: PendulumState) -> Result<PendulumState> {
        let Accelerations {
            theta1_ddot,
            theta2_ddot,
        } = self.accelerations(&state)?;
        let dt = self.delta_time;

        let theta2_dot = state.theta2_dot + theta2_ddot * dt;
        let theta1_dot = state.theta1_dot + theta1_ddot * dt;
        let theta1 = state.theta1 + theta1_dot * dt;
        let theta2 = state.theta2 + theta2_dot * dt;

        let next = PendulumState::new(theta1, theta2, theta1_dot, theta2_dot);
        if !next.is_finite() {
            return Err(PendulumError::DegenerateConfiguration {
                denominator: self.terms(&state).denominator(),
                theta1: state.theta1,
                theta2: state.theta2,
            });
        }
        Ok(next)
    }

    /// Places both bobs for `state`.
    ///
    /// With both angles at zero the bobs hang directly below the pivot.
    pub fn bob_positions(&self, state: &PendulumState) -> BobPositions {
        let upper = self.pivot + arm(state.theta1, self.params.length1 * self.scale);
        let lower = upper + arm(state.theta2, self.params.length2 * self.scale);
        BobPositions { upper, lower }
    }

    /// Per-frame update: steps `state` in place and returns the new bob
    /// positions.
    ///
    /// On failure `state` is left exactly as it was, so a host can keep
    /// drawing the last good frame.
    ///
    /// # Errors
    ///
    /// See [`step`](Self::step).
    pub fn update(&self, state: &mut PendulumState) -> Result<BobPositions> {
        match self.step(*state) {
            Ok(next) => {
                *state = next;
                Ok(self.bob_positions(state))
            }
            Err(err) => {
                warn!(%err, ?state, "step rejected, state frozen");
                Err(err)
            }
        }
    }
}
