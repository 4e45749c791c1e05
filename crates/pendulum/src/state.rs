//! Angular state of the double pendulum.

use core::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::error::{PendulumError, Result};

/// Angles and angular velocities of both arms.
///
/// Angles are measured from the downward vertical in radians and are never
/// wrapped into a canonical range. The host loop owns the state and threads
/// it through [`DoublePendulum::step`](crate::DoublePendulum::step).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PendulumState {
    /// Angle of the upper arm.
    pub theta1: f64,
    /// Angle of the lower arm.
    pub theta2: f64,
    /// Angular velocity of the upper arm.
    pub theta1_dot: f64,
    /// Angular velocity of the lower arm.
    pub theta2_dot: f64,
}

impl PendulumState {
    /// Creates a state from angles and angular velocities.
    #[inline]
    pub const fn new(theta1: f64, theta2: f64, theta1_dot: f64, theta2_dot: f64) -> Self {
        Self {
            theta1,
            theta2,
            theta1_dot,
            theta2_dot,
        }
    }

    /// Creates a state at rest with the given angles.
    #[inline]
    pub const fn at_rest(theta1: f64, theta2: f64) -> Self {
        Self::new(theta1, theta2, 0.0, 0.0)
    }

    /// The stable equilibrium: both arms hanging straight down.
    #[inline]
    pub const fn equilibrium() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// The release position of the animation: upper arm horizontal, lower
    /// arm one radian further, both at rest.
    #[inline]
    pub const fn released() -> Self {
        Self::at_rest(FRAC_PI_2, FRAC_PI_2 + 1.0)
    }

    /// Angle between the arms, `theta1 - theta2`.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.theta1 - self.theta2
    }

    /// Returns true if all four components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.theta1.is_finite()
            && self.theta2.is_finite()
            && self.theta1_dot.is_finite()
            && self.theta2_dot.is_finite()
    }

    pub(crate) fn ensure_finite(&self) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(PendulumError::NonFiniteState(format!("{self:?}")))
        }
    }
}
