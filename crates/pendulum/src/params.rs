//! Physical parameters of the double pendulum.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::double::DEGENERACY_TOLERANCE;
use crate::error::{PendulumError, Result};

/// Gravity, point masses, and arm lengths of a double pendulum.
///
/// All values default to 1.0, which is the dimensionless setup the
/// animation uses. Build a [`DoublePendulum`](crate::DoublePendulum) to have
/// them validated.
///
/// # Example
///
/// ```rust
/// use pendulum::PendulumParams;
///
/// let params = PendulumParams::default().with_gravity(9.81).with_lengths(1.0, 0.5);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumParams {
    /// Gravitational acceleration `g`.
    pub gravity: f64,
    /// Mass of the upper bob `M1`.
    pub mass1: f64,
    /// Mass of the lower bob `M2`.
    pub mass2: f64,
    /// Length of the upper arm `R1`.
    pub length1: f64,
    /// Length of the lower arm `R2`.
    pub length2: f64,
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            mass1: 1.0,
            mass2: 1.0,
            length1: 1.0,
            length2: 1.0,
        }
    }
}

impl PendulumParams {
    /// Creates parameters from explicit values.
    pub const fn new(gravity: f64, mass1: f64, mass2: f64, length1: f64, length2: f64) -> Self {
        Self {
            gravity,
            mass1,
            mass2,
            length1,
            length2,
        }
    }

    /// Sets the gravitational acceleration.
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets both bob masses.
    pub fn with_masses(mut self, mass1: f64, mass2: f64) -> Self {
        self.mass1 = mass1;
        self.mass2 = mass2;
        self
    }

    /// Sets both arm lengths.
    pub fn with_lengths(mut self, length1: f64, length2: f64) -> Self {
        self.length1 = length1;
        self.length2 = length2;
        self
    }

    /// Rejects non-finite or non-positive parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        PendulumError::require_positive("gravity", self.gravity)?;
        PendulumError::require_positive("mass1", self.mass1)?;
        PendulumError::require_positive("mass2", self.mass2)?;
        PendulumError::require_positive("length1", self.length1)?;
        PendulumError::require_positive("length2", self.length2)?;

        if self.min_denominator_ratio() <= DEGENERACY_TOLERANCE {
            warn!(
                mass1 = self.mass1,
                mass2 = self.mass2,
                "upper bob is so light that aligned arms will be rejected as degenerate"
            );
        }
        Ok(())
    }

    /// Total mass carried by the upper arm, `M1 + M2`.
    #[inline]
    pub fn total_mass(&self) -> f64 {
        self.mass1 + self.mass2
    }

    /// Smallest value of `(k - c*w/b) / k` over all angles.
    ///
    /// Reached when the arms are aligned (`cos Δ = ±1`), where it equals
    /// `M1 / (M1 + M2)`.
    pub fn min_denominator_ratio(&self) -> f64 {
        self.mass1 / self.total_mass()
    }
}
