//! Error types for pendulum construction and stepping.

use thiserror::Error;

/// Errors raised by the pendulum models.
///
/// Configuration problems surface once, when a model is built. The only
/// per-step failure is [`PendulumError::DegenerateConfiguration`], which
/// leaves the caller's state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PendulumError {
    /// A physical parameter or time step is non-positive or non-finite.
    #[error("invalid parameter `{name}`: {value} ({reason})")]
    InvalidParameter {
        /// Parameter name as it appears in configuration.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },

    /// The state handed to a step contains NaN or infinity.
    #[error("state is not finite: {0}")]
    NonFiniteState(String),

    /// The equations of motion cannot be solved reliably for this state.
    #[error(
        "degenerate configuration at theta1={theta1}, theta2={theta2}: \
         denominator {denominator:e} is too close to zero"
    )]
    DegenerateConfiguration {
        /// The value of `k - c*w/b` at the rejected state.
        denominator: f64,
        /// First arm angle at the rejected state.
        theta1: f64,
        /// Second arm angle at the rejected state.
        theta2: f64,
    },
}

impl PendulumError {
    /// Returns true for failures that stop a running simulation.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateConfiguration { .. })
    }

    /// Checks that `value` is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] naming `name` otherwise.
    pub fn require_positive(name: &'static str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(Self::InvalidParameter {
                name,
                value,
                reason: "must be finite",
            });
        }
        if value <= 0.0 {
            return Err(Self::InvalidParameter {
                name,
                value,
                reason: "must be greater than zero",
            });
        }
        Ok(value)
    }
}

/// Result type alias for pendulum operations.
pub type Result<T> = std::result::Result<T, PendulumError>;
