//! The simple pendulum: one rigid arm, one point mass.
//!
//! Three views of the same system are provided:
//!
//! - [`SimplePendulum::step`]: numerical integration of
//!   `θ'' = -(g/l)·sin θ` with the same semi-implicit Euler ordering as the
//!   double pendulum.
//! - [`HarmonicMotion`]: the small-angle approximation `sin θ ≈ θ`, whose
//!   solution is `θ = C·sin(ωt − α)`.
//! - [`SimplePendulum::exact_angle`]: the exact solution from rest,
//!   `θ(t) = 2·arcsin(k·cd(ωt; k))` with `k = sin(θ0/2)`.

use core::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::elliptic::{complete_first_kind, jacobi};
use crate::error::{PendulumError, Result};
use crate::geometry::{arm, Point};

/// Angle and angular velocity of a simple pendulum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplePendulumState {
    /// Angle from the downward vertical.
    pub angle: f64,
    /// Angular velocity.
    pub angular_velocity: f64,
}

impl SimplePendulumState {
    /// Creates a state from an angle and angular velocity.
    #[inline]
    pub const fn new(angle: f64, angular_velocity: f64) -> Self {
        Self {
            angle,
            angular_velocity,
        }
    }

    /// Creates a state released from rest at `angle`.
    #[inline]
    pub const fn at_rest(angle: f64) -> Self {
        Self::new(angle, 0.0)
    }
}

/// Linearized (small-angle) motion `θ(t) = C·sin(ωt − α)`.
///
/// # Example
///
/// ```rust
/// use pendulum::HarmonicMotion;
///
/// // θ = 0.1·cos(t) written as C·sin(t − α)
/// let motion = HarmonicMotion::from_coefficients(1.0, 0.1, 0.0);
/// assert!((motion.amplitude() - 0.1).abs() < 1e-15);
/// assert!((motion.angle_at(0.0) - 0.1).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicMotion {
    angular_frequency: f64,
    amplitude: f64,
    phase: f64,
}

impl HarmonicMotion {
    /// Builds the motion `c1·cos(ωt) + c2·sin(ωt)`.
    ///
    /// The amplitude is `C = sqrt(c1² + c2²)` and the phase satisfies
    /// `cos α = c2/C`, `sin α = −c1/C`.
    pub fn from_coefficients(angular_frequency: f64, c1: f64, c2: f64) -> Self {
        let amplitude = c1.hypot(c2);
        let phase = if amplitude == 0.0 { 0.0 } else { (-c1).atan2(c2) };
        Self {
            angular_frequency,
            amplitude,
            phase,
        }
    }

    /// Builds the motion through `angle` with `angular_velocity` at `t = 0`.
    pub fn from_initial(angular_frequency: f64, angle: f64, angular_velocity: f64) -> Self {
        Self::from_coefficients(angular_frequency, angle, angular_velocity / angular_frequency)
    }

    /// Returns `ω`.
    #[inline]
    pub const fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    /// Returns `C`.
    #[inline]
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Returns `α`.
    #[inline]
    pub const fn phase(&self) -> f64 {
        self.phase
    }

    /// Returns `(c1, c2)` of the cosine/sine form.
    pub fn coefficients(&self) -> (f64, f64) {
        let (sin, cos) = self.phase.sin_cos();
        (-self.amplitude * sin, self.amplitude * cos)
    }

    /// Angle at time `t`.
    #[inline]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.amplitude * (self.angular_frequency * t - self.phase).sin()
    }

    /// Angular velocity at time `t`.
    #[inline]
    pub fn angular_velocity_at(&self, t: f64) -> f64 {
        self.amplitude * self.angular_frequency * (self.angular_frequency * t - self.phase).cos()
    }
}

/// A simple pendulum with fixed gravity, arm length, and time step.
///
/// # Example
///
/// ```rust
/// use pendulum::{fps, SimplePendulum, SimplePendulumState};
///
/// let pendulum = SimplePendulum::new(fps(30), 1.0, 1.0).unwrap();
/// let mut state = SimplePendulumState::at_rest(0.3);
/// for _ in 0..30 {
///     state = pendulum.step(state);
/// }
/// assert!(state.angle.abs() <= 0.3 + 1e-2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplePendulum {
    gravity: f64,
    length: f64,
    delta_time: f64,
    pivot: Point,
    scale: f64,
}

impl SimplePendulum {
    /// Creates a simple pendulum.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] if any argument is
    /// non-finite or non-positive.
    pub fn new(delta_time: f64, gravity: f64, length: f64) -> Result<Self> {
        Ok(Self {
            gravity: PendulumError::require_positive("gravity", gravity)?,
            length: PendulumError::require_positive("length", length)?,
            delta_time: PendulumError::require_positive("delta_time", delta_time)?,
            pivot: Point::origin(),
            scale: 1.0,
        })
    }

    /// Moves the fixed pivot.
    pub fn with_pivot(mut self, pivot: Point) -> Self {
        self.pivot = pivot;
        self
    }

    /// Sets display units per physical length unit.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for a non-positive or
    /// non-finite scale.
    pub fn with_scale(mut self, scale: f64) -> Result<Self> {
        self.scale = PendulumError::require_positive("scale", scale)?;
        Ok(self)
    }

    /// Returns `g`.
    #[inline]
    pub const fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Returns `l`.
    #[inline]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Returns the time step.
    #[inline]
    pub const fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// `ω = sqrt(g/l)`.
    #[inline]
    pub fn angular_frequency(&self) -> f64 {
        (self.gravity / self.length).sqrt()
    }

    /// Period of small oscillations, `2π/ω`.
    #[inline]
    pub fn small_angle_period(&self) -> f64 {
        TAU / self.angular_frequency()
    }

    /// Exact period of a swing with the given amplitude, `4·K(k²)/ω`.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] unless
    /// `|amplitude| < π`; at π the pendulum balances upright forever.
    pub fn period(&self, amplitude: f64) -> Result<f64> {
        let k = modulus(amplitude)?;
        Ok(4.0 * complete_first_kind(k * k) / self.angular_frequency())
    }

    /// Exact angle at time `t` for a pendulum released from rest at
    /// `amplitude`.
    ///
    /// # Errors
    ///
    /// Same domain as [`period`](Self::period).
    pub fn exact_angle(&self, amplitude: f64, t: f64) -> Result<f64> {
        let k = modulus(amplitude)?;
        let cd = jacobi(self.angular_frequency() * t, k * k).cd();
        Ok(2.0 * (k * cd).clamp(-1.0, 1.0).asin())
    }

    /// Small-angle motion through `state` at `t = 0`.
    pub fn small_angle(&self, state: &SimplePendulumState) -> HarmonicMotion {
        HarmonicMotion::from_initial(self.angular_frequency(), state.angle, state.angular_velocity)
    }

    /// `θ'' = -(g/l)·sin θ`.
    #[inline]
    pub fn acceleration(&self, angle: f64) -> f64 {
        -(self.gravity / self.length) * angle.sin()
    }

    /// Advances `state` by one time step: velocity first, then angle from
    /// the new velocity.
    #[inline]
    pub fn step(&self, state: SimplePendulumState) -> SimplePendulumState {
        let angular_velocity = state.angular_velocity + self.acceleration(state.angle) * self.delta_time;
        let angle = state.angle + angular_velocity * self.delta_time;
        SimplePendulumState::new(angle, angular_velocity)
    }

    /// Bob position for `angle`.
    pub fn bob_position(&self, angle: f64) -> Point {
        self.pivot + arm(angle, self.length * self.scale)
    }

    /// Mechanical energy per unit mass, with heights measured from the
    /// pivot.
    pub fn energy(&self, state: &SimplePendulumState) -> f64 {
        let l = self.length;
        0.5 * l * l * state.angular_velocity * state.angular_velocity
            - self.gravity * l * state.angle.cos()
    }
}

/// Elliptic modulus `k = sin(θ0/2)` for a swing of amplitude θ0.
fn modulus(amplitude: f64) -> Result<f64> {
    if !amplitude.is_finite() || amplitude.abs() >= PI {
        return Err(PendulumError::InvalidParameter {
            name: "amplitude",
            value: amplitude,
            reason: "must lie strictly between -pi and pi",
        });
    }
    Ok((0.5 * amplitude).sin())
}
