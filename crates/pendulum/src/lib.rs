#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

//! # Pendulum
//!
//! Fixed-step pendulum dynamics for animation and teaching.
//!
//! Pendulum provides:
//! - **DoublePendulum**: the two-arm equations of motion, advanced with a
//!   semi-implicit Euler step, plus Cartesian bob placement
//! - **SimplePendulum**: the numerically integrated single arm, its
//!   small-angle harmonic solution and its exact elliptic-function solution
//! - **Simulation**: a fixed-cadence frame driver that threads state between
//!   steps and hands bob positions to a [`BobSink`]
//!
//! ## Double Pendulum Example
//!
//! ```rust
//! use pendulum::{fps, DoublePendulum, PendulumParams, PendulumState};
//!
//! let pendulum = DoublePendulum::new(fps(30), PendulumParams::default()).unwrap();
//! let mut state = PendulumState::released();
//!
//! // 15 seconds at 30 FPS
//! for _ in 0..450 {
//!     let bobs = pendulum.update(&mut state).unwrap();
//!     assert!(bobs.lower.x.is_finite());
//! }
//! ```
//!
//! ## Simple Pendulum Example
//!
//! ```rust
//! use pendulum::{fps, SimplePendulum};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let pendulum = SimplePendulum::new(fps(30), 1.0, 1.0).unwrap();
//!
//! // A large swing takes longer than the small-angle estimate
//! let exact = pendulum.period(FRAC_PI_2).unwrap();
//! assert!(exact > pendulum.small_angle_period());
//! ```
//!
//! ## Conventions
//!
//! Angles are measured from the downward vertical, counter-clockwise
//! positive, and are never wrapped. Y increases upward, so a bob hanging at
//! rest sits at negative y below its pivot.

mod double;
pub mod elliptic;
mod energy;
mod error;
mod geometry;
mod params;
mod simple;
mod simulation;
mod state;

pub use double::{fps, Accelerations, BobPositions, DoublePendulum, EquationTerms, DEGENERACY_TOLERANCE};
pub use energy::{kinetic_energy, potential_energy, total_energy, Energy};
pub use error::{PendulumError, Result};
pub use geometry::{Point, Vector, DOWN};
pub use params::PendulumParams;
pub use simple::{HarmonicMotion, SimplePendulum, SimplePendulumState};
pub use simulation::{BobSink, Frame, Recorder, Simulation, DEFAULT_DURATION, DEFAULT_FPS};
pub use state::PendulumState;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::double::{fps, BobPositions, DoublePendulum};
    pub use crate::error::PendulumError;
    pub use crate::geometry::{Point, Vector, DOWN};
    pub use crate::params::PendulumParams;
    pub use crate::simple::{HarmonicMotion, SimplePendulum, SimplePendulumState};
    pub use crate::simulation::{BobSink, Frame, Simulation};
    pub use crate::state::PendulumState;
}
