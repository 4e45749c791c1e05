//! Fixed-cadence frame driver for the double pendulum.
//!
//! A [`Simulation`] owns the angular state and advances it once per frame.
//! Rendering is left to a host adapter implementing [`BobSink`], which only
//! ever sees finished [`Frame`]s.
//!
//! # Example
//!
//! ```rust
//! use pendulum::{fps, DoublePendulum, PendulumParams, PendulumState, Recorder, Simulation};
//!
//! let pendulum = DoublePendulum::new(fps(30), PendulumParams::default()).unwrap();
//! let mut sim = Simulation::for_duration(pendulum, PendulumState::released(), 15.0).unwrap();
//!
//! let mut recorder = Recorder::default();
//! let written = sim.drive(&mut recorder).unwrap();
//! assert_eq!(written, 450);
//! assert!(sim.halted().is_none());
//! ```

use core::convert::Infallible;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::double::{BobPositions, DoublePendulum};
use crate::energy::total_energy;
use crate::error::{PendulumError, Result};
use crate::state::PendulumState;

/// Default frame rate; one step per frame.
pub const DEFAULT_FPS: u32 = 30;

/// Default run length in seconds.
pub const DEFAULT_DURATION: f64 = 15.0;

/// One simulated frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Number of steps taken; 0 for the initial state.
    pub index: u64,
    /// Simulated time, `index * dt`.
    pub time: f64,
    /// Angular state after the step.
    pub state: PendulumState,
    /// Bob positions for `state`.
    pub bobs: BobPositions,
    /// Total mechanical energy of `state`.
    pub energy: f64,
}

/// Receives frames from a running simulation.
///
/// This is the seam between the physics and whatever draws it.
pub trait BobSink {
    /// Error raised when a frame cannot be applied.
    type Error;

    /// Applies one frame.
    ///
    /// # Errors
    ///
    /// Implementation defined; an error stops [`Simulation::drive`].
    fn place(&mut self, frame: &Frame) -> core::result::Result<(), Self::Error>;
}

/// A sink that keeps every frame in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recorder {
    /// Frames in arrival order.
    pub frames: Vec<Frame>,
}

impl BobSink for Recorder {
    type Error = Infallible;

    fn place(&mut self, frame: &Frame) -> core::result::Result<(), Infallible> {
        self.frames.push(*frame);
        Ok(())
    }
}

impl<S: BobSink + ?Sized> BobSink for &mut S {
    type Error = S::Error;

    fn place(&mut self, frame: &Frame) -> core::result::Result<(), Self::Error> {
        (**self).place(frame)
    }
}

/// Drives a [`DoublePendulum`] for a fixed number of frames.
///
/// After a degenerate step the state stays frozen at the last good value,
/// no further frames are produced, and the error is kept in
/// [`halted`](Self::halted).
#[derive(Debug, Clone)]
pub struct Simulation {
    pendulum: DoublePendulum,
    state: PendulumState,
    index: u64,
    frames: u64,
    halted: Option<PendulumError>,
}

impl Simulation {
    /// Creates a simulation that will produce `frames` steps.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::NonFiniteState`] if `initial` is not finite.
    pub fn new(pendulum: DoublePendulum, initial: PendulumState, frames: u64) -> Result<Self> {
        initial.ensure_finite()?;
        Ok(Self {
            pendulum,
            state: initial,
            index: 0,
            frames,
            halted: None,
        })
    }

    /// Creates a simulation covering `duration` seconds at the pendulum's
    /// time step.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for a non-positive or
    /// non-finite duration.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn for_duration(
        pendulum: DoublePendulum,
        initial: PendulumState,
        duration: f64,
    ) -> Result<Self> {
        PendulumError::require_positive("duration", duration)?;
        let frames = (duration / pendulum.delta_time()).round() as u64;
        Self::new(pendulum, initial, frames)
    }

    /// Returns the pendulum being driven.
    #[inline]
    pub const fn pendulum(&self) -> &DoublePendulum {
        &self.pendulum
    }

    /// Returns the current state.
    #[inline]
    pub const fn state(&self) -> &PendulumState {
        &self.state
    }

    /// Number of steps taken so far.
    #[inline]
    pub const fn frame_index(&self) -> u64 {
        self.index
    }

    /// Total number of steps this simulation will take.
    #[inline]
    pub const fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Steps left before the simulation ends.
    #[inline]
    pub fn remaining(&self) -> u64 {
        if self.halted.is_some() {
            0
        } else {
            self.frames - self.index
        }
    }

    /// The error that stopped the simulation early, if any.
    #[inline]
    pub const fn halted(&self) -> Option<&PendulumError> {
        self.halted.as_ref()
    }

    /// Frame for the current state without stepping.
    #[allow(clippy::cast_precision_loss)]
    pub fn current_frame(&self) -> Frame {
        Frame {
            index: self.index,
            time: self.index as f64 * self.pendulum.delta_time(),
            state: self.state,
            bobs: self.pendulum.bob_positions(&self.state),
            energy: total_energy(self.pendulum.params(), &self.state),
        }
    }

    /// Steps once and returns the new frame.
    ///
    /// Returns `None` when the frame budget is spent or the simulation has
    /// halted.
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.remaining() == 0 {
            return None;
        }

        match self.pendulum.update(&mut self.state) {
            Ok(_) => {
                self.index += 1;
                Some(self.current_frame())
            }
            Err(err) => {
                warn!(frame = self.index, %err, "simulation halted");
                self.halted = Some(err);
                None
            }
        }
    }

    /// Runs the remaining frames into `sink`, returning how many were
    /// placed.
    ///
    /// A degenerate step ends the run early without an error; check
    /// [`halted`](Self::halted) afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the sink. The rejected frame
    /// has already been stepped, so [`state`](Self::state) and
    /// [`frame_index`](Self::frame_index) include it and a later call
    /// resumes with the frame after it.
    pub fn drive<S: BobSink>(&mut self, mut sink: S) -> core::result::Result<u64, S::Error> {
        debug!(frames = self.remaining(), "driving simulation");
        let mut placed = 0;
        while let Some(frame) = self.next_frame() {
            sink.place(&frame)?;
            placed += 1;
        }
        info!(
            placed,
            halted = self.halted.is_some(),
            final_energy = total_energy(self.pendulum.params(), &self.state),
            "simulation finished"
        );
        Ok(placed)
    }
}

impl Iterator for Simulation {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.next_frame()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.remaining()).ok())
    }
}
