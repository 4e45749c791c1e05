//! Subcommand bodies, independent of argument parsing and process setup.

use std::io::Write;

use pendulum::{DoublePendulum, PendulumError, SimplePendulum, SimplePendulumState, Simulation};
use tracing::{debug, info, warn};

use crate::config::{DoubleConfig, SimpleConfig};
use crate::output::{SimpleRow, TrajectoryWriter};

/// Error raised while running a subcommand.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The physics rejected the setup or a step.
    #[error(transparent)]
    Pendulum(#[from] PendulumError),

    /// Output could not be written.
    #[error("failed to write trajectory: {0}")]
    Io(#[from] std::io::Error),
}

/// What a finished double pendulum run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Rows written, including the initial state.
    pub rows: u64,
    /// Total energy of the last written state.
    pub final_energy: f64,
    /// Set when a degenerate step ended the run early.
    pub halted: Option<PendulumError>,
}

/// Periods of a simple pendulum at one amplitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Periods {
    /// Release angle.
    pub amplitude: f64,
    /// `2π/ω`.
    pub small_angle: f64,
    /// `4K(k²)/ω`.
    pub exact: f64,
}

impl Periods {
    /// Computes both periods for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for invalid constants or
    /// an amplitude of π or more.
    pub fn of(config: &SimpleConfig) -> Result<Self, PendulumError> {
        let pendulum = config.pendulum()?;
        Ok(Self {
            amplitude: config.amplitude,
            small_angle: pendulum.small_angle_period(),
            exact: pendulum.period(config.amplitude)?,
        })
    }

    /// Writes a short human-readable report.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn report<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "amplitude: {:.4} rad", self.amplitude)?;
        writeln!(out, "small-angle period: {:.4} s", self.small_angle)?;
        writeln!(out, "exact period: {:.4} s", self.exact)?;
        writeln!(out, "ratio: {:.4}", self.exact / self.small_angle)
    }
}

/// Runs the double pendulum and writes the initial state followed by one
/// row per frame.
///
/// A degenerate step is not an error here: the rows before it are kept and
/// the cause is returned in [`RunSummary::halted`].
///
/// # Errors
///
/// Returns [`RunError::Pendulum`] for an invalid setup and [`RunError::Io`]
/// when writing fails.
pub fn run_double<W: Write>(
    config: &DoubleConfig,
    writer: &mut TrajectoryWriter<W>,
) -> Result<RunSummary, RunError> {
    let pendulum: DoublePendulum = config.pendulum()?;
    let mut sim = Simulation::for_duration(pendulum, config.initial, config.duration)?;
    info!(
        frames = sim.frame_count(),
        dt = pendulum.delta_time(),
        "running double pendulum"
    );

    writer.write_row(&sim.current_frame())?;
    sim.drive(&mut *writer)?;

    let summary = RunSummary {
        rows: writer.rows(),
        final_energy: sim.current_frame().energy,
        halted: sim.halted().cloned(),
    };
    if let Some(ref err) = summary.halted {
        warn!(frame = sim.frame_index(), %err, "double pendulum stopped early");
    }
    Ok(summary)
}

/// Runs the simple pendulum and writes the integrated angle next to the
/// small-angle and exact solutions, from the initial state onward.
///
/// # Errors
///
/// Returns [`RunError::Pendulum`] for invalid constants or amplitude and
/// [`RunError::Io`] when writing fails.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn run_simple<W: Write>(
    config: &SimpleConfig,
    writer: &mut TrajectoryWriter<W>,
) -> Result<u64, RunError> {
    let pendulum: SimplePendulum = config.pendulum()?;
    PendulumError::require_positive("duration", config.duration)?;
    let frames = (config.duration / pendulum.delta_time()).round() as u64;
    let amplitude = config.amplitude;

    let mut state = SimplePendulumState::at_rest(amplitude);
    let harmonic = pendulum.small_angle(&state);
    // Validates the amplitude before anything is written.
    let period = pendulum.period(amplitude)?;
    info!(frames, period, "running simple pendulum");

    for index in 0..=frames {
        let time = index as f64 * pendulum.delta_time();
        let bob = pendulum.bob_position(state.angle);
        writer.write_row(&SimpleRow {
            index,
            time,
            angle: state.angle,
            angular_velocity: state.angular_velocity,
            small_angle: harmonic.angle_at(time),
            exact: pendulum.exact_angle(amplitude, time)?,
            x: bob.x,
            y: bob.y,
        })?;
        state = pendulum.step(state);
    }

    debug!(
        energy = pendulum.energy(&state),
        angle = state.angle,
        "simple pendulum finished"
    );
    Ok(writer.rows())
}
