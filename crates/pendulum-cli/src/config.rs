//! Runtime configuration for `pendulum-sim`.
//!
//! [`Config`] is the single source of truth for every run, independent of
//! where a value came from. Values are layered in a fixed order:
//!
//! 1. built-in defaults ([`Config::default`]),
//! 2. a TOML file ([`Config::load`]),
//! 3. command-line flags ([`Config::apply_double`], [`Config::apply_simple`],
//!    [`Config::apply_period`]).
//!
//! # Examples
//!
//! ```rust
//! use pendulum_cli::config::Config;
//!
//! let config: Config = toml::from_str(
//!     r#"
//!     [double]
//!     fps = 60
//!
//!     [double.params]
//!     gravity = 9.81
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.double.fps, 60);
//! assert_eq!(config.double.params.gravity, 9.81);
//! // Untouched values keep their defaults.
//! assert_eq!(config.double.params.mass1, 1.0);
//! ```

use std::f64::consts::FRAC_PI_8;
use std::fs;
use std::path::{Path, PathBuf};

use pendulum::{
    fps, DoublePendulum, PendulumError, PendulumParams, PendulumState, Point, SimplePendulum,
    DEFAULT_DURATION, DEFAULT_FPS,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::cli::{DoubleArgs, OutputFormat, PeriodArgs, RunArgs, SimpleArgs};

/// Duration of one traced swing in the simple pendulum graphs.
pub const DEFAULT_SIMPLE_DURATION: f64 = 4.0;

/// Complete configuration for every subcommand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // ========================================================================
    // Double pendulum
    // ========================================================================
    /// Double pendulum run.
    pub double: DoubleConfig,

    // ========================================================================
    // Simple pendulum
    // ========================================================================
    /// Simple pendulum run and period queries.
    pub simple: SimpleConfig,

    // ========================================================================
    // Output
    // ========================================================================
    /// Where and how trajectories are written.
    pub output: OutputConfig,
}

/// Settings for the `double` subcommand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoubleConfig {
    /// Steps per simulated second.
    pub fps: u32,
    /// Simulated seconds.
    pub duration: f64,
    /// Display units per length unit.
    pub scale: f64,
    /// Starting angles and velocities. Fields left out of the table keep
    /// their [`PendulumState::released`] values.
    #[serde(deserialize_with = "overlay_released")]
    pub initial: PendulumState,
    /// Physical constants.
    pub params: PendulumParams,
    /// Position of the fixed pivot.
    pub pivot: Point,
}

impl Default for DoubleConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            duration: DEFAULT_DURATION,
            scale: 1.0,
            initial: PendulumState::released(),
            params: PendulumParams::default(),
            pivot: Point::origin(),
        }
    }
}

impl DoubleConfig {
    /// Builds the integrator described by this section.
    ///
    /// # Errors
    ///
    /// Returns the library error for a zero frame rate or invalid constants.
    pub fn pendulum(&self) -> Result<DoublePendulum, PendulumError> {
        Ok(DoublePendulum::new(fps(self.fps), self.params)?
            .with_pivot(self.pivot)
            .with_scale(self.scale)?)
    }
}

/// Settings for the `simple` and `period` subcommands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimpleConfig {
    /// Steps per simulated second.
    pub fps: u32,
    /// Simulated seconds.
    pub duration: f64,
    /// Release angle in radians.
    pub amplitude: f64,
    /// Gravitational acceleration.
    pub gravity: f64,
    /// Arm length.
    pub length: f64,
    /// Display units per length unit.
    pub scale: f64,
    /// Position of the fixed pivot.
    pub pivot: Point,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            duration: DEFAULT_SIMPLE_DURATION,
            amplitude: FRAC_PI_8,
            gravity: 1.0,
            length: 1.0,
            scale: 1.0,
            pivot: Point::origin(),
        }
    }
}

impl SimpleConfig {
    /// Builds the pendulum described by this section.
    ///
    /// # Errors
    ///
    /// Returns the library error for a zero frame rate or invalid constants.
    pub fn pendulum(&self) -> Result<SimplePendulum, PendulumError> {
        Ok(SimplePendulum::new(fps(self.fps), self.gravity, self.length)?
            .with_pivot(self.pivot)
            .with_scale(self.scale)?)
    }
}

/// Output settings shared by the simulation subcommands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Row format.
    pub format: OutputFormat,
    /// Destination file; stdout when absent.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Reads a TOML file on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] for a missing file,
    /// [`ConfigError::Read`] for other I/O failures and
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let config = Self::from_toml(&text).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Parses TOML text on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid config.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse {
            path: None,
            message: err.message().to_string(),
        })
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Serialize(err.to_string()))
    }

    /// Overrides the double pendulum section with any flags that were set.
    pub fn apply_double(&mut self, args: &DoubleArgs) {
        let double = &mut self.double;
        apply_run(
            &args.run,
            &mut double.fps,
            &mut double.duration,
            &mut double.params.gravity,
            &mut double.scale,
            &mut self.output,
        );
        set(&mut double.initial.theta1, args.theta1);
        set(&mut double.initial.theta2, args.theta2);
        set(&mut double.initial.theta1_dot, args.omega1);
        set(&mut double.initial.theta2_dot, args.omega2);
        set(&mut double.params.mass1, args.mass1);
        set(&mut double.params.mass2, args.mass2);
        set(&mut double.params.length1, args.length1);
        set(&mut double.params.length2, args.length2);
    }

    /// Overrides the simple pendulum section with any flags that were set.
    pub fn apply_simple(&mut self, args: &SimpleArgs) {
        let simple = &mut self.simple;
        apply_run(
            &args.run,
            &mut simple.fps,
            &mut simple.duration,
            &mut simple.gravity,
            &mut simple.scale,
            &mut self.output,
        );
        set(&mut simple.amplitude, args.amplitude);
        set(&mut simple.length, args.length);
    }

    /// Overrides the simple pendulum constants used by `period`.
    pub fn apply_period(&mut self, args: &PeriodArgs) {
        set(&mut self.simple.amplitude, args.amplitude);
        set(&mut self.simple.gravity, args.gravity);
        set(&mut self.simple.length, args.length);
    }

    /// Validate the configuration.
    ///
    /// Checks both sections so that `config` reports problems even for the
    /// subcommand that is not being run.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (section, rate) in [("double", self.double.fps), ("simple", self.simple.fps)] {
            if rate == 0 {
                return Err(ConfigError::ZeroFrameRate(section));
            }
        }
        for (section, duration) in [
            ("double", self.double.duration),
            ("simple", self.simple.duration),
        ] {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(ConfigError::InvalidDuration { section, duration });
            }
        }
        if !self.double.initial.is_finite() {
            return Err(PendulumError::NonFiniteState(format!("{:?}", self.double.initial)).into());
        }
        self.double.pendulum()?;

        let simple = self.simple.pendulum()?;
        simple.period(self.simple.amplitude)?;
        Ok(())
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let d = &self.double;
        let s = &self.simple;
        let mut lines = Vec::new();

        lines.push(format!(
            "Double: {} frames at {} fps",
            frame_budget(d.duration, d.fps),
            d.fps
        ));
        lines.push(format!(
            "  start: theta1={:.4} theta2={:.4} omega1={:.4} omega2={:.4}",
            d.initial.theta1, d.initial.theta2, d.initial.theta1_dot, d.initial.theta2_dot
        ));
        lines.push(format!(
            "  g={} m1={} m2={} r1={} r2={}",
            d.params.gravity, d.params.mass1, d.params.mass2, d.params.length1, d.params.length2
        ));
        lines.push(format!(
            "Simple: amplitude={:.4} g={} l={} for {}s",
            s.amplitude, s.gravity, s.length, s.duration
        ));
        lines.push(format!("Format: {:?}", self.output.format));
        if let Some(ref path) = self.output.path {
            lines.push(format!("Output: {}", path.display()));
        }

        lines.join("\n")
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn frame_budget(duration: f64, rate: u32) -> u64 {
    (duration * f64::from(rate)).round() as u64
}

fn apply_run(
    args: &RunArgs,
    rate: &mut u32,
    duration: &mut f64,
    gravity: &mut f64,
    scale: &mut f64,
    output: &mut OutputConfig,
) {
    set(rate, args.fps);
    set(duration, args.duration);
    set(gravity, args.gravity);
    set(scale, args.scale);
    set(&mut output.format, args.format);
    if let Some(ref path) = args.output {
        output.path = Some(path.clone());
    }
}

fn location(path: Option<&Path>) -> String {
    path.map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// A `[double.initial]` table as written, before it is laid over the release pose.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialState {
    theta1: Option<f64>,
    theta2: Option<f64>,
    theta1_dot: Option<f64>,
    theta2_dot: Option<f64>,
}

fn overlay_released<'de, D>(deserializer: D) -> Result<PendulumState, D::Error>
where
    D: Deserializer<'de>,
{
    let partial = PartialState::deserialize(deserializer)?;
    let mut state = PendulumState::released();
    set(&mut state.theta1, partial.theta1);
    set(&mut state.theta2, partial.theta2);
    set(&mut state.theta1_dot, partial.theta1_dot);
    set(&mut state.theta2_dot, partial.theta2_dot);
    Ok(state)
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Config file could not be read.
    #[error("Failed to read {path}: {message}")]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        message: String,
    },

    /// Config text is not valid TOML for [`Config`].
    #[error("Invalid configuration{}: {message}", location(.path.as_deref()))]
    Parse {
        /// File the text came from, if any.
        path: Option<PathBuf>,
        /// Parser message.
        message: String,
    },

    /// Config could not be rendered as TOML.
    #[error("Failed to render configuration: {0}")]
    Serialize(String),

    /// A section asks for zero frames per second.
    #[error("Frame rate for [{0}] must be at least 1")]
    ZeroFrameRate(&'static str),

    /// A section asks for a non-positive or non-finite duration.
    #[error("Duration for [{section}] must be positive and finite, got {duration}")]
    InvalidDuration {
        /// Offending section.
        section: &'static str,
        /// Offending value.
        duration: f64,
    },

    /// The physics rejected a value.
    #[error(transparent)]
    Invalid(#[from] PendulumError),
}
