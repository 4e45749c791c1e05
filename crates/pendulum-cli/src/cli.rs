//! Command-line interface for `pendulum-sim`.
//!
//! Every physical flag is optional: an unset flag leaves the value from the
//! configuration file (or the built-in default) in place.
//!
//! # Examples
//!
//! ```bash
//! # The animation's double pendulum: 15 s at 30 FPS, CSV on stdout
//! pendulum-sim double
//!
//! # Earth gravity, JSON Lines into a file
//! pendulum-sim double --gravity 9.81 --format jsonl --output run.jsonl
//!
//! # Simple pendulum: numeric, small-angle and exact angles side by side
//! pendulum-sim simple --amplitude 1.2
//!
//! # Periods for a large swing
//! pendulum-sim period --amplitude 2.0
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Pendulum simulator - headless simple and double pendulum trajectories.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pendulum-sim",
    author,
    version,
    about = "Simulate simple and double pendulums and export their trajectories",
    long_about = "Runs fixed-step pendulum simulations and writes one row per frame \
                  as CSV or JSON Lines, ready to drive an external renderer."
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short = 'c', global = true, env = "PENDULUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the double pendulum and write one row per frame
    Double(DoubleArgs),

    /// Run the simple pendulum next to its small-angle and exact solutions
    Simple(SimpleArgs),

    /// Print small-angle and exact periods of a simple pendulum
    Period(PeriodArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Flags shared by the simulation subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Frames per second (time step is 1/fps)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Simulated duration in seconds
    #[arg(long, short = 'd')]
    pub duration: Option<f64>,

    /// Gravitational acceleration
    #[arg(long, short = 'g')]
    pub gravity: Option<f64>,

    /// Display units per length unit in the reported positions
    #[arg(long)]
    pub scale: Option<f64>,

    /// Output format
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Arguments for the `double` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct DoubleArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Initial angle of the upper arm (radians)
    #[arg(long, allow_negative_numbers = true)]
    pub theta1: Option<f64>,

    /// Initial angle of the lower arm (radians)
    #[arg(long, allow_negative_numbers = true)]
    pub theta2: Option<f64>,

    /// Initial angular velocity of the upper arm
    #[arg(long, allow_negative_numbers = true)]
    pub omega1: Option<f64>,

    /// Initial angular velocity of the lower arm
    #[arg(long, allow_negative_numbers = true)]
    pub omega2: Option<f64>,

    /// Mass of the upper bob
    #[arg(long)]
    pub mass1: Option<f64>,

    /// Mass of the lower bob
    #[arg(long)]
    pub mass2: Option<f64>,

    /// Length of the upper arm
    #[arg(long)]
    pub length1: Option<f64>,

    /// Length of the lower arm
    #[arg(long)]
    pub length2: Option<f64>,
}

/// Arguments for the `simple` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SimpleArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Release angle (radians), strictly between -pi and pi
    #[arg(long, short = 'a', allow_negative_numbers = true)]
    pub amplitude: Option<f64>,

    /// Arm length
    #[arg(long, short = 'l')]
    pub length: Option<f64>,
}

/// Arguments for the `period` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Release angle (radians), strictly between -pi and pi
    #[arg(long, short = 'a', allow_negative_numbers = true)]
    pub amplitude: Option<f64>,

    /// Gravitational acceleration
    #[arg(long, short = 'g')]
    pub gravity: Option<f64>,

    /// Arm length
    #[arg(long, short = 'l')]
    pub length: Option<f64>,
}

/// Trajectory output formats.
#[derive(ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// One JSON object per line
    Jsonl,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
