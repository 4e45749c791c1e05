#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Pendulum CLI
//!
//! Headless front end for the [`pendulum`] crate. Every run writes one row
//! per frame, so an external renderer or plotting script can replay the
//! motion.
//!
//! - `double`: the double pendulum, as CSV or JSON Lines
//! - `simple`: the simple pendulum beside its small-angle and exact solutions
//! - `period`: small-angle and exact periods for an amplitude
//! - `config`: the effective configuration as TOML
//!
//! ## Quick start (library)
//!
//! ```rust
//! use pendulum_cli::{config::Config, output::TrajectoryWriter, run::run_double};
//! use pendulum_cli::cli::OutputFormat;
//!
//! let mut config = Config::default();
//! config.double.duration = 1.0;
//!
//! let mut writer = TrajectoryWriter::new(Vec::new(), OutputFormat::Csv);
//! let summary = run_double(&config.double, &mut writer).unwrap();
//! assert_eq!(summary.rows, 31);
//! ```
//!
//! ## CLI usage
//!
//! ```bash
//! pendulum-sim double --duration 5 --output run.csv
//! pendulum-sim --config pendulum.toml simple --format jsonl
//! PENDULUM_CONFIG=pendulum.toml pendulum-sim config
//! ```

pub mod cli;
pub mod config;
pub mod output;
pub mod run;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins over the `-v` count when it is set. Calling this twice is
/// harmless; the second subscriber is ignored.
pub fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Opens the trajectory destination: `path` if given, stdout otherwise.
///
/// # Errors
///
/// Returns the error from creating the file.
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cli::{Cli, Command, OutputFormat};
    pub use crate::config::{Config, ConfigError};
    pub use crate::output::{Row, SimpleRow, TrajectoryWriter};
    pub use crate::run::{run_double, run_simple, Periods, RunError, RunSummary};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_output_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        {
            let mut out = open_output(Some(&path)).unwrap();
            writeln!(out, "hello").unwrap();
            out.flush().unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn open_output_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("run.csv");
        assert!(open_output(Some(&path)).is_err());
    }

    #[test]
    fn init_logging_twice_is_harmless() {
        init_logging(LogLevel::Warn);
        init_logging(LogLevel::Debug);
    }
}
