#![forbid(unsafe_code)]

//! # pendulum-sim
//!
//! Headless pendulum simulator.
//!
//! ## Usage
//!
//! ```bash
//! pendulum-sim double                      # 15 s of the double pendulum as CSV
//! pendulum-sim simple --amplitude 1.2      # simple pendulum vs. its solutions
//! pendulum-sim period --amplitude 2        # small-angle and exact periods
//! pendulum-sim --config run.toml config    # effective configuration
//! ```

use std::io::{self, Write};

use anyhow::{Context, bail};
use pendulum_cli::cli::{Cli, Command};
use pendulum_cli::config::Config;
use pendulum_cli::output::TrajectoryWriter;
use pendulum_cli::run::{Periods, run_double, run_simple};
use pendulum_cli::{init_logging, open_output};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.log_level());

    let mut config = Config::resolve(cli.config.as_deref())?;
    match &cli.command {
        Command::Double(args) => config.apply_double(args),
        Command::Simple(args) => config.apply_simple(args),
        Command::Period(args) => config.apply_period(args),
        Command::Config => {}
    }
    config.validate().context("invalid configuration")?;
    info!("{}", config.to_diagnostic_string());

    match cli.command {
        Command::Double(_) => {
            let out = open_output(config.output.path.as_deref())
                .context("failed to open output")?;
            let mut writer = TrajectoryWriter::new(out, config.output.format);
            let summary = run_double(&config.double, &mut writer)?;
            writer.finish().context("failed to flush output")?;
            info!(rows = summary.rows, energy = summary.final_energy, "done");
            if let Some(err) = summary.halted {
                bail!("simulation stopped after {} rows: {err}", summary.rows);
            }
        }
        Command::Simple(_) => {
            let out = open_output(config.output.path.as_deref())
                .context("failed to open output")?;
            let mut writer = TrajectoryWriter::new(out, config.output.format);
            let rows = run_simple(&config.simple, &mut writer)?;
            writer.finish().context("failed to flush output")?;
            info!(rows, "done");
        }
        Command::Period(_) => {
            let mut out = io::stdout().lock();
            Periods::of(&config.simple)?.report(&mut out)?;
        }
        Command::Config => {
            let mut out = io::stdout().lock();
            write!(out, "{}", config.to_toml()?)?;
        }
    }

    Ok(())
}
