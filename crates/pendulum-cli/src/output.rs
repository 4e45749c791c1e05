//! Trajectory writers.
//!
//! [`TrajectoryWriter`] turns rows into CSV (with a header) or JSON Lines.
//! For the double pendulum it doubles as the [`BobSink`] that a
//! [`Simulation`](pendulum::Simulation) drives.

use std::io::{self, Write};

use pendulum::{BobSink, Frame};
use serde::Serialize;

use crate::cli::OutputFormat;

/// A row that can be written as CSV or JSON.
pub trait Row: Serialize {
    /// CSV header line, without the trailing newline.
    const HEADER: &'static str;

    /// Writes the CSV fields for this row, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()>;
}

impl Row for Frame {
    const HEADER: &'static str =
        "index,time,theta1,theta2,theta1_dot,theta2_dot,x1,y1,x2,y2,energy";

    fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let s = &self.state;
        let (upper, lower) = (self.bobs.upper, self.bobs.lower);
        write!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            self.index,
            self.time,
            s.theta1,
            s.theta2,
            s.theta1_dot,
            s.theta2_dot,
            upper.x,
            upper.y,
            lower.x,
            lower.y,
            self.energy
        )
    }
}

/// One frame of the simple pendulum next to its closed-form solutions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimpleRow {
    /// Steps taken.
    pub index: u64,
    /// Simulated time.
    pub time: f64,
    /// Numerically integrated angle.
    pub angle: f64,
    /// Numerically integrated angular velocity.
    pub angular_velocity: f64,
    /// Linearized solution at `time`.
    pub small_angle: f64,
    /// Elliptic-function solution at `time`.
    pub exact: f64,
    /// Bob x for the integrated angle.
    pub x: f64,
    /// Bob y for the integrated angle.
    pub y: f64,
}

impl Row for SimpleRow {
    const HEADER: &'static str = "index,time,angle,angular_velocity,small_angle,exact,x,y";

    fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(
            out,
            "{},{},{},{},{},{},{},{}",
            self.index,
            self.time,
            self.angle,
            self.angular_velocity,
            self.small_angle,
            self.exact,
            self.x,
            self.y
        )
    }
}

/// Writes rows of one kind in the chosen format.
#[derive(Debug)]
pub struct TrajectoryWriter<W: Write> {
    out: W,
    format: OutputFormat,
    header_written: bool,
    rows: u64,
}

impl<W: Write> TrajectoryWriter<W> {
    /// Creates a writer; nothing is written until the first row.
    pub const fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            header_written: false,
            rows: 0,
        }
    }

    /// Rows written so far, excluding the CSV header.
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    /// Writes one row, preceded by the header on the first CSV row.
    ///
    /// # Errors
    ///
    /// Propagates write and serialization failures.
    pub fn write_row<R: Row>(&mut self, row: &R) -> io::Result<()> {
        match self.format {
            OutputFormat::Csv => {
                if !self.header_written {
                    writeln!(self.out, "{}", R::HEADER)?;
                    self.header_written = true;
                }
                row.write_csv(&mut self.out)?;
            }
            OutputFormat::Jsonl => serde_json::to_writer(&mut self.out, row)?,
        }
        writeln!(self.out)?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates flush failures.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> BobSink for TrajectoryWriter<W> {
    type Error = io::Error;

    fn place(&mut self, frame: &Frame) -> io::Result<()> {
        self.write_row(frame)
    }
}
