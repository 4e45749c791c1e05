//! End-to-end integration tests for the pendulum-sim CLI.
//!
//! These tests run the real binary and check what lands on stdout, stderr
//! and disk: trajectory formats, configuration layering, and failures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Get a Command for the pendulum-sim binary with a clean environment.
#[allow(deprecated)]
fn sim_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pendulum-sim").unwrap();
    cmd.env_remove("PENDULUM_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    write!(temp, "{contents}").unwrap();
    temp.flush().unwrap();
    temp
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

// =============================================================================
// Double pendulum
// =============================================================================

mod double {
    use super::*;

    #[test]
    fn test_default_run_is_fifteen_seconds() {
        let text = stdout_of(sim_cmd().arg("double"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "index,time,theta1,theta2,theta1_dot,theta2_dot,x1,y1,x2,y2,energy"
        );
        // Header, initial state, 450 frames.
        assert_eq!(lines.len(), 452);
        assert!(lines[1].starts_with("0,0,1.5707963267948966,2.5707963267948966,0,0,"));
        assert!(lines[451].starts_with("450,15,"));
    }

    #[test]
    fn test_first_step_matches_hand_calculation() {
        let text = stdout_of(sim_cmd().args(["double", "--duration", "0.1"]));
        let fields: Vec<f64> = text
            .lines()
            .nth(2)
            .unwrap()
            .split(',')
            .map(|f| f.parse().unwrap())
            .collect();
        let theta1 = std::f64::consts::FRAC_PI_2 - 1.0 / 900.0;
        assert!((fields[2] - theta1).abs() < 1e-9);
        assert!((fields[4] + 1.0 / 30.0).abs() < 1e-9);
        assert!(fields[5].abs() < 1e-9);
    }

    #[test]
    fn test_jsonl_output() {
        let text = stdout_of(sim_cmd().args(["double", "-d", "1", "--format", "jsonl"]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 31);
        assert!(lines[0].starts_with('{'));
        assert!(lines[30].contains("\"index\":30"));
        assert!(lines[30].contains("\"bobs\""));
    }

    #[test]
    fn test_output_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.csv");
        sim_cmd()
            .args(["double", "-d", "1", "--output"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 32);
    }

    #[test]
    fn test_scale_and_flags_reach_positions() {
        let text = stdout_of(sim_cmd().args([
            "double", "-d", "0.1", "--theta1", "0", "--theta2", "0", "--scale", "2.5",
        ]));
        // At rest straight down: x = 0, y1 = -2.5, y2 = -5.
        let first = text.lines().nth(1).unwrap();
        assert!(first.contains(",0,-2.5,0,-5,"), "{first}");
    }

    #[test]
    fn test_degenerate_configuration_fails_after_initial_row() {
        sim_cmd()
            .args([
                "double", "--mass1", "1e-7", "--theta1", "0.3", "--theta2", "0.3",
            ])
            .assert()
            .failure()
            .stdout(predicate::str::starts_with("index,time"))
            .stderr(predicate::str::contains("degenerate configuration"));
    }
}

// =============================================================================
// Simple pendulum and periods
// =============================================================================

mod simple {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let text = stdout_of(sim_cmd().args(["simple", "--amplitude", "1.0", "-d", "2"]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "index,time,angle,angular_velocity,small_angle,exact,x,y");
        assert_eq!(lines.len(), 62);
        assert!(lines[1].starts_with("0,0,1,0,"));
    }

    #[test]
    fn test_simple_rejects_full_turn() {
        sim_cmd()
            .args(["simple", "--amplitude", "3.5"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("amplitude"));
    }

    #[test]
    fn test_period_at_quarter_turn() {
        sim_cmd()
            .args(["period", "--amplitude", "1.5707963267948966"])
            .assert()
            .success()
            .stdout(predicate::str::contains("small-angle period: 6.2832 s"))
            .stdout(predicate::str::contains("exact period: 7.4163 s"));
    }

    #[test]
    fn test_period_scales_with_length() {
        sim_cmd()
            .args(["period", "-a", "0.001", "-l", "4"])
            .assert()
            .success()
            .stdout(predicate::str::contains("exact period: 12.5664 s"));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_config_prints_defaults() {
        sim_cmd()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("[double]"))
            .stdout(predicate::str::contains("fps = 30"))
            .stdout(predicate::str::contains("[double.params]"))
            .stdout(predicate::str::contains("[simple]"));
    }

    #[test]
    fn test_file_values_are_used() {
        let file = config_file("[double]\nfps = 10\nduration = 2.0\n");
        let text = stdout_of(sim_cmd().arg("--config").arg(file.path()).arg("double"));
        assert_eq!(text.lines().count(), 22);
    }

    #[test]
    fn test_partial_initial_table_keeps_release_angle() {
        let file = config_file("[double.initial]\ntheta1 = 0.0\n");
        let text = stdout_of(
            sim_cmd()
                .arg("--config")
                .arg(file.path())
                .args(["double", "-d", "0.1"]),
        );
        let first = text.lines().nth(1).unwrap();
        assert!(first.starts_with("0,0,0,2.5707963267948966,0,0,"), "{first}");
    }

    #[test]
    fn test_env_points_at_file() {
        let file = config_file("[double.params]\ngravity = 9.81\n");
        sim_cmd()
            .env("PENDULUM_CONFIG", file.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("gravity = 9.81"));
    }

    #[test]
    fn test_flags_beat_file() {
        let file = config_file("[double]\nfps = 10\nduration = 2.0\n");
        let text = stdout_of(
            sim_cmd()
                .arg("--config")
                .arg(file.path())
                .args(["double", "--fps", "20"]),
        );
        assert_eq!(text.lines().count(), 42);
    }

    #[test]
    fn test_missing_config_file() {
        sim_cmd()
            .args(["--config", "/nonexistent/pendulum.toml", "config"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Config file not found"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = config_file("[double]\nframes = 10\n");
        sim_cmd()
            .arg("--config")
            .arg(file.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn test_invalid_value_rejected() {
        sim_cmd()
            .args(["double", "--length1=-1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("length1"));
    }

    #[test]
    fn test_zero_fps_rejected() {
        sim_cmd()
            .args(["double", "--fps", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Frame rate"));
    }
}

// =============================================================================
// Help and Version
// =============================================================================

mod help_version {
    use super::*;

    #[test]
    fn test_help_flag() {
        sim_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("double"))
            .stdout(predicate::str::contains("period"));
    }

    #[test]
    fn test_version_flag() {
        sim_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("pendulum-sim"));
    }

    #[test]
    fn test_no_args_is_an_error() {
        sim_cmd().assert().failure();
    }

    #[test]
    fn test_verbose_logs_to_stderr() {
        sim_cmd()
            .args(["-vv", "double", "-d", "0.1"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("index,time"))
            .stderr(predicate::str::contains("running double pendulum"));
    }
}
