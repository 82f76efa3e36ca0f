//! Integration tests for the ta-signals CLI.
//!
//! Each test runs the built binary against a CSV fixture and checks the
//! written output.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().into_owned()
}

/// Run the CLI with given arguments and return the output.
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ta-signals"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI")
}

/// Run the CLI, require success and capture stdout as string.
fn run_cli_stdout(args: &[&str]) -> String {
    let output = run_cli(args);
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_sma_drops_lookback_rows() {
    let out = run_cli_stdout(&["sma", &fixture("bars.csv")]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "timestamp,sma_20");
    // 60 bars, 19 warm-up rows dropped
    assert_eq!(lines.len(), 1 + 41);
    assert!(lines[1].starts_with("1700001140,"));
}

#[test]
fn test_rsi_values_in_range() {
    let out = run_cli_stdout(&["rsi", &fixture("bars.csv"), "14"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "timestamp,rsi_14");
    assert_eq!(lines.len(), 1 + 47);
    for line in &lines[1..] {
        let value = line.split(',').nth(1).unwrap();
        if !value.is_empty() {
            let v: f64 = value.parse().unwrap();
            assert!((0.0..=100.0).contains(&v));
        }
    }
}

#[test]
fn test_macd_writes_every_row() {
    let out = run_cli_stdout(&["macd", &fixture("bars.csv"), "12,26,9"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "timestamp,macd,signal,histogram");
    assert_eq!(lines.len(), 1 + 60);
}

#[test]
fn test_bollinger_to_file() {
    let output = std::env::temp_dir().join("ta_signals_test_bollinger.csv");
    let result = run_cli(&[
        "bollinger",
        &fixture("bars.csv"),
        "20,2.0",
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(result.status.success());
    assert!(result.stdout.is_empty());

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "timestamp,upper,middle,lower");
    assert_eq!(lines.len(), 1 + 41);
    for line in &lines[1..] {
        let v: Vec<f64> = line.split(',').skip(1).map(|s| s.parse().unwrap()).collect();
        assert!(v[0] >= v[1] && v[1] >= v[2]);
    }
    let _ = fs::remove_file(&output);
}

#[test]
fn test_levels_output() {
    let out = run_cli_stdout(&["levels", &fixture("levels.csv"), "--order", "1"]);
    assert_eq!(
        out,
        "side,level,touches\n\
         support,100,4\n\
         resistance,103,3\n\
         resistance,108,3\n"
    );
}

#[test]
fn test_levels_with_no_qualifying_side() {
    let output = run_cli(&[
        "levels",
        &fixture("levels.csv"),
        "--order",
        "1",
        "--touches",
        "4",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "side,level,touches\nsupport,100,4\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no strong level qualified"));
}

#[test]
fn test_zones_output() {
    let out = run_cli_stdout(&["zones", &fixture("zones.csv"), "--candles", "3"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[0],
        "kind,start_index,end_index,start_timestamp,end_timestamp,low,high"
    );
    assert_eq!(lines[1], "demand,0,3,1700000000,1700000180,99,101");
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_patterns_header() {
    let out = run_cli_stdout(&["patterns", &fixture("bars.csv")]);
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("timestamp,pattern"));
    for line in lines {
        let (ts, label) = line.split_once(',').unwrap();
        assert!(ts.parse::<i64>().is_ok());
        assert!(!label.is_empty());
    }
}

#[test]
fn test_report_is_json() {
    let out = run_cli_stdout(&["report", &fixture("bars.csv")]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["bars"], 60);
    assert_eq!(report["last_timestamp"], 1_700_003_540_i64);
    assert_eq!(report["config"]["ma_window"], 20);
    assert_eq!(report["moving_average"].as_array().unwrap().len(), 60);
    // warm-up NaN serializes as null
    assert!(report["moving_average"][0].is_null());
}

#[test]
fn test_report_reads_config_file() {
    let config = std::env::temp_dir().join("ta_signals_test_config.json");
    fs::write(&config, r#"{"ma_window": 5, "sr_order": 2}"#).unwrap();
    let out = run_cli_stdout(&[
        "report",
        &fixture("bars.csv"),
        "--config",
        config.to_str().unwrap(),
    ]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["config"]["ma_window"], 5);
    assert_eq!(report["config"]["rsi_window"], 14);
    assert!(report["moving_average"][3].is_null());
    assert!(report["moving_average"][4].is_number());
    let _ = fs::remove_file(&config);
}

#[test]
fn test_missing_file_fails() {
    let output = run_cli(&["sma", "/nonexistent/bars.csv"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/bars.csv"));
}

#[test]
fn test_malformed_csv_reports_line() {
    let output = run_cli(&["sma", &fixture("malformed.csv"), "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
}

#[test]
fn test_invalid_macd_params_fail() {
    let output = run_cli(&["macd", &fixture("bars.csv"), "26,12,9"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("short period must be less than long"));
}

#[test]
fn test_window_longer_than_input_fails() {
    let output = run_cli(&["sma", &fixture("zones.csv"), "20"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("insufficient data"));
}

#[test]
fn test_help_flag() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("levels"));
    assert!(stdout.contains("report"));
}
