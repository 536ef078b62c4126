//! End-to-end tests running the `dt` binary against activity logs.
//!
//! Tests the full pipeline: log file → decode → track → report.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const SAMPLE_LOG: &str = "\
2024-01-01 08:00:00.0000 Started
2024-01-01 08:00:05.0000 Idle timer
2024-01-01 08:30:00.0000 Application activated com.apple.Terminal
2024-01-01 09:30:00.0000 Application activated com.apple.Safari
2024-01-01 10:00:00.0000 Idle
2024-01-01 10:20:00.0000 Not idle @ 2024-01-01 10:10:00.0000
2024-01-01 11:00:00.0000 Application activated com.apple.loginwindow
2024-01-01 11:20:00.0000 Screen sleep
2024-01-01 23:50:00.0000 Screen wake up
2024-01-02 00:10:00.0000 Application activated com.apple.Terminal
2024-01-02 00:13:00.0000 Sleep
";

fn dt_binary() -> String {
    env!("CARGO_BIN_EXE_dt").to_string()
}

/// Builds a `dt` command isolated from the user's config.
fn dt(home: &Path) -> Command {
    let mut cmd = Command::new(dt_binary());
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("DT_LOCK_SCREEN_APP")
        .env_remove("DT_VISIBILITY_THRESHOLD_SECS")
        .env_remove("RUST_LOG");
    cmd
}

fn write_log(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("activity.log");
    std::fs::write(&path, contents).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_report_from_file() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), SAMPLE_LOG);

    let output = dt(temp.path()).arg("report").arg(&log).output().unwrap();
    assert!(
        output.status.success(),
        "report should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text = stdout(&output);
    let first_day = text.find("2024-01-01:").expect("first day header");
    let second_day = text.find("2024-01-02:").expect("second day header");
    assert!(first_day < second_day, "days must be in ascending order");

    // Screen asleep from 11:20 until 23:50.
    assert!(text.contains(&format!("{:>40} 12h 30m", "**SLEEPING**")), "{text}");
    assert!(text.contains(&format!("{:>40} 20m 0s", "**LOCKED**")), "{text}");
    assert!(text.contains(&format!("{:>40} 1h 0m", "com.apple.Terminal")), "{text}");
    // 10:00 until the backdated NotIdle at 10:10, plus 23:50 to midnight.
    assert!(text.contains(&format!("{:>40} 20m 0s", "**IDLE**")), "{text}");
    assert!(text[second_day..].contains(&format!("{:>40} 10m 0s", "**IDLE**")), "{text}");
    // Three minutes of Terminal after midnight is under the threshold.
    assert!(!text[second_day..].contains("com.apple.Terminal"), "{text}");
}

#[test]
fn test_report_json_from_stdin() {
    let temp = TempDir::new().unwrap();

    let mut child = dt(temp.path())
        .args(["report", "--json", "--threshold-minutes", "0"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(SAMPLE_LOG.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["threshold_ms"], 0);

    let days = report["days"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2024-01-01");
    assert_eq!(days[1]["date"], "2024-01-02");

    // Clock runs from the first app activation to the final Sleep.
    let total_ms: i64 = days
        .iter()
        .map(|d| d["total_ms"].as_i64().unwrap())
        .sum();
    assert_eq!(total_ms, (15 * 60 + 43) * 60 * 1000);

    let second_entries = days[1]["entries"].as_array().unwrap();
    assert_eq!(second_entries[0]["label"], "**IDLE**");
    assert_eq!(second_entries[1]["label"], "com.apple.Terminal");
    assert_eq!(second_entries[1]["duration_ms"], 3 * 60 * 1000);
}

#[test]
fn test_config_file_changes_lock_screen_app() {
    let temp = TempDir::new().unwrap();
    let log = write_log(
        temp.path(),
        "\
2024-01-01 09:00:00.0 Application activated org.example.locker
2024-01-01 09:30:00.0 Application activated com.apple.Mail
2024-01-01 09:40:00.0 Idle
",
    );
    let config = temp.path().join("dt.toml");
    std::fs::write(&config, "lock_screen_app = \"org.example.locker\"\n").unwrap();

    let output = dt(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("report")
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains(&format!("{:>40} 30m 0s", "**LOCKED**")), "{text}");
    assert!(!text.contains("org.example.locker"), "{text}");
}

#[test]
fn test_env_overrides_threshold() {
    let temp = TempDir::new().unwrap();
    let log = write_log(
        temp.path(),
        "\
2024-01-01 09:00:00.0 Application activated com.apple.Mail
2024-01-01 09:02:00.0 Idle
",
    );

    let output = dt(temp.path())
        .env("DT_VISIBILITY_THRESHOLD_SECS", "60")
        .arg("report")
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("com.apple.Mail"));
}

#[test]
fn test_malformed_line_fails_with_line_number() {
    let temp = TempDir::new().unwrap();
    let log = write_log(
        temp.path(),
        "\
2024-01-01 09:00:00.0 Application activated com.apple.Mail
2024-01-01 09:02:00.0 Lid closed
2024-01-01 09:40:00.0 Idle
",
    );

    let output = dt(temp.path()).arg("report").arg(&log).output().unwrap();
    assert!(!output.status.success(), "malformed log must fail");
    assert!(output.stdout.is_empty(), "no partial report");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "{stderr}");
    assert!(stderr.contains("Lid closed"), "{stderr}");
}

#[test]
fn test_blank_line_fails_with_line_number() {
    let temp = TempDir::new().unwrap();
    let log = write_log(
        temp.path(),
        "\
2024-01-01 09:00:00.0 Application activated com.apple.Mail

2024-01-01 09:40:00.0 Idle
",
    );

    let output = dt(temp.path()).arg("events").arg(&log).output().unwrap();
    assert!(!output.status.success(), "blank line must fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "{stderr}");
}

#[test]
fn test_events_outputs_jsonl() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), SAMPLE_LOG);

    let output = dt(temp.path()).arg("events").arg(&log).output().unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    // Idle timer lines are dropped.
    assert_eq!(text.lines().count(), SAMPLE_LOG.lines().count() - 1);

    let not_idle: serde_json::Value = text
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .find(|event| event["kind"]["type"] == "not_idle")
        .unwrap();
    assert_eq!(not_idle["timestamp"], "2024-01-01T10:10:00");
}
