//! End-to-end CLI tests for linechat.
//!
//! These tests run the actual binary against exports written to a temp
//! directory and check stdout, stderr and the exit status.
//!
//! # Test Categories
//!
//! - **Output formats**: text, CSV, JSON, JSONL
//! - **Filters**: keyword, speaker and date filtering
//! - **Flags**: summary, ids, timestamps, system notices
//! - **Error handling**: bad dates, missing files
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const MOBILE_EXPORT: &str = "[LINE] 測試群組
儲存日期： 2026/01/03 01:14

2022/03/31（四）
上午09:46\tUserA\tHello everyone
上午10:38\tUserB\t\"Lunch plan:
noodles\"
上午11:09\t\tUserB unsent a message

2022/04/01（五）
下午01:15\tUserA\tanyone for LUNCH?
下午02:00\t小明\t好啊
";

const DESKTOP_EXPORT: &str = "[LINE] Desktop Room

2025.02.15 星期六
17:22 UserPC1 測試訊息1
17:23\tUserPC2\thello from tabs
08:26 系統訊息測試
";

/// Writes the fixture exports into a fresh temp directory.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("mobile.txt"), MOBILE_EXPORT).unwrap();
    fs::write(dir.path().join("desktop.txt"), DESKTOP_EXPORT).unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    fs::write(dir.path().join("bom.txt"), format!("\u{FEFF}{MOBILE_EXPORT}")).unwrap();
    dir
}

fn linechat() -> Command {
    Command::cargo_bin("linechat").unwrap()
}

fn fixture(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn test_default_text_output() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[2022-03-31 09:46] UserA: Hello everyone"))
        .stdout(predicate::str::contains("UserB: Lunch plan:\n  noodles"))
        .stdout(predicate::str::contains("* UserB unsent a message"))
        .stdout(predicate::str::contains("[2022-04-01 13:15] UserA: anyone for LUNCH?"));
}

#[test]
fn test_csv_output() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Timestamp;Author;Content;System\n"))
        .stdout(predicate::str::contains("2022-03-31 09:46;UserA;Hello everyone;false"))
        .stdout(predicate::str::contains("2022-03-31 11:09;UserB unsent a message;;true"));
}

#[test]
fn test_json_output() {
    let dir = setup_fixtures();
    let output = linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["author"], "UserA");
    assert_eq!(rows[0]["timestamp"], "2022-03-31T09:46:00");
    assert_eq!(rows[1]["content"], "Lunch plan:\nnoodles");
    assert_eq!(rows[2]["isSystemMessage"], true);
}

#[test]
fn test_jsonl_output() {
    let dir = setup_fixtures();
    let output = linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["--format", "jsonl"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    for line in lines {
        let _: serde_json::Value = serde_json::from_str(line).unwrap();
    }
}

#[test]
fn test_ndjson_alias() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["--format", "ndjson"])
        .assert()
        .success();
}

#[test]
fn test_unknown_format_rejected() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn test_ids_flag() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .arg("--ids")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#1 [2022-03-31 09:46] UserA"));
}

#[test]
fn test_no_timestamps_flag() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .arg("--no-timestamps")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("UserA: Hello everyone\n"));
}

#[test]
fn test_no_system_flag() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .arg("--no-system")
        .assert()
        .success()
        .stdout(predicate::str::contains("unsent").not());
}

#[test]
fn test_summary() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Group:     測試群組"))
        .stdout(predicate::str::contains("Saved:     2026-01-03 01:14"))
        .stdout(predicate::str::contains("Range:     2022-03-31 09:46 .. 2022-04-01 14:00"))
        .stdout(predicate::str::contains("Messages:  5"))
        .stdout(predicate::str::contains("System:    1"))
        .stdout(predicate::str::contains("Speakers:  3"))
        .stdout(predicate::str::contains("  UserA: 2"));
}

#[test]
fn test_summary_of_empty_file() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "empty.txt"))
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Group:     未命名聊天室"))
        .stdout(predicate::str::contains("Saved:     unknown"))
        .stdout(predicate::str::contains("Range:     empty"));
}

#[test]
fn test_summary_of_file_with_byte_order_mark() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "bom.txt"))
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Group:     測試群組"))
        .stdout(predicate::str::contains("Messages:  5"));
}

#[test]
fn test_summary_lists_speakers_in_utf16_order() {
    let dir = setup_fixtures();
    let path = dir.path().join("order.txt");
    fs::write(&path, "2022/03/31（四）\n上午09:00\tｚ\ta\n上午09:01\t😀\tb\n上午09:02\tAlice\tc\n").unwrap();
    linechat()
        .arg(&path)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("  Alice: 1\n  😀: 1\n  ｚ: 1\n"));
}

#[test]
fn test_progress_goes_to_stderr() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .arg("--progress")
        .assert()
        .success()
        .stderr(predicate::str::contains("Progress: 100%"))
        .stdout(predicate::str::contains("Progress").not());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .arg("-v")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed LINE export"));
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_keyword_filter_ignores_case() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["--keyword", "lunch", "--no-timestamps"])
        .assert()
        .success()
        .stdout("UserB: Lunch plan:\n  noodles\nUserA: anyone for LUNCH?\n");
}

#[test]
fn test_speaker_filter_repeatable() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["-s", "UserB", "-s", "小明", "--no-timestamps"])
        .assert()
        .success()
        .stdout("UserB: Lunch plan:\n  noodles\n小明: 好啊\n");
}

#[test]
fn test_date_filter() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["--from", "2022-04-01", "--to", "2022-04-01", "--format", "csv", "--no-timestamps"])
        .assert()
        .success()
        .stdout("Author;Content;System\nUserA;anyone for LUNCH?;false\n小明;好啊;false\n");
}

#[test]
fn test_combined_filters() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["-k", "lunch", "-s", "UserA", "--to", "2022-03-31"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_desktop_export() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "desktop.txt"))
        .args(["--no-timestamps"])
        .assert()
        .success()
        .stdout("UserPC1: 測試訊息1\nUserPC2: hello from tabs\n* 系統訊息測試\n");
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_invalid_date_fails() {
    let dir = setup_fixtures();
    linechat()
        .arg(fixture(&dir, "mobile.txt"))
        .args(["--from", "31/03/2022"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("31/03/2022"));
}

#[test]
fn test_missing_file_fails() {
    linechat()
        .arg("/nonexistent/line_chat.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_missing_input_argument() {
    linechat().assert().failure();
}

#[test]
fn test_help() {
    linechat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--keyword"))
        .stdout(predicate::str::contains("--speaker"));
}
