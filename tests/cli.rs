//! End-to-end tests for the spendlog binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn spendlog(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spendlog").unwrap();
    cmd.env("SPENDLOG_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn add_lunch(data_dir: &TempDir) -> assert_cmd::assert::Assert {
    spendlog(data_dir)
        .args(["add", "Lunch", "12.50", "-c", "food", "-d", "2025-03-10", "-t", "12:30"])
        .assert()
}

#[test]
fn test_no_command_prints_hint() {
    let data_dir = TempDir::new().unwrap();
    spendlog(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("spendlog --help"));
}

#[test]
fn test_add_then_list_day() {
    let data_dir = TempDir::new().unwrap();
    add_lunch(&data_dir)
        .success()
        .stdout(predicate::str::contains("Added #1"));

    spendlog(&data_dir)
        .args(["list", "-d", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 expense, total $12.50"))
        .stdout(predicate::str::contains("Lunch"));

    spendlog(&data_dir)
        .args(["list", "-d", "2025-03-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded."));
}

#[test]
fn test_list_grouped_by_category() {
    let data_dir = TempDir::new().unwrap();
    add_lunch(&data_dir).success();
    spendlog(&data_dir)
        .args(["add", "Taxi", "18", "-c", "travel", "-d", "2025-03-10", "-t", "19:05"])
        .assert()
        .success();

    spendlog(&data_dir)
        .args(["list", "-d", "2025-03-10", "-g", "category"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Travel ($18.00)"))
        .stdout(predicate::str::contains("Food ($12.50)"));
}

#[test]
fn test_invalid_amount_is_rejected() {
    let data_dir = TempDir::new().unwrap();
    spendlog(&data_dir)
        .args(["add", "Lunch", "abc", "-c", "food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be a number"));

    spendlog(&data_dir)
        .args(["add", "Lunch", "0", "-c", "food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_other_category_is_not_selectable() {
    let data_dir = TempDir::new().unwrap();
    spendlog(&data_dir)
        .args(["add", "Gift", "20", "-c", "other"])
        .assert()
        .failure();
}

#[test]
fn test_duplicate_needs_force() {
    let data_dir = TempDir::new().unwrap();
    add_lunch(&data_dir).success();

    add_lunch(&data_dir)
        .failure()
        .stderr(predicate::str::contains("Possible duplicate of:"))
        .stderr(predicate::str::contains("--force"));

    spendlog(&data_dir)
        .args([
            "add", "Lunch", "12.50", "-c", "food", "-d", "2025-03-10", "-t", "13:00", "--force",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added #2"));
}

#[test]
fn test_edit_show_and_delete() {
    let data_dir = TempDir::new().unwrap();
    add_lunch(&data_dir).success();

    spendlog(&data_dir)
        .args(["edit", "1", "--title", "Team lunch", "-n", "with the design team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated #1"));

    spendlog(&data_dir)
        .args(["show", "#1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team lunch"))
        .stdout(predicate::str::contains("with the design team"));

    spendlog(&data_dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted #1"));

    spendlog(&data_dir)
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_report_with_sample_data() {
    let data_dir = TempDir::new().unwrap();
    spendlog(&data_dir)
        .args(["report", "--sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sample data"))
        .stdout(predicate::str::contains("By category"));
}

#[test]
fn test_export_csv_to_path() {
    let data_dir = TempDir::new().unwrap();
    let output = data_dir.path().join("week.csv");

    spendlog(&data_dir)
        .args(["export", "csv", "--sample", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported CSV report"));

    let contents = fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("\"Id\",\"Title\",\"Amount\""));
}

#[test]
fn test_export_pdf_to_exports_dir() {
    let data_dir = TempDir::new().unwrap();
    spendlog(&data_dir)
        .args(["export", "pdf", "--sample"])
        .assert()
        .success();

    let exports: Vec<_> = fs::read_dir(data_dir.path().join("exports"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].extension().unwrap(), "pdf");
    assert!(fs::read(&exports[0]).unwrap().starts_with(b"%PDF-1.4"));
}

#[test]
fn test_theme_roundtrip() {
    let data_dir = TempDir::new().unwrap();
    spendlog(&data_dir)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: System default"));

    spendlog(&data_dir)
        .args(["theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme changed from System default to Dark"));

    spendlog(&data_dir)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: Dark"));

    spendlog(&data_dir).args(["theme", "sepia"]).assert().failure();
}

#[test]
fn test_sync_and_audit() {
    let data_dir = TempDir::new().unwrap();
    spendlog(&data_dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Audit log is empty."));

    add_lunch(&data_dir).success();

    spendlog(&data_dir)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expenses:     1"))
        .stdout(predicate::str::contains("Previous:     never"));

    spendlog(&data_dir)
        .args(["audit", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"));
}

#[test]
fn test_config_shows_paths() {
    let data_dir = TempDir::new().unwrap();
    spendlog(&data_dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol: $"));

    assert!(data_dir.path().join("config.json").exists());
}
