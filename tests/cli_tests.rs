use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn drift(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("drift").expect("binary builds");
    cmd.env("DRIFT_WORK_DIR", temp_dir.path())
        .env(
            "DRIFT_CONFIG_PATH",
            temp_dir.path().join(".config/driftman/config"),
        )
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_baseline_records_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;
    fs::write(temp_dir.path().join("b.txt"), "world")?;

    drift(&temp_dir)
        .args(["baseline", "a.txt", "b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded 2 file(s)"));

    assert!(temp_dir.path().join(".file_hashes.json").exists());

    Ok(())
}

#[test]
fn test_check_exit_codes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;

    drift(&temp_dir)
        .args(["baseline", "a.txt"])
        .assert()
        .success();

    // Unchanged: exit 0
    drift(&temp_dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No drift detected"));

    // Drifted: exit 1 and the path is listed
    fs::write(temp_dir.path().join("a.txt"), "customized")?;
    drift(&temp_dir)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.txt"));

    Ok(())
}

#[test]
fn test_check_single_untracked_path_succeeds() -> Result<()> {
    let temp_dir = TempDir::new()?;

    drift(&temp_dir)
        .args(["check", "never-tracked.txt"])
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_modified_lists_drifted_paths() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;
    fs::write(temp_dir.path().join("b.txt"), "world")?;

    drift(&temp_dir)
        .args(["baseline", "a.txt", "b.txt"])
        .assert()
        .success();

    fs::write(temp_dir.path().join("a.txt"), "goodbye")?;
    drift(&temp_dir).arg("check").assert().code(1);

    drift(&temp_dir)
        .arg("modified")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt").and(predicate::str::contains("b.txt").not()));

    Ok(())
}

#[test]
fn test_backup_writes_timestamped_copy() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("a.txt"), "precious")?;

    drift(&temp_dir)
        .args(["backup", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".backups"));

    let backups: Vec<_> = fs::read_dir(temp_dir.path().join(".backups"))?
        .collect::<std::io::Result<Vec<_>>>()?;
    assert_eq!(backups.len(), 1);

    let name = backups[0].file_name().to_string_lossy().into_owned();
    assert!(name.starts_with("a.txt."));
    assert!(name.ends_with(".bak"));
    assert_eq!(fs::read(backups[0].path())?, b"precious");

    Ok(())
}

#[test]
fn test_backup_missing_file_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;

    drift(&temp_dir)
        .args(["backup", "absent.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File not found"));

    Ok(())
}

#[test]
fn test_report_json_shape() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;

    drift(&temp_dir)
        .args(["baseline", "a.txt"])
        .assert()
        .success();

    fs::write(temp_dir.path().join("a.txt"), "goodbye")?;
    drift(&temp_dir).arg("check").assert().code(1);

    let output = drift(&temp_dir).args(["report", "--json"]).output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["total_files"], 1);
    assert_eq!(report["modified_count"], 1);
    assert_eq!(report["modified_files"][0], "a.txt");

    Ok(())
}

#[test]
fn test_report_human_readable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;

    drift(&temp_dir)
        .args(["baseline", "a.txt"])
        .assert()
        .success();

    drift(&temp_dir)
        .arg("report")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Tracked files:    1")
                .and(predicate::str::contains("Template version: 1.0.0")),
        );

    Ok(())
}

#[test]
fn test_rebaseline_clears_modified_flag() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("a.txt"), "v1")?;

    drift(&temp_dir)
        .args(["baseline", "a.txt"])
        .assert()
        .success();

    fs::write(temp_dir.path().join("a.txt"), "v2")?;
    drift(&temp_dir).arg("check").assert().code(1);

    // Accept the change as the new baseline
    drift(&temp_dir)
        .args(["baseline", "a.txt"])
        .assert()
        .success();

    drift(&temp_dir).arg("check").assert().success();

    Ok(())
}

#[test]
fn test_corrupt_store_recovers() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join(".file_hashes.json"), "{ not json")?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;

    drift(&temp_dir)
        .args(["baseline", "a.txt"])
        .assert()
        .success();

    drift(&temp_dir).arg("check").assert().success();

    Ok(())
}

#[test]
fn test_completion_generates_script() -> Result<()> {
    let temp_dir = TempDir::new()?;

    drift(&temp_dir)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("drift"));

    Ok(())
}
