//! Integration tests for the CLI interface
//!
//! Runs the statmerge binary against temporary directories and checks exit
//! codes, messages and the files left behind.

mod common;

use assert_cmd::Command;
use common::{expected_sum, read_objects, write_workers};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn statmerge(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("statmerge").unwrap();
    cmd.current_dir(cwd)
        .env_remove("STATMERGE_STATS_DIRECTORY")
        .env_remove("STATMERGE_JOBS")
        .env_remove("STATMERGE_MARKER");
    cmd
}

#[test]
fn test_cli_help_default() {
    let dir = TempDir::new().unwrap();
    statmerge(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("partition"))
        .stdout(predicate::str::contains("extract-stats"));
}

#[test]
fn test_invalid_command() {
    let dir = TempDir::new().unwrap();
    statmerge(dir.path())
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_partition_writes_manifests() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("raw");
    let output = dir.path().join("sets");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::create_dir_all(&output).unwrap();
    for i in 0..5 {
        std::fs::write(input.join(format!("run_{}.unk.evt.root", i)), "").unwrap();
    }
    std::fs::write(input.join("notes.txt"), "").unwrap();

    statmerge(dir.path())
        .args(["partition", "--input-dir"])
        .arg(&input)
        .arg("--output-dir")
        .arg(&output)
        .args(["--sets-number", "2", "--set-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 manifest(s)"));

    let first = std::fs::read_to_string(output.join("set_1.txt")).unwrap();
    let second = std::fs::read_to_string(output.join("set_2.txt")).unwrap();
    assert_eq!(first.lines().count(), 2);
    assert_eq!(second.lines().count(), 2);
    assert!(first.lines().next().unwrap().ends_with("run_0.unk.evt.root"));
    assert!(second.lines().last().unwrap().ends_with("run_3.unk.evt.root"));
    assert!(!output.join("set_3.txt").exists());
}

#[test]
fn test_partition_reports_every_violation() {
    let dir = TempDir::new().unwrap();

    statmerge(dir.path())
        .args([
            "partition",
            "--input-dir",
            "missing-in",
            "--output-dir",
            "missing-out",
            "--sets-number",
            "0",
            "--set-size",
            "-3",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Input directory does not exist"))
        .stderr(predicate::str::contains("Output directory does not exist"))
        .stderr(predicate::str::contains("Incorrect sets number: 0."))
        .stderr(predicate::str::contains("Incorrect set size: -3."));
}

#[test]
fn test_partition_empty_input() {
    let dir = TempDir::new().unwrap();

    statmerge(dir.path())
        .args(["partition", "--input-dir", ".", "--output-dir", "."])
        .args(["--sets-number", "1", "--set-size", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Empty input directory"));

    assert!(!dir.path().join("set_1.txt").exists());
}

#[test]
fn test_merge_reports_error_counter() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("categorized");
    std::fs::create_dir_all(&input).unwrap();
    write_workers(&input, &[1, 2, 4]);
    std::fs::write(input.join("worker_003.cat.evt.json"), "{").unwrap();

    statmerge(dir.path())
        .args(["merge", "--quiet", "--input-dir"])
        .arg(&input)
        .args(["--output-dir", "merged"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final error counter : 1"))
        .stdout(predicate::str::contains("Elapsed time:"));

    let merged = read_objects(&dir.path().join("merged/results.json"));
    assert_eq!(merged, expected_sum(&[1, 2, 4]));
}

#[test]
fn test_merge_with_jobs() {
    let dir = TempDir::new().unwrap();
    write_workers(dir.path(), &[1, 2, 3, 4, 5]);

    statmerge(dir.path())
        .args(["merge", "-q", "--jobs", "2", "--input-dir", ".", "--output-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final error counter : 0"));

    let merged = read_objects(&dir.path().join("out/results.json"));
    assert_eq!(merged, expected_sum(&[1, 2, 3, 4, 5]));
}

#[test]
fn test_merge_zero_jobs_rejected() {
    let dir = TempDir::new().unwrap();
    write_workers(dir.path(), &[1]);

    statmerge(dir.path())
        .args(["merge", "--jobs", "0", "--input-dir", ".", "--output-dir", "out"])
        .assert()
        .code(2);
}

#[test]
fn test_merge_missing_input_dir_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();

    statmerge(dir.path())
        .args(["merge", "--jobs", "0", "--input-dir", "absent", "--output-dir", "out"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Input directory does not exist"))
        .stderr(predicate::str::contains("Number of jobs must be at least 1"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_merge_fatal_schema_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.cat.evt.json"), "oops").unwrap();
    write_workers(dir.path(), &[1]);

    statmerge(dir.path())
        .args(["merge", "-q", "--input-dir", ".", "--output-dir", "out"])
        .assert()
        .code(4);

    assert!(!dir.path().join("out/results.json").exists());
}

#[test]
fn test_extract_stats_missing_input() {
    let dir = TempDir::new().unwrap();

    statmerge(dir.path())
        .args(["extract-stats", "--input-file", "results.json", "--output-dir", "out"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Input file does not exist"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_merge_then_extract_stats() {
    let dir = TempDir::new().unwrap();
    write_workers(dir.path(), &[1, 2]);

    statmerge(dir.path())
        .args(["merge", "-q", "--input-dir", ".", "--output-dir", "merged"])
        .assert()
        .success();
    statmerge(dir.path())
        .args(["extract-stats", "--input-file", "merged/results.json"])
        .args(["--output-dir", "report"])
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("report/stats.json")).unwrap())
            .unwrap();
    assert!(report["events_detected"].as_f64().unwrap() > 0.0);
    assert!(report["histograms"]["CF2G4H2SH_DeltaPhi"]["mean"].is_number());
    assert!(report["histograms"]
        .get("CF2G4H2SH_Theta1Theta2")
        .is_none());
}

#[test]
fn test_config_file_changes_conventions() {
    let dir = TempDir::new().unwrap();
    write_workers(dir.path(), &[1, 2]);
    std::fs::write(
        dir.path().join("custom.toml"),
        "[merge]\noutput_name = \"combined.json\"\n",
    )
    .unwrap();

    statmerge(dir.path())
        .args(["-c", "custom.toml", "merge", "-q", "--input-dir", ".", "--output-dir", "out"])
        .assert()
        .success();

    assert!(dir.path().join("out/combined.json").is_file());
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("statmerge.toml"), "[merge]\njobs = 0\n").unwrap();

    statmerge(dir.path())
        .args(["merge", "--input-dir", ".", "--output-dir", "out"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("merge.jobs must be at least 1"));
}

#[test]
fn test_clean_dry_run_then_delete() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.log"), "").unwrap();
    std::fs::write(dir.path().join("b.root"), "").unwrap();

    statmerge(dir.path())
        .args(["clean", "--dir", ".", "--file-type", "LOGFILE", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.log"));
    assert!(dir.path().join("a.log").exists());

    statmerge(dir.path())
        .args(["clean", "--dir", ".", "--file-type", "LOGFILE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 file(s)"));
    assert!(!dir.path().join("a.log").exists());
    assert!(dir.path().join("b.root").exists());
}
