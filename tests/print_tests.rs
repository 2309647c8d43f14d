//! Integration tests for `--print`

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{mindmend_cmd, mindmend_cmd_logging_to};

#[test]
fn test_print_without_entries() {
    let temp = TempDir::new().unwrap();

    mindmend_cmd(temp.path())
        .arg("--print")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries yet."));
}

#[test]
fn test_print_lists_newest_first() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("mindmend-entries.json"),
        r#"[
            {"id":2,"text":"I feel tired\nsecond line","analysis":"","date":"10/16/2026"},
            {"id":1,"mood":"anxious","date":"10/15/2026"}
        ]"#,
    )
    .unwrap();

    mindmend_cmd(temp.path())
        .arg("--print")
        .assert()
        .success()
        .stdout("10/16/2026: I feel tired\n10/15/2026: Mood: anxious\n");
}

#[test]
fn test_print_with_corrupt_data_is_empty() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("mindmend-entries.json"), "{ not json").unwrap();

    mindmend_cmd(temp.path())
        .arg("--print")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries yet."));

    let log = fs::read_to_string(temp.path().join("mindmend.log")).unwrap();
    assert!(log.contains("Discarding unreadable entries"));
}

#[test]
fn test_data_dir_flag_overrides_config() {
    let temp = TempDir::new().unwrap();
    let other = temp.path().join("elsewhere");
    fs::create_dir_all(&other).unwrap();
    fs::write(
        other.join("mindmend-entries.json"),
        r#"[{"id":1,"mood":"calm","date":"1/1/2026"}]"#,
    )
    .unwrap();

    mindmend_cmd(temp.path())
        .arg("--data-dir")
        .arg(&other)
        .arg("--print")
        .assert()
        .success()
        .stdout("1/1/2026: Mood: calm\n");
}

#[test]
fn test_unwritable_log_file_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    mindmend_cmd_logging_to(temp.path(), &blocker.join("mindmend.log"))
        .arg("--print")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries yet."))
        .stderr(predicate::str::contains("Logging disabled"));
}
