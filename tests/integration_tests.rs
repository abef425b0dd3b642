use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::atl;

#[test]
fn inspect_prints_merged_day_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.xlsx");
    common::write_legacy_workbook(&path);

    atl()
        .arg("inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("100042").and(contains("100043")).and(contains("Alice")));
}

#[test]
fn inspect_punches_lists_each_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.xlsx");
    common::write_legacy_workbook(&path);

    atl()
        .args(["inspect", "--punches"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("08:45").and(contains("17:15")));
}

#[test]
fn inspect_fails_on_missing_file() {
    atl()
        .args(["inspect", "definitely-not-here.xlsx"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn report_with_schedule_book_prints_summaries() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = dir.path().join("legacy.xlsx");
    common::write_legacy_workbook(&workbook);
    let book = dir.path().join("schedules.yaml");
    fs::write(&book, common::SCHEDULE_BOOK_YAML).unwrap();

    atl()
        .arg("report")
        .arg(&workbook)
        .arg("--schedules")
        .arg(&book)
        .args(["--per-day"])
        .assert()
        .success()
        .stdout(
            contains("100042")
                .and(contains("FIXED"))
                .and(contains("WORKSCHEDULE"))
                .and(contains("excused")),
        );
}

#[test]
fn report_without_book_falls_back_to_the_builtin_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = dir.path().join("legacy.xlsx");
    common::write_legacy_workbook(&workbook);

    atl()
        .arg("report")
        .arg(&workbook)
        .args(["--per-day"])
        .assert()
        .success()
        .stdout(contains("NOMAPPING"));
}

#[test]
fn report_json_emits_the_full_structure() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = dir.path().join("grid.xlsx");
    common::write_grid_workbook(&workbook);
    let book = dir.path().join("schedules.yaml");
    fs::write(&book, common::SCHEDULE_BOOK_YAML).unwrap();

    let output = atl()
        .arg("report")
        .arg(&workbook)
        .arg("--schedules")
        .arg(&book)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(parsed["per_day"].is_array());
    assert!(parsed["per_employee"].is_array());
    assert_eq!(parsed["merged_duplicates"], 0);
    let first = &parsed["per_employee"][0];
    assert_eq!(first["employee_token"], "100042");
    assert_eq!(first["identity"], "matched");
}

#[test]
fn report_merges_multiple_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.xlsx");
    let b = dir.path().join("b.xlsx");
    common::write_legacy_workbook(&a);
    common::write_legacy_overlap_workbook(&b);

    atl()
        .arg("report")
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(contains("duplicate punch(es) collapsed"));
}
