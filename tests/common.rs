#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub fn atl() -> Command {
    cargo_bin_cmd!("attendlog")
}

/// Legacy narrow layout: each employee block carries its own day-number
/// header, with "User ID:"/"Name:" cells above it. Two employees, March 2025.
pub fn write_legacy_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();

    ws.write_string(0, 0, "Attendance Record  2025-03-01 ~ 2025-03-31")
        .unwrap();

    ws.write_string(1, 0, "User ID: 100042").unwrap();
    ws.write_string(1, 4, "Name: Alice").unwrap();
    for day in 1..=31u16 {
        ws.write_string(2, day - 1, day.to_string()).unwrap();
    }
    ws.write_string(3, 0, "08:45 17:15").unwrap();
    ws.write_string(3, 1, "08:0012:0012:3017:00").unwrap();

    ws.write_string(5, 0, "User ID: 100043").unwrap();
    ws.write_string(5, 4, "Name: Bob").unwrap();
    for day in 1..=31u16 {
        ws.write_string(6, day - 1, day.to_string()).unwrap();
    }
    ws.write_string(7, 2, "09:30 18:00").unwrap();

    workbook.save(path).unwrap();
}

/// A second legacy export overlapping the first: Alice's day 1 repeats the
/// 08:45 punch and adds a 12:00 one.
pub fn write_legacy_overlap_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();

    ws.write_string(0, 0, "Attendance Record  2025-03-01 ~ 2025-03-31")
        .unwrap();
    ws.write_string(1, 0, "User ID: 100042").unwrap();
    ws.write_string(1, 4, "Name: Alice").unwrap();
    for day in 1..=31u16 {
        ws.write_string(2, day - 1, day.to_string()).unwrap();
    }
    ws.write_string(3, 0, "08:45 12:00").unwrap();

    workbook.save(path).unwrap();
}

/// A February export whose day columns still run to 31: punches land on
/// day 1 and on the non-existent day 30.
pub fn write_legacy_february_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();

    ws.write_string(0, 0, "Attendance Record  2025-02-01 ~ 2025-02-28")
        .unwrap();
    ws.write_string(1, 0, "User ID: 100042").unwrap();
    ws.write_string(1, 4, "Name: Alice").unwrap();
    for day in 1..=31u16 {
        ws.write_string(2, day - 1, day.to_string()).unwrap();
    }
    ws.write_string(3, 0, "08:00 17:00").unwrap();
    ws.write_string(3, 29, "08:00 17:00").unwrap();

    workbook.save(path).unwrap();
}

/// Grid-report wide layout: one day header row for the sheet, employee
/// blocks anchored by "ID:" cells. Two employees, March 2025.
pub fn write_grid_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Att. Log Report").unwrap();

    ws.write_string(0, 0, "Att. Log Report").unwrap();
    ws.write_string(1, 0, "2025-03-01 ~ 2025-03-31").unwrap();
    for day in 1..=31u16 {
        ws.write_string(2, day - 1, day.to_string()).unwrap();
    }

    ws.write_string(3, 0, "ID:").unwrap();
    ws.write_string(3, 1, "100042").unwrap();
    ws.write_string(3, 3, "Name:").unwrap();
    ws.write_string(3, 4, "Alice").unwrap();
    ws.write_string(3, 6, "Dept:").unwrap();
    ws.write_string(3, 7, "Ops").unwrap();
    ws.write_string(4, 0, "08:4517:15").unwrap();

    ws.write_string(6, 0, "ID:").unwrap();
    ws.write_string(6, 1, "100077").unwrap();
    ws.write_string(6, 3, "Name:").unwrap();
    ws.write_string(6, 4, "Bob").unwrap();
    ws.write_string(7, 1, "09:0018:00").unwrap();

    // a block whose day columns never yield a punch
    ws.write_string(9, 0, "ID:").unwrap();
    ws.write_string(9, 1, "100099").unwrap();
    ws.write_string(9, 3, "Name:").unwrap();
    ws.write_string(9, 4, "Carol").unwrap();

    workbook.save(path).unwrap();
}

pub const SCHEDULE_BOOK_YAML: &str = r#"
default_schedule:
  type: fixed
  start: "08:00"
  end: "17:00"
  break_minutes: 60

employees:
  "100042":
    employee_id: "E-1042"
    office_id: "HQ"
    schedule:
      type: fixed
      start: "08:00"
      end: "17:00"
      grace_minutes: 15
      break_minutes: 60
  "100077":
    schedule:
      type: flex
      core_start: "10:00"
      core_end: "15:00"
      band_start: "06:00"
      band_end: "20:00"
      required_minutes: 480
      break_minutes: 60

exclusions:
  - employee: "100043"
    date: "2025-03-03"
    mode: excused
"#;
