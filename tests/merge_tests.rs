use attendlog::core::merge::merge_workbooks;
use attendlog::models::day_record::DayRecord;
use attendlog::models::punch::{Layout, Punch, PunchOrigin};
use attendlog::parser::ParsedWorkbook;
use chrono::NaiveDate;
use std::collections::BTreeSet;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn record(token: &str, name: &str, day: u32, minutes: &[i64], file: &str) -> DayRecord {
    let mut source_files = BTreeSet::new();
    source_files.insert(file.to_string());
    let mut layouts = BTreeSet::new();
    layouts.insert(Layout::Legacy);
    DayRecord {
        employee_token: token.to_string(),
        display_name: name.to_string(),
        department: None,
        date: date(day),
        punches: minutes.iter().map(|&m| Punch::new(m, Some(file))).collect(),
        source_files,
        layouts,
        synthesized_date: true,
    }
}

fn workbook(file: &str, records: Vec<DayRecord>) -> ParsedWorkbook {
    let punch_count = records.iter().map(|r| r.punches.len()).sum();
    let employee_count = records
        .iter()
        .map(|r| r.employee_token.clone())
        .collect::<BTreeSet<_>>()
        .len();
    let first_date = records.iter().map(|r| r.date).min();
    let last_date = records.iter().map(|r| r.date).max();
    let mut layouts = BTreeSet::new();
    layouts.insert(Layout::Legacy);
    ParsedWorkbook {
        file_name: Some(file.to_string()),
        records,
        warnings: Vec::new(),
        month_hints: vec![(2025, 3)],
        first_date,
        last_date,
        employee_count,
        punch_count,
        layouts,
    }
}

#[test]
fn same_minute_across_files_collapses_to_one_punch() {
    let a = workbook("a.xls", vec![record("100042", "Alice", 1, &[525, 1035], "a.xls")]);
    let b = workbook("b.xls", vec![record("100042", "Alice", 1, &[525, 720], "b.xls")]);

    let merged = merge_workbooks(vec![a, b]);
    assert_eq!(merged.records.len(), 1);
    assert_eq!(merged.merged_duplicates, 1);

    let punches = &merged.records[0].punches;
    assert_eq!(
        punches.iter().map(|p| p.minute_of_day).collect::<Vec<_>>(),
        vec![525, 720, 1035]
    );

    let dup = &punches[0];
    assert_eq!(dup.origin, PunchOrigin::Merged);
    assert_eq!(dup.sources.len(), 2);

    let fresh = &punches[1];
    assert_eq!(fresh.origin, PunchOrigin::Original);
    assert!(merged
        .warnings
        .iter()
        .any(|w| w.contains("duplicate punch(es) collapsed")));
}

#[test]
fn distinct_days_and_employees_stay_separate() {
    let a = workbook(
        "a.xls",
        vec![
            record("100042", "Alice", 1, &[480], "a.xls"),
            record("100043", "Bob", 1, &[500], "a.xls"),
        ],
    );
    let b = workbook("b.xls", vec![record("100042", "Alice", 2, &[490], "b.xls")]);

    let merged = merge_workbooks(vec![a, b]);
    assert_eq!(merged.records.len(), 3);
    assert_eq!(merged.merged_duplicates, 0);
}

#[test]
fn name_is_backfilled_from_the_file_that_has_it() {
    let a = workbook("a.xls", vec![record("100042", "", 1, &[480], "a.xls")]);
    let b = workbook("b.xls", vec![record("100042", "Alice", 1, &[500], "b.xls")]);

    let merged = merge_workbooks(vec![a, b]);
    assert_eq!(merged.records.len(), 1);
    assert_eq!(merged.records[0].display_name, "Alice");
    assert_eq!(merged.records[0].punches.len(), 2);
    assert_eq!(merged.records[0].source_files.len(), 2);
}

#[test]
fn merge_output_is_independent_of_input_order() {
    let build = || {
        (
            workbook(
                "a.xls",
                vec![
                    record("100042", "Alice", 1, &[525, 1035], "a.xls"),
                    record("100043", "Bob", 2, &[560], "a.xls"),
                ],
            ),
            workbook("b.xls", vec![record("100042", "Alice", 1, &[525, 720], "b.xls")]),
        )
    };

    let (a1, b1) = build();
    let (a2, b2) = build();
    let forward = merge_workbooks(vec![a1, b1]);
    let backward = merge_workbooks(vec![b2, a2]);

    let shape = |r: &attendlog::models::day_record::DayRecord| {
        (
            r.employee_token.clone(),
            r.date,
            r.punches.iter().map(|p| p.minute_of_day).collect::<Vec<_>>(),
        )
    };
    let f: Vec<_> = forward.records.iter().map(shape).collect();
    let b: Vec<_> = backward.records.iter().map(shape).collect();
    assert_eq!(f, b);
}
