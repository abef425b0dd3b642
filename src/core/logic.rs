//! Pipeline orchestration: parse every input workbook, merge the records,
//! evaluate each (employee, day) against the schedule book and aggregate
//! per employee. Each stage is usable on its own; this module only wires
//! them together.

use crate::config::ScheduleBook;
use crate::core::aggregate::summarize;
use crate::core::evaluator::{DayPunches, evaluate_day};
use crate::core::merge::{MergeResult, merge_workbooks};
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use crate::models::rows::{PerDayRow, PerEmployeeRow, ScheduleSource};
use crate::parser::{ParsedWorkbook, parse_workbook_file};
use std::path::PathBuf;

/// Everything one pipeline run produces.
pub struct PipelineOutput {
    pub merge: MergeResult,
    pub per_day: Vec<PerDayRow>,
    pub per_employee: Vec<PerEmployeeRow>,
}

/// Parse each input file in turn. The first file that fails aborts the run;
/// partial-input reports are worse than no report.
pub fn parse_files(paths: &[PathBuf]) -> AppResult<Vec<ParsedWorkbook>> {
    let mut workbooks = Vec::with_capacity(paths.len());
    for path in paths {
        workbooks.push(parse_workbook_file(path)?);
    }
    Ok(workbooks)
}

/// Evaluate merged day records against the schedule book. A dated exclusion
/// upgrades the row's schedule source to EXCEPTION, whatever the schedule
/// lookup reported.
pub fn evaluate_records(records: &[DayRecord], book: &ScheduleBook) -> Vec<PerDayRow> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let (schedule, mut source) = book.lookup(&record.employee_token);
        let exclusion = book.exclusion(&record.employee_token, record.date);
        if exclusion.is_some() {
            source = ScheduleSource::Exception;
        }
        let identity = book.identity(&record.employee_token);

        let punches = DayPunches::from_punches(&record.punches);
        let verdict = evaluate_day(record.date, &punches, schedule, exclusion);

        rows.push(PerDayRow {
            employee_token: record.employee_token.clone(),
            display_name: record.display_name.clone(),
            department: record.department.clone(),
            date: record.date,
            schedule_type: schedule.type_label().to_string(),
            schedule_source: source,
            identity: identity.status,
            resolved_employee_id: identity.employee_id,
            office_id: identity.office_id,
            verdict,
        });
    }
    rows
}

/// Full run: parse, merge, evaluate, aggregate.
pub fn run_pipeline(paths: &[PathBuf], book: &ScheduleBook) -> AppResult<PipelineOutput> {
    let workbooks = parse_files(paths)?;
    let merge = merge_workbooks(workbooks);
    let per_day = evaluate_records(&merge.records, book);
    let per_employee = summarize(&per_day);
    Ok(PipelineOutput {
        merge,
        per_day,
        per_employee,
    })
}
