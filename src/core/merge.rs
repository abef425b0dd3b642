//! Merge/dedup stage: unions punches recorded for the same employee and day
//! across several parsed workbooks, collapsing same-minute duplicates and
//! tracking which files contributed each retained punch.

use crate::models::day_record::DayRecord;
use crate::models::punch::Punch;
use crate::parser::ParsedWorkbook;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::collections::btree_map::{BTreeMap, Entry};

#[derive(Debug)]
pub struct MergeResult {
    /// Deterministically ordered, finalized day records.
    pub records: Vec<DayRecord>,
    /// Cross-file duplicate punches collapsed, one per collision.
    pub merged_duplicates: usize,
    /// Warnings carried over from every input plus merge-level notes.
    pub warnings: Vec<String>,
    pub source_files: BTreeSet<String>,
}

fn merge_punch(punches: &mut Vec<Punch>, incoming: &Punch) -> bool {
    match punches.binary_search_by_key(&incoming.minute_of_day, |p| p.minute_of_day) {
        Ok(idx) => {
            let existing = &mut punches[idx];
            existing.origin = crate::models::punch::PunchOrigin::Merged;
            existing.sources.extend(incoming.sources.iter().cloned());
            true
        }
        Err(idx) => {
            punches.insert(idx, incoming.clone());
            false
        }
    }
}

fn merge_record(existing: &mut DayRecord, incoming: DayRecord, merged_duplicates: &mut usize) {
    // Back-fill identity fields from the first file that supplies them.
    if existing.display_name.is_empty() && !incoming.display_name.is_empty() {
        existing.display_name = incoming.display_name;
    }
    if existing.department.is_none() {
        existing.department = incoming.department;
    }
    existing.source_files.extend(incoming.source_files);
    existing.layouts.extend(incoming.layouts);
    // The date stays synthesized only when every contributor synthesized it.
    existing.synthesized_date &= incoming.synthesized_date;

    for punch in &incoming.punches {
        if merge_punch(&mut existing.punches, punch) {
            *merged_duplicates += 1;
        }
    }
}

/// Union a list of parsed workbooks into one record set keyed by
/// (employee token, date). Output ordering is independent of input file
/// order.
pub fn merge_workbooks(workbooks: Vec<ParsedWorkbook>) -> MergeResult {
    let mut by_key: BTreeMap<(String, NaiveDate), DayRecord> = BTreeMap::new();
    let mut merged_duplicates = 0;
    let mut warnings = Vec::new();
    let mut source_files = BTreeSet::new();

    for workbook in workbooks {
        warnings.extend(workbook.warnings);
        if let Some(name) = workbook.file_name {
            source_files.insert(name);
        }
        for record in workbook.records {
            let key = (record.employee_token.clone(), record.date);
            match by_key.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(mut slot) => {
                    merge_record(slot.get_mut(), record, &mut merged_duplicates);
                }
            }
        }
    }

    let mut records: Vec<DayRecord> = by_key.into_values().collect();
    records.sort_by(|a, b| {
        a.employee_token
            .cmp(&b.employee_token)
            .then(a.date.cmp(&b.date))
            .then(a.earliest_minute().cmp(&b.earliest_minute()))
            .then(a.latest_minute().cmp(&b.latest_minute()))
            .then(a.punches.len().cmp(&b.punches.len()))
            .then(a.display_name.cmp(&b.display_name))
    });

    if merged_duplicates > 0 {
        warnings.push(format!(
            "{merged_duplicates} duplicate punch(es) collapsed across files"
        ));
    }

    MergeResult {
        records,
        merged_duplicates,
        warnings,
        source_files,
    }
}
