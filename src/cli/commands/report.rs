use crate::cli::parser::Commands;
use crate::config::ScheduleBook;
use crate::core::logic::run_pipeline;
use crate::errors::{AppError, AppResult};
use crate::models::rows::{PerDayRow, PerEmployeeRow};
use crate::models::verdict::EvalStatus;
use crate::utils::colors::{RESET, YELLOW, color_for_flag};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_minutes;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    source_files: Vec<&'a str>,
    merged_duplicates: usize,
    warnings: &'a [String],
    per_day: &'a [PerDayRow],
    per_employee: &'a [PerEmployeeRow],
}

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Report {
        files,
        schedules,
        json,
        per_day,
    } = cmd
    {
        let book = match schedules {
            Some(path) => ScheduleBook::load(path)?,
            None => ScheduleBook::default(),
        };

        let output = run_pipeline(files, &book)?;

        if *json {
            let report = JsonReport {
                source_files: output.merge.source_files.iter().map(String::as_str).collect(),
                merged_duplicates: output.merge.merged_duplicates,
                warnings: &output.merge.warnings,
                per_day: &output.per_day,
                per_employee: &output.per_employee,
            };
            let text = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", text);
            return Ok(());
        }

        if *per_day {
            print_per_day(&output.per_day);
        }
        print_per_employee(&output.per_employee);

        for w in &output.merge.warnings {
            println!("{}warning: {}{}", YELLOW, w, RESET);
        }
    }
    Ok(())
}

fn status_cell(row: &PerDayRow) -> String {
    match row.verdict.status {
        EvalStatus::NoPunch => "no punch".to_string(),
        EvalStatus::Excused => "excused".to_string(),
        EvalStatus::Evaluated => {
            let mut flags = Vec::new();
            if row.verdict.is_late {
                flags.push("late");
            }
            if row.verdict.is_undertime {
                flags.push("undertime");
            }
            if flags.is_empty() {
                "ok".to_string()
            } else {
                flags.join("+")
            }
        }
    }
}

fn print_per_day(rows: &[PerDayRow]) {
    let mut table = Table::new(vec![
        Column::new("ID", 10),
        Column::new("DATE", 10),
        Column::new("SCHED", 6),
        Column::new("SOURCE", 12),
        Column::new("WORKED", 6),
        Column::new("LATE", 6),
        Column::new("UNDER", 6),
        Column::new("STATUS", 14),
    ]);
    for row in rows {
        table.add_row(vec![
            row.employee_token.clone(),
            row.date.format("%Y-%m-%d").to_string(),
            row.schedule_type.clone(),
            row.schedule_source.as_str().to_string(),
            format_minutes(row.verdict.worked_minutes),
            format_minutes(row.verdict.late_minutes),
            format_minutes(row.verdict.undertime_minutes),
            status_cell(row),
        ]);
    }
    println!();
    print!("{}", table.render());
}

fn print_per_employee(rows: &[PerEmployeeRow]) {
    let mut table = Table::new(vec![
        Column::new("ID", 10),
        Column::new("NAME", 20),
        Column::new("DAYS", 4),
        Column::new("LATE", 4),
        Column::new("UT", 4),
        Column::new("LATE%", 6),
        Column::new("UT%", 6),
        Column::new("LATE MIN", 8),
        Column::new("UT MIN", 8),
        Column::new("SOURCE", 12),
    ]);
    for row in rows {
        table.add_row(vec![
            row.employee_token.clone(),
            row.display_name.clone(),
            row.days_with_logs.to_string(),
            row.late_days.to_string(),
            row.undertime_days.to_string(),
            format!("{:.1}", row.late_rate_pct),
            format!("{:.1}", row.undertime_rate_pct),
            row.total_late_minutes.to_string(),
            row.total_undertime_minutes.to_string(),
            row.schedule_source.as_str().to_string(),
        ]);
    }
    println!();
    print!("{}", table.render());

    for row in rows {
        if row.late_days > 0 || row.undertime_days > 0 {
            let color = color_for_flag(true);
            println!(
                "{}{}: {} late day(s), {} undertime day(s){}",
                color, row.employee_token, row.late_days, row.undertime_days, RESET
            );
        }
    }
}
