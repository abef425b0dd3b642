use crate::cli::parser::Commands;
use crate::core::logic::parse_files;
use crate::core::merge::merge_workbooks;
use crate::errors::AppResult;
use crate::models::punch::PunchOrigin;
use crate::utils::colors::{GREY, RESET, YELLOW};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_minute_of_day;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Inspect { files, punches } = cmd {
        let workbooks = parse_files(files)?;

        for wb in &workbooks {
            let name = wb.file_name.as_deref().unwrap_or("<memory>");
            let layouts: Vec<&str> = wb.layouts.iter().map(|l| l.as_str()).collect();
            println!(
                "{}: {} employee(s), {} punch(es), layout(s): {}",
                name,
                wb.employee_count,
                wb.punch_count,
                layouts.join(", ")
            );
            if let (Some(first), Some(last)) = (wb.first_date, wb.last_date) {
                println!("  range: {} .. {}", first, last);
            }
        }

        let merged = merge_workbooks(workbooks);
        println!(
            "\nMerged: {} day record(s) from {} file(s), {} duplicate punch(es) collapsed",
            merged.records.len(),
            merged.source_files.len(),
            merged.merged_duplicates
        );

        if *punches {
            print_punches(&merged.records);
        } else {
            print_days(&merged.records);
        }

        for w in &merged.warnings {
            println!("{}warning: {}{}", YELLOW, w, RESET);
        }
    }
    Ok(())
}

fn print_days(records: &[crate::models::day_record::DayRecord]) {
    let mut table = Table::new(vec![
        Column::new("ID", 10),
        Column::new("NAME", 20),
        Column::new("DATE", 10),
        Column::new("PUNCHES", 7),
        Column::new("FIRST", 5),
        Column::new("LAST", 5),
    ]);
    for r in records {
        table.add_row(vec![
            r.employee_token.clone(),
            r.display_name.clone(),
            r.date_str(),
            r.punches.len().to_string(),
            r.earliest_minute().map(format_minute_of_day).unwrap_or_default(),
            r.latest_minute().map(format_minute_of_day).unwrap_or_default(),
        ]);
    }
    println!();
    print!("{}", table.render());
}

fn print_punches(records: &[crate::models::day_record::DayRecord]) {
    for r in records {
        println!("\n{} {} ({})", r.date_str(), r.display_name, r.employee_token);
        for p in &r.punches {
            let marker = match p.origin {
                PunchOrigin::Merged => format!(" {}[merged: {}]{}", GREY, p.sources.len(), RESET),
                PunchOrigin::Original => String::new(),
            };
            println!("  {}{}", p.time, marker);
        }
    }
}
