use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for attendlog
/// CLI application to analyze biometric attendance spreadsheets
#[derive(Parser)]
#[command(
    name = "attendlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Parse biometric attendance spreadsheets and score punches against work schedules",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and merge attendance workbooks, then print what was found
    Inspect {
        /// Attendance workbook files (.xls/.xlsx)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Print every punch instead of the per-day summary columns
        #[arg(long = "punches", help = "List each punch time per day")]
        punches: bool,
    },

    /// Evaluate attendance against a schedule book and print the report
    Report {
        /// Attendance workbook files (.xls/.xlsx)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Schedule book YAML; without it every token falls back to the
        /// built-in fixed schedule
        #[arg(long = "schedules", value_name = "FILE")]
        schedules: Option<PathBuf>,

        /// Emit the full report as JSON instead of tables
        #[arg(long = "json")]
        json: bool,

        /// Include the per-day rows, not only the per-employee summary
        #[arg(long = "per-day")]
        per_day: bool,
    },
}
