//! Unified application error type.
//! All modules (parser, core, config, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Workbook-related
    // ---------------------------
    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("No attendance section found in {0}")]
    NoAttendanceSection(String),

    #[error("No month/year context found near the header row in sheet '{0}'")]
    NoMonthContext(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load schedule book from {0}: {1}")]
    ScheduleBookLoad(String, String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<calamine::Error> for AppError {
    fn from(e: calamine::Error) -> Self {
        AppError::Workbook(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
