//! Error types for jobcal.

use thiserror::Error;

/// Errors that can occur while reconciling a sheet with a calendar.
#[derive(Error, Debug)]
pub enum JobCalError {
    #[error("Sheet named '{0}' not found.")]
    SheetNotFound(String),

    #[error("No data found in the sheet.")]
    NoData,

    #[error("Column '{0}' is missing. Please check exact spelling.")]
    MissingColumn(String),

    #[error("{0}")]
    Calendar(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Sheet error: {0}")]
    Table(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for jobcal operations.
pub type JobCalResult<T> = Result<T, JobCalError>;
