//! Export record and error types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Intensity written for every imported exercise.
pub const DEFAULT_INTENSITY: &str = "NORMAL";

/// One `<exercise>` element of the exercise list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseRecord {
    pub id: u32,
    pub sport_type_id: u32,
    pub sport_subtype_id: u32,
    /// Exercise start, written as `YYYY-MM-DDTHH:MM:SS`
    pub date: DateTime<Utc>,
    /// Exercise length in seconds
    pub duration_seconds: u32,
    pub intensity: &'static str,
    /// Trip distance, 0 without trip data
    pub distance: f64,
    pub avg_speed: f64,
    /// 0 for an exercise without samples
    pub avg_heartrate: u16,
    /// Absolute path of the source file
    pub hrm_file: PathBuf,
}

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// XML could not be written
    #[error("XML error: {0}")]
    XmlError(String),

    /// Existing document could not be read back
    #[error("Invalid exercise list: {0}")]
    InvalidDocument(String),

    /// CSV output could not be written
    #[error("Failed to write data: {0}")]
    WriteFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
