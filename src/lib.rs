//! hrmimport - Polar HRM exercise importer
//!
//! Reads heart rate monitor recordings in the Polar HRM text format,
//! derives heart rate zone and speed statistics, and appends the exercises
//! to a SportsTracker exercise list.

pub mod export;
pub mod hrm;
pub mod import;
pub mod metrics;
pub mod storage;

// Re-export commonly used types
pub use export::types::{ExerciseRecord, ExportError};
pub use hrm::decoder::{decode_file, decode_str};
pub use hrm::types::{DecodeError, FormatError, HrmError, HrmExercise};
pub use import::batch::{BatchImporter, ImportError, ImportOptions, OutputMode};
pub use metrics::report::SessionReport;
pub use metrics::summary::ExerciseSummary;
pub use storage::config::AppConfig;
pub use storage::exercise_list::ExerciseList;
