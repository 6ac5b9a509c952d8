//! Importing HRM files into an exercise list.

pub mod batch;

pub use batch::{
    import_files, BatchImporter, BatchReport, FileOutcome, ImportError, ImportOptions, OutputMode,
};
