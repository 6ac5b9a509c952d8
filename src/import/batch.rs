//! Batch import of HRM files into an exercise list.
//!
//! Files are handled one at a time: already listed files are skipped
//! without decoding, everything else is decoded and appended with the next
//! free id. The list is written once, at the end of the batch.

use crate::export::types::{ExerciseRecord, ExportError};
use crate::hrm::decoder::decode_file;
use crate::hrm::types::{DecodeError, HrmError};
use crate::storage::config::ImportSettings;
use crate::storage::exercise_list::ExerciseList;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// How an existing output file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Refuse to touch an existing file
    #[default]
    Create,
    /// Replace an existing file
    Force,
    /// Add to an existing file
    Append,
}

/// Settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub output: PathBuf,
    pub mode: OutputMode,
    pub sport_type_id: u32,
    pub sport_subtype_id: u32,
    /// Abort on the first file that cannot be decoded
    pub strict: bool,
}

impl ImportOptions {
    pub fn from_settings(settings: &ImportSettings, mode: OutputMode) -> Self {
        Self {
            output: settings.output.clone(),
            mode,
            sport_type_id: settings.sport_type_id,
            sport_subtype_id: settings.sport_subtype_id,
            strict: settings.strict,
        }
    }
}

/// Result of importing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Appended with this id
    Imported(u32),
    /// Already in the list
    SkippedDuplicate,
    /// Unreadable or undecodable, skipped
    Failed(String),
}

/// Totals of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub imported: usize,
    pub duplicates: usize,
    pub failed: usize,
    /// Stopped early by a cancel request
    pub interrupted: bool,
}

/// Errors that abort an import run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Output file {0} already exists, use --force or --append")]
    OutputExists(PathBuf),

    #[error("Cannot append to {path}: {source}")]
    CorruptTarget {
        path: PathBuf,
        #[source]
        source: ExportError,
    },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("Cannot resolve {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Imports a batch of files into one exercise list.
pub struct BatchImporter {
    options: ImportOptions,
    list: ExerciseList,
    known: HashSet<PathBuf>,
    last_id: u32,
    cancel: Arc<AtomicBool>,
    report: BatchReport,
}

impl BatchImporter {
    /// Prepare the target list according to the output mode.
    pub fn open(options: ImportOptions, cancel: Arc<AtomicBool>) -> Result<Self, ImportError> {
        let exists = options.output.exists();

        let list = match (options.mode, exists) {
            (OutputMode::Create, true) => {
                return Err(ImportError::OutputExists(options.output.clone()));
            }
            (OutputMode::Append, true) => {
                ExerciseList::load(&options.output).map_err(|source| ImportError::CorruptTarget {
                    path: options.output.clone(),
                    source,
                })?
            }
            (OutputMode::Force, true) => {
                tracing::info!("Replacing {}", options.output.display());
                ExerciseList::new()
            }
            _ => ExerciseList::new(),
        };

        let known = list.known_hrm_files();
        let last_id = list.max_id();
        tracing::debug!(
            "Target {} holds {} exercises, last id {}",
            options.output.display(),
            list.len(),
            last_id
        );

        Ok(Self {
            options,
            list,
            known,
            last_id,
            cancel,
            report: BatchReport::default(),
        })
    }

    /// Import one file. Only a decode failure in strict mode is an error;
    /// every other problem is logged and reported as the file's outcome.
    pub fn import_file(&mut self, path: &Path) -> Result<FileOutcome, ImportError> {
        let hrm_file = absolute_path(path).map_err(|source| ImportError::Path {
            path: path.to_path_buf(),
            source,
        })?;

        if self.known.contains(&hrm_file) {
            tracing::info!("{} is already in the exercise list, skipping", hrm_file.display());
            self.report.duplicates += 1;
            return Ok(FileOutcome::SkippedDuplicate);
        }

        let exercise = match decode_file(&hrm_file) {
            Ok(exercise) => exercise,
            Err(HrmError::Format(e)) => {
                tracing::warn!("{}", e);
                self.report.failed += 1;
                return Ok(FileOutcome::Failed(e.to_string()));
            }
            Err(HrmError::Decode(e)) if self.options.strict => {
                return Err(ImportError::Decode {
                    path: hrm_file,
                    source: e,
                });
            }
            Err(HrmError::Decode(e)) => {
                tracing::warn!("Skipping {}: {}", hrm_file.display(), e);
                self.report.failed += 1;
                return Ok(FileOutcome::Failed(e.to_string()));
            }
        };

        let id = self.last_id + 1;
        let record = ExerciseRecord::from_exercise(
            id,
            self.options.sport_type_id,
            self.options.sport_subtype_id,
            &exercise,
            &hrm_file,
        );
        self.list.push(&record);
        self.known.insert(hrm_file);
        self.last_id = id;
        self.report.imported += 1;

        tracing::info!("Imported {} as exercise {}", path.display(), id);
        Ok(FileOutcome::Imported(id))
    }

    /// Import `files` in order, stopping early when cancelled.
    pub fn run<P: AsRef<Path>>(&mut self, files: &[P]) -> Result<(), ImportError> {
        for file in files {
            if self.cancel.load(Ordering::SeqCst) {
                tracing::warn!("Import interrupted, keeping the exercises read so far");
                self.report.interrupted = true;
                break;
            }
            self.import_file(file.as_ref())?;
        }
        Ok(())
    }

    pub fn report(&self) -> &BatchReport {
        &self.report
    }

    /// Write the list and return the totals.
    pub fn finish(self) -> Result<BatchReport, ImportError> {
        self.list.save(&self.options.output)?;
        Ok(self.report)
    }
}

/// Open the target, import every file and write the result.
pub fn import_files<P: AsRef<Path>>(
    options: ImportOptions,
    files: &[P],
    cancel: Arc<AtomicBool>,
) -> Result<BatchReport, ImportError> {
    let mut importer = BatchImporter::open(options, cancel)?;
    importer.run(files)?;
    importer.finish()
}

/// Absolute form of `path` with `.` and `..` collapsed lexically. Symlinks
/// are left as they are.
fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
