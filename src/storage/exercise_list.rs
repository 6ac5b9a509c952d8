//! Exercise list file.
//!
//! Loads an existing list, tracks the ids and source files already present,
//! appends new records and writes the result back atomically.

use crate::export::exercise_xml::{
    empty_document, parse_document, write_document, XmlNode, EXERCISE_ELEMENT,
};
use crate::export::types::{ExerciseRecord, ExportError};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// An `<exercise-list>` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseList {
    root: XmlNode,
}

impl Default for ExerciseList {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            root: empty_document(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, ExportError> {
        Ok(Self {
            root: parse_document(content)?,
        })
    }

    /// Load a list from disk. A truncated or otherwise unparsable file is
    /// an error, never an empty list.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let content = std::fs::read_to_string(path)?;
        let list = Self::parse(&content)?;
        tracing::debug!(
            "Loaded {} exercises from {}",
            list.len(),
            path.display()
        );
        Ok(list)
    }

    /// `<exercise>` elements in document order.
    pub fn exercises(&self) -> impl Iterator<Item = &XmlNode> {
        self.root
            .children
            .iter()
            .filter(|node| node.name == EXERCISE_ELEMENT)
    }

    pub fn len(&self) -> usize {
        self.exercises().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest numeric id in the list, 0 when there is none.
    pub fn max_id(&self) -> u32 {
        self.exercises()
            .filter_map(|exercise| exercise.child_text("id"))
            .filter_map(|id| id.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
    }

    /// Source files of the exercises already in the list.
    pub fn known_hrm_files(&self) -> HashSet<PathBuf> {
        self.exercises()
            .filter_map(|exercise| exercise.child_text("hrm-file"))
            .map(PathBuf::from)
            .collect()
    }

    /// Append a record after the existing exercises.
    pub fn push(&mut self, record: &ExerciseRecord) {
        self.root.children.push(XmlNode::from(record));
    }

    pub fn to_xml(&self) -> Result<String, ExportError> {
        write_document(&self.root)
    }

    /// Write the list to `path` through a temporary file in the same
    /// directory, so the target is either the old or the new document.
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        let xml = self.to_xml()?;
        let temp_path = temp_path_for(path);

        let result = (|| -> Result<(), ExportError> {
            let mut file = std::fs::File::create(&temp_path)?;
            file.write_all(xml.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
            std::fs::rename(&temp_path, path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        } else {
            tracing::info!("Wrote {} exercises to {}", self.len(), path.display());
        }
        result
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "exercises.xml".into());
    name.push(".tmp");
    path.with_file_name(name)
}
