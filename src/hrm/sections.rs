//! Lexical pass over HRM files.
//!
//! An HRM file is a list of `[Name]` blocks. Each block runs until the next
//! blank line, even across a `[Name]` line, and holds either `Key=Value` attributes or whitespace separated
//! rows. Nothing here knows what a block means.

use std::collections::HashMap;
use std::path::Path;

use crate::hrm::types::FormatError;

/// One named block with its attributes and rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSection {
    pub name: String,
    pub attributes: HashMap<String, String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First token of row `index`, if any.
    pub fn first_token(&self, index: usize) -> Option<&str> {
        self.rows
            .get(index)
            .and_then(|row| row.first())
            .map(String::as_str)
    }
}

/// All sections of a file, by name. Later duplicates replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    by_name: HashMap<String, RawSection>,
}

impl Sections {
    pub fn get(&self, name: &str) -> Option<&RawSection> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn insert(&mut self, section: RawSection) {
        tracing::debug!(
            "Section [{}]: {} attributes, {} rows",
            section.name,
            section.attributes.len(),
            section.rows.len()
        );
        self.by_name.insert(section.name.clone(), section);
    }
}

/// Split HRM text into sections. Never fails: malformed content just yields
/// empty attributes or rows.
pub fn read_sections(content: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current: Option<RawSection> = None;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() {
            if let Some(section) = current.take() {
                sections.insert(section);
            }
            continue;
        }

        // Only a blank line closes a section; until then a `[Name]` line is a row
        let Some(section) = current.as_mut() else {
            if let Some(name) = parse_section_header(line) {
                current = Some(RawSection::new(name));
            }
            // Lines outside any section are ignored
            continue;
        };

        if let Some((key, value)) = parse_attribute(line) {
            section.attributes.insert(key.to_string(), value.to_string());
        } else {
            section
                .rows
                .push(line.split_whitespace().map(str::to_string).collect());
        }
    }

    if let Some(section) = current.take() {
        sections.insert(section);
    }

    sections
}

/// Read and split an HRM file from disk.
pub fn read_sections_file(path: &Path) -> Result<Sections, FormatError> {
    let bytes = std::fs::read(path).map_err(|source| FormatError {
        path: path.to_path_buf(),
        source,
    })?;

    // HRM files from the Polar software are Latin-1; the parts we decode are ASCII
    let content = String::from_utf8_lossy(&bytes);
    Ok(read_sections(&content))
}

/// `[Name]` -> `Name`.
fn parse_section_header(line: &str) -> Option<&str> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// `Key=Value`, only when the line holds exactly one `=`.
fn parse_attribute(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    if value.contains('=') {
        return None;
    }
    Some((key.trim(), value.trim()))
}
