//! Exercise list export and chart data CSV.

pub mod csv;
pub mod exercise_xml;
pub mod record;
pub mod types;

pub use csv::export_chart_csv;
pub use exercise_xml::{empty_document, parse_document, write_document, XmlNode};
pub use record::DATE_FORMAT;
pub use types::{ExerciseRecord, ExportError, DEFAULT_INTENSITY};
