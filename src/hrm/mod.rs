//! Polar HRM file reading and decoding.

pub mod decoder;
pub mod fields;
pub mod flags;
pub mod monitor;
pub mod sections;
pub mod types;

pub use decoder::{decode, decode_file, decode_str};
pub use monitor::MonitorModel;
pub use sections::{read_sections, read_sections_file, RawSection, Sections};
pub use types::{
    DecodeError, DeviceCapabilities, FormatError, HrZone, HrZoneTable, HrmError, HrmExercise,
    LimitZone, PersonalProfile, Sample, SampleSeries, TimingInfo, TripSummary,
};
