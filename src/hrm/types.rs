//! Decoded HRM exercise types and decoder errors.
//!
//! Everything here is produced in one pass by the decoder and never mutated
//! afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::hrm::monitor::MonitorModel;

/// Number of heart rate zones in the `HRZones` block.
pub const HR_ZONE_COUNT: usize = 10;

/// Recording channels and unit settings read from the `SMode` bit string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceCapabilities {
    /// HRM format version as written in the file ("106", "107", ...)
    pub version: String,
    /// Monitor model from the `Monitor` index
    pub monitor: MonitorModel,
    pub speed: bool,
    pub cadence: bool,
    pub altitude: bool,
    pub power: bool,
    /// Left/right power balance recorded
    pub power_balance: bool,
    /// Power pedalling index recorded
    pub power_pedal_index: bool,
    /// Set when the file holds cycling data next to heart rate
    pub heartrate_or_cycling_mode: bool,
    /// Values are in US units (miles, mph, ft, °F, lb)
    pub us_imperial_units: bool,
    /// Air pressure recorded (format 107 only)
    pub air_pressure: bool,
}

impl DeviceCapabilities {
    /// Capabilities with every flag unset.
    pub fn unset(version: impl Into<String>, monitor: MonitorModel) -> Self {
        Self {
            version: version.into(),
            monitor,
            speed: false,
            cadence: false,
            altitude: false,
            power: false,
            power_balance: false,
            power_pedal_index: false,
            heartrate_or_cycling_mode: false,
            us_imperial_units: false,
            air_pressure: false,
        }
    }

    /// Index of the altitude column in an `HRData` row.
    ///
    /// Columns follow the recording order: heart rate, speed, cadence,
    /// altitude.
    pub fn altitude_column(&self) -> usize {
        1 + usize::from(self.speed) + usize::from(self.cadence)
    }
}

/// A heart rate limit pair from `Lower<n>`/`Upper<n>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LimitZone {
    pub lower_bpm: u16,
    pub upper_bpm: u16,
}

/// Start, duration and recording interval of the exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingInfo {
    /// Exercise start (UTC)
    pub start: DateTime<Utc>,
    /// Exercise length in whole seconds
    pub duration_seconds: u32,
    /// `start + duration_seconds`
    pub end: DateTime<Utc>,
    /// Seconds between two samples (at least 1)
    pub sample_interval_seconds: u32,
    /// Configured limit zones 1..3
    pub limits: [LimitZone; 3],
    /// Time accumulated in each limit zone, in seconds
    pub timers: [u32; 3],
}

impl TimingInfo {
    pub fn start_epoch_seconds(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_epoch_seconds(&self) -> i64 {
        self.end.timestamp()
    }
}

/// Athlete settings stored on the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonalProfile {
    /// Which of the three limit zones was active
    pub active_limit: u8,
    pub max_heartrate: u16,
    pub rest_heartrate: u16,
    pub vo2max: u16,
    /// Weight in kg (lb for imperial files)
    pub weight: u16,
}

/// One heart rate zone, bounds inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HrZone {
    pub lower_bpm: u16,
    pub upper_bpm: u16,
}

impl HrZone {
    /// A zone with an upper bound of 0 was not configured on the monitor.
    pub fn is_unused(&self) -> bool {
        self.upper_bpm == 0
    }

    pub fn contains(&self, bpm: u16) -> bool {
        bpm >= self.lower_bpm && bpm <= self.upper_bpm
    }
}

/// The ten zones of the `HRZones` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HrZoneTable {
    zones: [HrZone; HR_ZONE_COUNT],
}

impl HrZoneTable {
    /// Pair adjacent boundaries: `zone[i] = (boundaries[i + 1], boundaries[i])`.
    ///
    /// Returns `None` unless at least 11 boundaries are given.
    pub fn from_boundaries(boundaries: &[u16]) -> Option<Self> {
        if boundaries.len() < HR_ZONE_COUNT + 1 {
            return None;
        }

        let mut zones = [HrZone::default(); HR_ZONE_COUNT];
        for (i, zone) in zones.iter_mut().enumerate() {
            *zone = HrZone {
                lower_bpm: boundaries[i + 1],
                upper_bpm: boundaries[i],
            };
        }
        Some(Self { zones })
    }

    pub fn zones(&self) -> &[HrZone; HR_ZONE_COUNT] {
        &self.zones
    }

    pub fn get(&self, index: usize) -> Option<&HrZone> {
        self.zones.get(index)
    }

    /// Index of the first zone containing `bpm`, in table order.
    pub fn zone_of(&self, bpm: u16) -> Option<usize> {
        self.zones.iter().position(|zone| zone.contains(bpm))
    }
}

/// Figures from the optional `Trip` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    /// Distance in km (miles)
    pub distance: f64,
    /// Ascent in m (ft)
    pub ascent: i32,
    pub duration_seconds: u32,
    pub avg_altitude: i32,
    pub max_altitude: i32,
    /// Average speed in km/h (mph)
    pub avg_speed: f64,
    /// Maximum speed in km/h (mph)
    pub max_speed: f64,
    pub odometer: f64,
}

/// One row of the `HRData` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// `start + index * interval`, in UTC epoch seconds
    pub timestamp: i64,
    pub heartrate_bpm: u16,
    /// Present only when speed was recorded
    pub speed: Option<f64>,
    /// Present only when altitude was recorded
    pub altitude: Option<i32>,
}

/// The full sample series of an exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn heartrates(&self) -> impl Iterator<Item = u16> + '_ {
        self.samples.iter().map(|s| s.heartrate_bpm)
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// A fully decoded HRM file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HrmExercise {
    pub capabilities: DeviceCapabilities,
    pub timing: TimingInfo,
    pub profile: PersonalProfile,
    pub zones: HrZoneTable,
    /// `None` when the file has no usable `Trip` block
    pub trip: Option<TripSummary>,
    pub samples: SampleSeries,
}

/// The source file could not be read at all.
#[derive(Debug, Error)]
#[error("Failed to read HRM file {path}: {source}")]
pub struct FormatError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Mandatory content is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A mandatory section is absent
    #[error("Missing section [{0}]")]
    MissingSection(String),

    /// A mandatory `Params` key is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A field could not be parsed
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// `HRZones` holds fewer than 11 boundaries
    #[error("Expected {expected} zone boundaries, found {found}")]
    ZoneBoundaries { expected: usize, found: usize },
}

impl DecodeError {
    pub(crate) fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        DecodeError::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Errors from reading and decoding one HRM file.
#[derive(Debug, Error)]
pub enum HrmError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
