//! HRM record decoder.
//!
//! Turns the raw sections of an HRM file into an [`HrmExercise`]. The
//! `Params`, `HRZones` and `HRData` blocks are mandatory; `Trip` is optional
//! and dropped as a whole when it does not fit the expected layout.

use std::path::Path;

use crate::hrm::fields::{self, clock, integer};
use crate::hrm::flags::decode_capabilities;
use crate::hrm::monitor::MonitorModel;
use crate::hrm::sections::{read_sections, read_sections_file, RawSection, Sections};
use crate::hrm::types::{
    DecodeError, DeviceCapabilities, HrZoneTable, HrmError, HrmExercise, LimitZone,
    PersonalProfile, Sample, SampleSeries, TimingInfo, TripSummary, HR_ZONE_COUNT,
};

pub const SECTION_PARAMS: &str = "Params";
pub const SECTION_HR_ZONES: &str = "HRZones";
pub const SECTION_HR_DATA: &str = "HRData";
pub const SECTION_TRIP: &str = "Trip";

/// Number of rows in a complete `Trip` block.
pub const TRIP_ROWS: usize = 8;

/// Decode already split sections.
pub fn decode(sections: &Sections) -> Result<HrmExercise, DecodeError> {
    let params = required_section(sections, SECTION_PARAMS)?;

    let capabilities = decode_device(params)?;
    let timing = decode_timing(params)?;
    let profile = decode_profile(params)?;
    let zones = decode_zones(required_section(sections, SECTION_HR_ZONES)?)?;

    let trip = match sections.get(SECTION_TRIP) {
        Some(section) => {
            let trip = decode_trip(section);
            if trip.is_none() {
                tracing::info!("Trip block does not match the expected layout, ignoring it");
            }
            trip
        }
        None => {
            tracing::info!("No trip data available");
            None
        }
    };

    let samples = decode_samples(
        required_section(sections, SECTION_HR_DATA)?,
        &capabilities,
        &timing,
    )?;

    tracing::debug!(
        "Decoded version {} exercise from {}: {} samples every {}s",
        capabilities.version,
        capabilities.monitor,
        samples.len(),
        timing.sample_interval_seconds
    );

    Ok(HrmExercise {
        capabilities,
        timing,
        profile,
        zones,
        trip,
        samples,
    })
}

/// Decode HRM text.
pub fn decode_str(content: &str) -> Result<HrmExercise, DecodeError> {
    decode(&read_sections(content))
}

/// Read and decode an HRM file from disk.
pub fn decode_file(path: &Path) -> Result<HrmExercise, HrmError> {
    tracing::debug!("Decoding {}", path.display());
    let sections = read_sections_file(path)?;
    Ok(decode(&sections)?)
}

fn required_section<'a>(sections: &'a Sections, name: &str) -> Result<&'a RawSection, DecodeError> {
    sections
        .get(name)
        .ok_or_else(|| DecodeError::MissingSection(name.to_string()))
}

fn param<'a>(params: &'a RawSection, key: &str) -> Result<&'a str, DecodeError> {
    params
        .attribute(key)
        .ok_or_else(|| DecodeError::MissingField(key.to_string()))
}

fn decode_device(params: &RawSection) -> Result<DeviceCapabilities, DecodeError> {
    let version = param(params, "Version")?.trim();
    let monitor = MonitorModel::from_index(integer("Monitor", param(params, "Monitor")?)?);
    decode_capabilities(version, monitor, param(params, "SMode")?)
}

fn decode_timing(params: &RawSection) -> Result<TimingInfo, DecodeError> {
    let date_value = param(params, "Date")?;
    let date =
        fields::packed_date(date_value).ok_or_else(|| DecodeError::invalid("Date", date_value))?;
    let start = fields::start_instant(date, clock("StartTime", param(params, "StartTime")?)?);

    let duration_seconds = clock("Length", param(params, "Length")?)?;

    let interval_value = param(params, "Interval")?;
    let sample_interval_seconds: u32 = integer("Interval", interval_value)?;
    if sample_interval_seconds == 0 {
        return Err(DecodeError::invalid("Interval", interval_value));
    }

    let mut limits = [LimitZone::default(); 3];
    let mut timers = [0u32; 3];
    for i in 0..3 {
        let lower = format!("Lower{}", i + 1);
        let upper = format!("Upper{}", i + 1);
        let timer = format!("Timer{}", i + 1);

        limits[i] = LimitZone {
            lower_bpm: integer(&lower, param(params, &lower)?)?,
            upper_bpm: integer(&upper, param(params, &upper)?)?,
        };
        timers[i] = clock(&timer, param(params, &timer)?)?;
    }

    Ok(TimingInfo {
        start,
        duration_seconds,
        end: start + chrono::Duration::seconds(i64::from(duration_seconds)),
        sample_interval_seconds,
        limits,
        timers,
    })
}

fn decode_profile(params: &RawSection) -> Result<PersonalProfile, DecodeError> {
    Ok(PersonalProfile {
        active_limit: integer("ActiveLimit", param(params, "ActiveLimit")?)?,
        max_heartrate: integer("MaxHR", param(params, "MaxHR")?)?,
        rest_heartrate: integer("RestHR", param(params, "RestHR")?)?,
        vo2max: integer("VO2max", param(params, "VO2max")?)?,
        weight: integer("Weight", param(params, "Weight")?)?,
    })
}

fn decode_zones(section: &RawSection) -> Result<HrZoneTable, DecodeError> {
    let boundaries = section
        .rows
        .iter()
        .filter_map(|row| row.first())
        .map(|token| integer::<u16>(SECTION_HR_ZONES, token))
        .collect::<Result<Vec<_>, _>>()?;

    HrZoneTable::from_boundaries(&boundaries).ok_or(DecodeError::ZoneBoundaries {
        expected: HR_ZONE_COUNT + 1,
        found: boundaries.len(),
    })
}

/// Decode the `Trip` block, or `None` if any of its eight rows is missing or
/// malformed.
pub fn decode_trip(section: &RawSection) -> Option<TripSummary> {
    if section.rows.len() < TRIP_ROWS {
        return None;
    }
    let token = |i: usize| section.first_token(i);

    Some(TripSummary {
        distance: fields::implied_decimal(token(0)?)?,
        ascent: token(1)?.parse().ok()?,
        duration_seconds: token(2)?.parse().ok()?,
        avg_altitude: token(3)?.parse().ok()?,
        max_altitude: token(4)?.parse().ok()?,
        avg_speed: fields::implied_decimal(token(5)?)?,
        max_speed: fields::implied_decimal(token(6)?)?,
        odometer: token(7)?.parse().ok()?,
    })
}

fn decode_samples(
    section: &RawSection,
    caps: &DeviceCapabilities,
    timing: &TimingInfo,
) -> Result<SampleSeries, DecodeError> {
    let start = timing.start_epoch_seconds();
    let interval = i64::from(timing.sample_interval_seconds);
    let altitude_column = caps.altitude_column();

    let samples = section
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<Sample, DecodeError> {
            let column = |index: usize, field: &str| {
                row.get(index)
                    .map(String::as_str)
                    .ok_or_else(|| DecodeError::MissingField(format!("{} row {}", field, i + 1)))
            };

            let heartrate_bpm = integer("HRData heart rate", column(0, "heart rate")?)?;

            let speed = if caps.speed {
                let token = column(1, "speed")?;
                Some(
                    fields::implied_decimal(token)
                        .ok_or_else(|| DecodeError::invalid("HRData speed", token))?,
                )
            } else {
                None
            };

            let altitude = if caps.altitude {
                Some(integer("HRData altitude", column(altitude_column, "altitude")?)?)
            } else {
                None
            };

            Ok(Sample {
                timestamp: start + i as i64 * interval,
                heartrate_bpm,
                speed,
                altitude,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SampleSeries::new(samples))
}
