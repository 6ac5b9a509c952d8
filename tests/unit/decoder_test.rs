//! Unit tests for decoding complete HRM files.

use chrono::{TimeZone, Utc};
use hrmimport::hrm::decoder::{decode_file, decode_str};
use hrmimport::hrm::types::{DecodeError, HrmError};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_decode_cycling_file() {
    let exercise = decode_file(&fixture("cycling.hrm")).unwrap();

    let caps = &exercise.capabilities;
    assert!(caps.speed && caps.cadence && caps.altitude);
    assert!(!caps.power);
    assert!(!caps.us_imperial_units);

    // 10:15:07.5 rounds up to the next second
    assert_eq!(
        exercise.timing.start,
        Utc.with_ymd_and_hms(2009, 3, 10, 10, 15, 8).unwrap()
    );
    assert_eq!(exercise.timing.duration_seconds, 3600);
    assert_eq!(
        exercise.timing.end_epoch_seconds() - exercise.timing.start_epoch_seconds(),
        3600
    );

    let samples = exercise.samples.as_slice();
    assert_eq!(samples.len(), 4);
    assert_eq!(samples[0].heartrate_bpm, 130);
    assert_eq!(samples[0].speed, Some(25.3));
    // Altitude sits after speed and cadence
    assert_eq!(samples[0].altitude, Some(310));
    assert_eq!(samples[3].timestamp - samples[0].timestamp, 15);

    let trip = exercise.trip.as_ref().unwrap();
    assert!((trip.distance - 25.1).abs() < 1e-9);
    assert_eq!(trip.ascent, 120);
    assert!((trip.max_speed - 41.2).abs() < 1e-9);
    assert_eq!(trip.odometer, 1234.0);
}

#[test]
fn test_decode_version_107_flags() {
    let exercise = decode_file(&fixture("imperial.hrm")).unwrap();

    assert_eq!(exercise.capabilities.version, "107");
    assert!(exercise.capabilities.us_imperial_units);
    assert!(exercise.capabilities.air_pressure);
    assert!(!exercise.capabilities.speed);
}

#[test]
fn test_decode_without_trip() {
    let exercise = decode_file(&fixture("minimal.hrm")).unwrap();

    assert!(exercise.trip.is_none());
    assert_eq!(exercise.samples.len(), 3);
    assert_eq!(exercise.samples.as_slice()[0].speed, None);
}

#[test]
fn test_missing_field_is_decode_error() {
    let err = decode_file(&fixture("missing_maxhr.hrm")).unwrap_err();
    assert!(matches!(
        err,
        HrmError::Decode(DecodeError::MissingField(ref field)) if field == "MaxHR"
    ));
}

#[test]
fn test_missing_file_is_format_error() {
    let err = decode_file(&fixture("does_not_exist.hrm")).unwrap_err();
    assert!(matches!(err, HrmError::Format(_)));
}

#[test]
fn test_missing_section_is_decode_error() {
    let content = std::fs::read_to_string(fixture("minimal.hrm")).unwrap();
    let without_zones = content.replace("[HRZones]", "[Zones]");

    assert_eq!(
        decode_str(&without_zones).unwrap_err(),
        DecodeError::MissingSection("HRZones".to_string())
    );
}

#[test]
fn test_oversized_length_is_decode_error() {
    let content = std::fs::read_to_string(fixture("minimal.hrm")).unwrap();
    let oversized = content.replace("Length=00:30:00.0", "Length=2000000:00:00.0");

    assert_eq!(
        decode_str(&oversized).unwrap_err(),
        DecodeError::InvalidValue {
            field: "Length".to_string(),
            value: "2000000:00:00.0".to_string(),
        }
    );
}

#[test]
fn test_trip_with_bad_ascent_is_dropped() {
    let content = std::fs::read_to_string(fixture("cycling.hrm")).unwrap();
    let bad_ascent = content.replace("[Trip]\n251\n120\n", "[Trip]\n251\nabc\n");
    assert_ne!(bad_ascent, content);

    let exercise = decode_str(&bad_ascent).unwrap();
    assert!(exercise.trip.is_none());
    assert_eq!(exercise.samples.len(), 4);
    assert_eq!(exercise.samples.as_slice()[2].altitude, Some(315));
}

#[test]
fn test_trip_with_bad_odometer_is_dropped() {
    let content = std::fs::read_to_string(fixture("cycling.hrm")).unwrap();
    let bad_odometer = content.replace("1234\n\n[HRData]", "12x4\n\n[HRData]");
    assert_ne!(bad_odometer, content);

    let exercise = decode_str(&bad_odometer).unwrap();
    assert!(exercise.trip.is_none());
    assert_eq!(exercise.samples.len(), 4);
}

#[test]
fn test_decoding_is_idempotent() {
    let first = decode_file(&fixture("cycling.hrm")).unwrap();
    let second = decode_file(&fixture("cycling.hrm")).unwrap();
    assert_eq!(first, second);
}
