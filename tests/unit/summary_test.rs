//! Unit tests for exercise summaries.

use hrmimport::hrm::decoder::decode_file;
use hrmimport::metrics::summary::ExerciseSummary;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_minimal_file_summary() {
    let exercise = decode_file(&fixture("minimal.hrm")).unwrap();
    let summary = ExerciseSummary::of(&exercise);

    // (120 + 121 + 123) / 3 = 121.33
    assert_eq!(summary.avg_heartrate, Some(121));
    assert_eq!(summary.avg_speed, 0.0);
}

#[test]
fn test_cycling_summary_uses_trip_distance() {
    let exercise = decode_file(&fixture("cycling.hrm")).unwrap();
    let summary = ExerciseSummary::of(&exercise);

    assert_eq!(summary.avg_heartrate, Some(160));
    // 25.1 km over one hour
    assert!((summary.avg_speed - 25.1).abs() < 1e-9);
}

#[test]
fn test_empty_series_has_no_average() {
    let exercise = decode_file(&fixture("empty_series.hrm")).unwrap();
    let summary = ExerciseSummary::of(&exercise);

    assert!(exercise.samples.is_empty());
    assert_eq!(summary.avg_heartrate, None);
    assert_eq!(summary.occupancy.total_samples(), 0);
}
