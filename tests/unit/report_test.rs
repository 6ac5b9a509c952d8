//! Unit tests for session reports.

use hrmimport::hrm::decoder::decode_file;
use hrmimport::metrics::report::SessionReport;
use hrmimport::metrics::summary::ExerciseSummary;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn report_for(name: &str) -> SessionReport {
    let exercise = decode_file(&fixture(name)).unwrap();
    let summary = ExerciseSummary::of(&exercise);
    SessionReport::new(&exercise, &summary)
}

#[test]
fn test_text_report() {
    let text = report_for("cycling.hrm").to_string();

    assert!(text.contains("Version: 106"));
    assert!(text.contains("Interval(s): 5"));
    assert!(text.contains("Data present: speed, cadence, altitude, heart rate"));
    assert!(text.contains("Distance: 25.1 km"));
    assert!(text.contains("Trip duration: 1:00:00"));
    assert!(text.contains("Avg. HR: 160"));
    assert!(text.contains("Zone 171 .. 190: 50.00 %"));
    assert!(text.contains("Zone 152 .. 171:  0.00 %"));
}

#[test]
fn test_text_report_without_trip() {
    let text = report_for("minimal.hrm").to_string();
    assert!(text.contains("no trip data available"));
    assert!(!text.contains("Trip duration"));
}

#[test]
fn test_imperial_labels() {
    let text = report_for("imperial.hrm").to_string();
    assert!(text.contains("Weight: 72 lb"));
    assert!(text.contains("air pressure"));
}

#[test]
fn test_json_report() {
    let report = report_for("cycling.hrm").with_source("cycling.hrm");
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["source"], "cycling.hrm");
    assert_eq!(json["units"], "metric");
    assert_eq!(json["avg_heartrate"], 160);
    assert_eq!(json["zones"].as_array().unwrap().len(), 6);
    assert_eq!(json["trip"]["ascent"], 120);
}
