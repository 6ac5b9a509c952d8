//! Unit tests for exercise list documents.

use hrmimport::export::types::ExerciseRecord;
use hrmimport::hrm::decoder::decode_file;
use hrmimport::storage::exercise_list::ExerciseList;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn record(id: u32, name: &str) -> ExerciseRecord {
    let path = fixture(name);
    let exercise = decode_file(&path).unwrap();
    ExerciseRecord::from_exercise(id, 2, 5, &exercise, &path)
}

#[test]
fn test_record_elements_in_order() {
    let mut list = ExerciseList::new();
    list.push(&record(1, "cycling.hrm"));
    let xml = list.to_xml().unwrap();

    let order = [
        "<id>1</id>",
        "<sport-type-id>2</sport-type-id>",
        "<sport-subtype-id>5</sport-subtype-id>",
        "<date>2009-03-10T10:15:08</date>",
        "<duration>3600</duration>",
        "<intensity>NORMAL</intensity>",
        "<distance>25.1</distance>",
        "<avg-speed>25.1</avg-speed>",
        "<avg-heartrate>160</avg-heartrate>",
        "<hrm-file>",
    ];
    let mut position = 0;
    for element in order {
        let found = xml[position..]
            .find(element)
            .unwrap_or_else(|| panic!("{} missing or out of order in {}", element, xml));
        position += found + element.len();
    }
}

#[test]
fn test_empty_series_writes_zero_average() {
    let record = record(1, "empty_series.hrm");
    assert_eq!(record.avg_heartrate, 0);
}

#[test]
fn test_written_list_reads_back() {
    let mut list = ExerciseList::new();
    list.push(&record(4, "cycling.hrm"));
    list.push(&record(5, "minimal.hrm"));

    let reread = ExerciseList::parse(&list.to_xml().unwrap()).unwrap();
    assert_eq!(reread.len(), 2);
    assert_eq!(reread.max_id(), 5);
    assert!(reread.known_hrm_files().contains(fixture("minimal.hrm").as_path()));
}

#[test]
fn test_save_replaces_target() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("exercises.xml");
    std::fs::write(&target, "old content").unwrap();

    let mut list = ExerciseList::new();
    list.push(&record(1, "minimal.hrm"));
    list.save(&target).unwrap();

    let loaded = ExerciseList::load(&target).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(!Path::new(&format!("{}.tmp", target.display())).exists());
}
