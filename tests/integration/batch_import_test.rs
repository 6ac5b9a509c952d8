//! Integration tests for the batch import workflow.

use hrmimport::import::batch::{
    import_files, BatchImporter, FileOutcome, ImportError, ImportOptions, OutputMode,
};
use hrmimport::storage::exercise_list::ExerciseList;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn options(output: &Path, mode: OutputMode) -> ImportOptions {
    ImportOptions {
        output: output.to_path_buf(),
        mode,
        sport_type_id: 1,
        sport_subtype_id: 1,
        strict: false,
    }
}

fn no_cancel() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

#[test]
fn test_import_minimal_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");

    let report = import_files(
        options(&output, OutputMode::Create),
        &[fixture("minimal.hrm")],
        no_cancel(),
    )
    .unwrap();
    assert_eq!(report.imported, 1);

    let xml = std::fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<id>1</id>"));
    assert!(xml.contains("<duration>1800</duration>"));
    assert!(xml.contains("<distance>0</distance>"));
    assert!(xml.contains("<avg-speed>0</avg-speed>"));
    assert!(xml.contains("<avg-heartrate>121</avg-heartrate>"));
    assert!(xml.contains(&format!(
        "<hrm-file>{}</hrm-file>",
        fixture("minimal.hrm").display()
    )));
}

#[test]
fn test_rerun_skips_known_files() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");
    let files = [fixture("minimal.hrm"), fixture("cycling.hrm")];

    import_files(options(&output, OutputMode::Create), &files, no_cancel()).unwrap();
    let first = std::fs::read_to_string(&output).unwrap();

    let report =
        import_files(options(&output, OutputMode::Append), &files, no_cancel()).unwrap();
    assert_eq!(report.imported, 0);
    assert_eq!(report.duplicates, 2);

    let list = ExerciseList::load(&output).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.max_id(), 2);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), first);
}

#[test]
fn test_same_file_twice_in_one_run() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");
    let mut importer =
        BatchImporter::open(options(&output, OutputMode::Create), no_cancel()).unwrap();

    assert_eq!(
        importer.import_file(&fixture("minimal.hrm")).unwrap(),
        FileOutcome::Imported(1)
    );
    assert_eq!(
        importer.import_file(&fixture("minimal.hrm")).unwrap(),
        FileOutcome::SkippedDuplicate
    );
}

#[test]
fn test_dot_dot_path_is_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");
    let mut importer =
        BatchImporter::open(options(&output, OutputMode::Create), no_cancel()).unwrap();

    let roundabout = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/../fixtures/./minimal.hrm");

    assert_eq!(
        importer.import_file(&fixture("minimal.hrm")).unwrap(),
        FileOutcome::Imported(1)
    );
    assert_eq!(
        importer.import_file(&roundabout).unwrap(),
        FileOutcome::SkippedDuplicate
    );

    importer.finish().unwrap();
    let xml = std::fs::read_to_string(&output).unwrap();
    assert!(!xml.contains(".."));
}

#[test]
fn test_append_preserves_existing_exercises() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");
    std::fs::write(
        &output,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<exercise-list>
  <exercise>
    <id>41</id>
    <sport-type-id>3</sport-type-id>
    <comment>Manual entry &amp; notes</comment>
  </exercise>
</exercise-list>
"#,
    )
    .unwrap();

    let report = import_files(
        options(&output, OutputMode::Append),
        &[fixture("cycling.hrm")],
        no_cancel(),
    )
    .unwrap();
    assert_eq!(report.imported, 1);

    let list = ExerciseList::load(&output).unwrap();
    let exercises: Vec<_> = list.exercises().collect();
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0].child_text("id"), Some("41"));
    assert_eq!(exercises[0].child_text("comment"), Some("Manual entry & notes"));
    assert_eq!(exercises[1].child_text("id"), Some("42"));
}

#[test]
fn test_corrupt_target_aborts_append() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");
    let truncated = "<exercise-list><exercise><id>1</id>";
    std::fs::write(&output, truncated).unwrap();

    let result = import_files(
        options(&output, OutputMode::Append),
        &[fixture("minimal.hrm")],
        no_cancel(),
    );
    assert!(matches!(result, Err(ImportError::CorruptTarget { .. })));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), truncated);
}

#[test]
fn test_existing_output_needs_force_or_append() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");
    std::fs::write(&output, "<exercise-list/>").unwrap();

    let result = import_files(
        options(&output, OutputMode::Create),
        &[fixture("minimal.hrm")],
        no_cancel(),
    );
    assert!(matches!(result, Err(ImportError::OutputExists(_))));

    let report = import_files(
        options(&output, OutputMode::Force),
        &[fixture("minimal.hrm")],
        no_cancel(),
    )
    .unwrap();
    assert_eq!(report.imported, 1);
}

#[test]
fn test_bad_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");

    let report = import_files(
        options(&output, OutputMode::Create),
        &[
            fixture("missing_maxhr.hrm"),
            fixture("minimal.hrm"),
            fixture("not_there.hrm"),
        ],
        no_cancel(),
    )
    .unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(report.failed, 2);
    let list = ExerciseList::load(&output).unwrap();
    assert_eq!(list.max_id(), 1);
}

#[test]
fn test_strict_mode_aborts_on_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");
    let mut strict = options(&output, OutputMode::Create);
    strict.strict = true;

    let result = import_files(
        strict,
        &[fixture("minimal.hrm"), fixture("missing_maxhr.hrm")],
        no_cancel(),
    );

    assert!(matches!(result, Err(ImportError::Decode { .. })));
    assert!(!output.exists());
}

#[test]
fn test_cancelled_run_keeps_completed_records() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("exercises.xml");
    let cancel = no_cancel();

    let mut importer =
        BatchImporter::open(options(&output, OutputMode::Create), cancel.clone()).unwrap();
    importer.import_file(&fixture("minimal.hrm")).unwrap();

    cancel.store(true, std::sync::atomic::Ordering::SeqCst);
    importer.run(&[fixture("cycling.hrm")]).unwrap();
    let report = importer.finish().unwrap();

    assert!(report.interrupted);
    assert_eq!(report.imported, 1);
    assert_eq!(ExerciseList::load(&output).unwrap().len(), 1);
}
