//! Building export records from decoded exercises.
//!
//! Duration comes from the `Params` length and distance is the untruncated
//! trip distance; the trip block's own duration is not used.

use std::path::Path;

use crate::export::types::{ExerciseRecord, DEFAULT_INTENSITY};
use crate::hrm::types::HrmExercise;
use crate::metrics::summary::ExerciseSummary;

/// Date layout of the `date` element.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl ExerciseRecord {
    /// Build the record for `exercise`. `hrm_file` should already be
    /// absolute since it is the duplicate key of the exercise list.
    pub fn from_exercise(
        id: u32,
        sport_type_id: u32,
        sport_subtype_id: u32,
        exercise: &HrmExercise,
        hrm_file: &Path,
    ) -> Self {
        let summary = ExerciseSummary::of(exercise);
        if summary.avg_heartrate.is_none() {
            tracing::warn!(
                "{} has no heart rate samples, writing an average of 0",
                hrm_file.display()
            );
        }

        Self {
            id,
            sport_type_id,
            sport_subtype_id,
            date: exercise.timing.start,
            duration_seconds: exercise.timing.duration_seconds,
            intensity: DEFAULT_INTENSITY,
            distance: exercise.trip.as_ref().map_or(0.0, |trip| trip.distance),
            avg_speed: summary.avg_speed,
            avg_heartrate: summary.avg_heartrate.unwrap_or(0),
            hrm_file: hrm_file.to_path_buf(),
        }
    }

    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Child elements in document order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("sport-type-id", self.sport_type_id.to_string()),
            ("sport-subtype-id", self.sport_subtype_id.to_string()),
            ("date", self.formatted_date()),
            ("duration", self.duration_seconds.to_string()),
            ("intensity", self.intensity.to_string()),
            ("distance", self.distance.to_string()),
            ("avg-speed", self.avg_speed.to_string()),
            ("avg-heartrate", self.avg_heartrate.to_string()),
            ("hrm-file", self.hrm_file.display().to_string()),
        ]
    }
}
