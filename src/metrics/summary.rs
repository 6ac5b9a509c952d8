//! Exercise summary statistics.

use serde::Serialize;

use crate::hrm::types::{HrZoneTable, HrmExercise, SampleSeries};
use crate::metrics::zones::ZoneOccupancy;

/// Derived figures for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSummary {
    pub occupancy: ZoneOccupancy,
    /// Truncated mean heart rate, `None` for an empty series
    pub avg_heartrate: Option<u16>,
    /// Distance per hour of exercise, 0 without distance or duration
    pub avg_speed: f64,
}

impl ExerciseSummary {
    /// Summarize a decoded exercise, using the trip distance and the
    /// exercise length.
    pub fn of(exercise: &HrmExercise) -> Self {
        summarize(
            &exercise.zones,
            &exercise.samples,
            exercise.trip.as_ref().map(|trip| trip.distance),
            exercise.timing.duration_seconds,
        )
    }
}

pub fn summarize(
    zones: &HrZoneTable,
    samples: &SampleSeries,
    distance: Option<f64>,
    duration_seconds: u32,
) -> ExerciseSummary {
    ExerciseSummary {
        occupancy: ZoneOccupancy::from_samples(zones, samples),
        avg_heartrate: average_heartrate(samples),
        avg_speed: average_speed(distance, duration_seconds),
    }
}

/// Mean heart rate truncated to whole beats.
pub fn average_heartrate(samples: &SampleSeries) -> Option<u16> {
    if samples.is_empty() {
        return None;
    }
    let sum: u64 = samples.heartrates().map(u64::from).sum();
    u16::try_from(sum / samples.len() as u64).ok()
}

/// `distance / (duration / 3600)`.
pub fn average_speed(distance: Option<f64>, duration_seconds: u32) -> f64 {
    match distance {
        Some(distance) if duration_seconds > 0 => {
            distance / (f64::from(duration_seconds) / 3600.0)
        }
        _ => 0.0,
    }
}
