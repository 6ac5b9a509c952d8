//! Heart rate over time chart data.
//!
//! Produces plot-ready points and shaded zone bands. Drawing is left to
//! whatever consumes the data (see `export::csv`).

use serde::Serialize;

use crate::hrm::types::HrmExercise;
use crate::metrics::zones::{Color, HR_ZONE_COLORS};

/// Labels for the first five zone bands, hardest first.
pub const INTENSITY_LABELS: [&str; 5] = [
    "Maximum intensity",
    "Hard intensity",
    "Moderate intensity",
    "Light intensity",
    "Very light intensity",
];

/// One plotted sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Seconds since exercise start
    pub elapsed_seconds: f64,
    pub heartrate_bpm: f64,
}

/// A shaded heart rate band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneBand {
    pub zone_index: usize,
    pub lower_bpm: u16,
    pub upper_bpm: u16,
    /// Only the first five bands are labelled
    pub label: Option<&'static str>,
    pub color: Option<Color>,
}

/// Everything needed to draw the heart rate chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
    pub bands: Vec<ZoneBand>,
    /// Upper bound of the time axis in seconds
    pub max_elapsed: f64,
    /// Upper bound of the heart rate axis
    pub max_heartrate: f64,
}

impl ChartData {
    pub fn from_exercise(exercise: &HrmExercise) -> Self {
        let start = exercise.timing.start_epoch_seconds();
        let points: Vec<ChartPoint> = exercise
            .samples
            .iter()
            .map(|sample| ChartPoint {
                elapsed_seconds: (sample.timestamp - start) as f64,
                heartrate_bpm: f64::from(sample.heartrate_bpm),
            })
            .collect();

        // Zones with a lower bound of 0 are not drawn
        let bands = exercise
            .zones
            .zones()
            .iter()
            .enumerate()
            .filter(|(_, zone)| zone.lower_bpm != 0)
            .map(|(zone_index, zone)| ZoneBand {
                zone_index,
                lower_bpm: zone.lower_bpm,
                upper_bpm: zone.upper_bpm,
                label: INTENSITY_LABELS.get(zone_index).copied(),
                color: HR_ZONE_COLORS.get(zone_index).copied(),
            })
            .collect();

        let (max_elapsed, max_heartrate) = compute_chart_bounds(&points);

        Self {
            points,
            bands,
            max_elapsed,
            max_heartrate,
        }
    }
}

/// X (seconds) and Y (bpm) bounds for the chart. The time axis spans at
/// least one second.
pub fn compute_chart_bounds(points: &[ChartPoint]) -> (f64, f64) {
    let highest = points
        .iter()
        .map(|p| p.heartrate_bpm)
        .fold(0.0_f64, f64::max);

    let duration = points.last().map_or(1.0, |p| p.elapsed_seconds).max(1.0);

    (duration, highest.round())
}
