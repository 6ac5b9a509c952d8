//! Printable session statistics for one exercise.
//!
//! The report collects device, personal and trip figures together with the
//! time spent in each configured zone. It renders as plain text through
//! `Display` or as JSON through serde.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::hrm::types::{DeviceCapabilities, HrmExercise, LimitZone, TripSummary};
use crate::metrics::summary::ExerciseSummary;
use crate::metrics::zones::ZoneShare;

/// Unit system of an HRM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// km, km/h, m, kg
    #[default]
    Metric,
    /// miles, mph, ft, lb
    Imperial,
}

impl Units {
    pub fn from_capabilities(caps: &DeviceCapabilities) -> Self {
        if caps.us_imperial_units {
            Units::Imperial
        } else {
            Units::Metric
        }
    }

    pub fn distance(&self) -> &'static str {
        match self {
            Units::Metric => "km",
            Units::Imperial => "miles",
        }
    }

    pub fn speed(&self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }

    pub fn altitude(&self) -> &'static str {
        match self {
            Units::Metric => "m",
            Units::Imperial => "ft",
        }
    }

    pub fn weight(&self) -> &'static str {
        match self {
            Units::Metric => "kg",
            Units::Imperial => "lb",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Metric => write!(f, "Metric"),
            Units::Imperial => write!(f, "Imperial"),
        }
    }
}

/// Statistics listing for one exercise.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub source: Option<String>,
    pub units: Units,
    pub version: String,
    pub device: String,
    pub interval_seconds: u32,
    pub limits: [LimitZone; 3],
    pub weight: u16,
    pub max_heartrate: u16,
    pub rest_heartrate: u16,
    pub vo2max: u16,
    pub data_present: Vec<&'static str>,
    pub trip: Option<TripSummary>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_seconds: u32,
    pub avg_heartrate: Option<u16>,
    pub avg_speed: f64,
    pub zones: Vec<ZoneShare>,
}

impl SessionReport {
    pub fn new(exercise: &HrmExercise, summary: &ExerciseSummary) -> Self {
        let caps = &exercise.capabilities;
        Self {
            source: None,
            units: Units::from_capabilities(caps),
            version: caps.version.clone(),
            device: caps.monitor.to_string(),
            interval_seconds: exercise.timing.sample_interval_seconds,
            limits: exercise.timing.limits,
            weight: exercise.profile.weight,
            max_heartrate: exercise.profile.max_heartrate,
            rest_heartrate: exercise.profile.rest_heartrate,
            vo2max: exercise.profile.vo2max,
            data_present: data_present(caps),
            trip: exercise.trip.clone(),
            start: exercise.timing.start,
            end: exercise.timing.end,
            duration_seconds: exercise.timing.duration_seconds,
            avg_heartrate: summary.avg_heartrate,
            avg_speed: summary.avg_speed,
            zones: summary.occupancy.shares(&exercise.zones),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Names of the recorded data channels.
pub fn data_present(caps: &DeviceCapabilities) -> Vec<&'static str> {
    let mut present = Vec::new();
    if caps.speed {
        present.push("speed");
    }
    if caps.cadence {
        present.push("cadence");
    }
    if caps.altitude {
        present.push("altitude");
    }
    if caps.power {
        present.push("power");
    }
    if caps.power_balance {
        present.push("power balance");
    }
    if caps.power_pedal_index {
        present.push("pedalling index");
    }
    if caps.heartrate_or_cycling_mode {
        present.push("cycling data");
    }
    present.push("heart rate");
    if caps.air_pressure {
        present.push("air pressure");
    }
    present
}

/// `H:MM:SS`.
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds % 60)
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.units;

        if let Some(source) = &self.source {
            writeln!(f, "==== {} ====", source)?;
        }

        writeln!(f, ">>>> Device info <<<<")?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Device: {}", self.device)?;
        writeln!(f, "Interval(s): {}", self.interval_seconds)?;

        writeln!(f, ">>>> Personal info <<<<")?;
        let limits: Vec<String> = self
            .limits
            .iter()
            .map(|l| format!("{}-{}", l.lower_bpm, l.upper_bpm))
            .collect();
        writeln!(f, "Limits: {}", limits.join(", "))?;
        writeln!(f, "Weight: {} {}", self.weight, units.weight())?;
        writeln!(f, "Max. HR: {}", self.max_heartrate)?;
        writeln!(f, "Rest HR: {}", self.rest_heartrate)?;
        writeln!(f, "VO2max: {}", self.vo2max)?;

        writeln!(f, ">>>> Data info <<<<")?;
        writeln!(f, "Data present: {}", self.data_present.join(", "))?;
        match &self.trip {
            Some(trip) => {
                writeln!(f, "Odometer: {}", trip.odometer)?;
                writeln!(f, "Max. speed: {:.1} {}", trip.max_speed, units.speed())?;
                writeln!(f, "Avg. speed: {:.1} {}", trip.avg_speed, units.speed())?;
                writeln!(f, "Distance: {:.1} {}", trip.distance, units.distance())?;
                writeln!(f, "Ascent: {} {}", trip.ascent, units.altitude())?;
            }
            None => writeln!(f, "Trip: no trip data available")?,
        }
        writeln!(
            f,
            "Start time({}): {}",
            self.start.timestamp(),
            self.start.format("%a %b %e %H:%M:%S %Y")
        )?;
        writeln!(
            f,
            "End time({}):   {}",
            self.end.timestamp(),
            self.end.format("%a %b %e %H:%M:%S %Y")
        )?;
        writeln!(f, "Duration: {}", format_duration(self.duration_seconds))?;
        if let Some(trip) = &self.trip {
            writeln!(f, "Trip duration: {}", format_duration(trip.duration_seconds))?;
            writeln!(f, "Avg. altitude: {} {}", trip.avg_altitude, units.altitude())?;
            writeln!(f, "Max. altitude: {} {}", trip.max_altitude, units.altitude())?;
        }
        match self.avg_heartrate {
            Some(bpm) => writeln!(f, "Avg. HR: {}", bpm)?,
            None => writeln!(f, "Avg. HR: -")?,
        }
        writeln!(f, "Avg. speed (distance/duration): {:.1} {}", self.avg_speed, units.speed())?;

        for zone in &self.zones {
            writeln!(
                f,
                "Zone {:03} .. {:03}: {:5.2} %",
                zone.lower_bpm, zone.upper_bpm, zone.percent
            )?;
        }

        Ok(())
    }
}
