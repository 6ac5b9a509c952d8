//! Heart rate zone occupancy.
//!
//! Counts how many samples fall into each of the ten `HRZones` zones and
//! turns the counts into percentages for reporting.

use serde::{Deserialize, Serialize};

use crate::hrm::types::{HrZoneTable, SampleSeries, HR_ZONE_COUNT};

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Band colors, hardest zone first
pub const HR_ZONE_COLORS: [Color; 5] = [
    Color::new(255, 50, 50),   // Maximum
    Color::new(255, 128, 0),   // Hard
    Color::new(255, 200, 0),   // Moderate
    Color::new(0, 200, 100),   // Light
    Color::new(0, 128, 255),   // Very light
];

/// Sample counts per zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneOccupancy {
    counts: [u32; HR_ZONE_COUNT],
    total_samples: u32,
}

impl ZoneOccupancy {
    /// Count each sample once, into the first zone whose inclusive range
    /// contains its heart rate. Samples outside every zone are only counted
    /// in the total.
    pub fn from_samples(zones: &HrZoneTable, samples: &SampleSeries) -> Self {
        let mut occupancy = Self::default();
        for bpm in samples.heartrates() {
            occupancy.total_samples += 1;
            if let Some(index) = zones.zone_of(bpm) {
                occupancy.counts[index] += 1;
            }
        }
        occupancy
    }

    pub fn count(&self, zone: usize) -> u32 {
        self.counts.get(zone).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[u32; HR_ZONE_COUNT] {
        &self.counts
    }

    /// Samples that landed in some zone.
    pub fn counted(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn total_samples(&self) -> u32 {
        self.total_samples
    }

    /// Share of all samples in `zone`, in percent. 0.0 for an empty series.
    pub fn percentage(&self, zone: usize) -> f64 {
        if self.total_samples == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.count(zone)) / f64::from(self.total_samples)
    }

    /// Percentages for every configured zone, in table order.
    pub fn shares(&self, zones: &HrZoneTable) -> Vec<ZoneShare> {
        zones
            .zones()
            .iter()
            .enumerate()
            .filter(|(_, zone)| !zone.is_unused())
            .map(|(index, zone)| ZoneShare {
                index,
                lower_bpm: zone.lower_bpm,
                upper_bpm: zone.upper_bpm,
                samples: self.count(index),
                percent: self.percentage(index),
            })
            .collect()
    }
}

/// Time-in-zone figure for one configured zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneShare {
    /// Position in the zone table (0-9)
    pub index: usize,
    pub lower_bpm: u16,
    pub upper_bpm: u16,
    pub samples: u32,
    pub percent: f64,
}
