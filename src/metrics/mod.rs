//! Statistics derived from decoded exercises: zone occupancy, averages,
//! printable session reports and chart data.

pub mod chart;
pub mod report;
pub mod summary;
pub mod zones;

pub use chart::{compute_chart_bounds, ChartData, ChartPoint, ZoneBand, INTENSITY_LABELS};
pub use report::{SessionReport, Units};
pub use summary::{average_heartrate, average_speed, summarize, ExerciseSummary};
pub use zones::{Color, ZoneOccupancy, ZoneShare, HR_ZONE_COLORS};
