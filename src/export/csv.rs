//! CSV export of heart rate chart data.

use crate::export::types::ExportError;
use crate::metrics::chart::ChartData;
use std::io::Write;

/// Export chart points, followed by the zone bands as a second section
/// separated by a blank line.
pub fn export_chart_csv(chart: &ChartData) -> Result<String, ExportError> {
    let mut output = Vec::new();

    writeln!(output, "elapsed_seconds,heart_rate_bpm")
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for point in &chart.points {
        writeln!(output, "{},{}", point.elapsed_seconds, point.heartrate_bpm)
            .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    writeln!(output).map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    writeln!(output, "zone,lower_bpm,upper_bpm,label,color")
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for band in &chart.bands {
        writeln!(
            output,
            "{},{},{},{},{}",
            band.zone_index,
            band.lower_bpm,
            band.upper_bpm,
            band.label.unwrap_or(""),
            band.color.map_or(String::new(), |c| c.to_hex()),
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ExportError::WriteFailed(e.to_string()))
}
