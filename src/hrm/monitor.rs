//! Polar monitor models by `Monitor` index.

use serde::Serialize;

/// Model names indexed by the `Monitor` value of the `Params` block.
const MONITOR_MODELS: [&str; 37] = [
    "NO_MONITOR",
    "Polar Sport Tester / Vantage XL",
    "Polar Vantage NV (VNV)",
    "Polar Accurex Plus",
    "Polar XTrainer Plus",
    "NONE_5",
    "Polar S520",
    "Polar Coach",
    "Polar S210",
    "Polar S410",
    "Polar S510",
    "Polar S610 / S610i",
    "Polar S710 / S710i / S720i",
    "Polar S810 / S810i",
    "Polar E600",
    "NONE_15",
    "NONE_16",
    "NONE_17",
    "NONE_18",
    "Polar AXN500",
    "Polar AXN700",
    "Polar S625X / S725X",
    "Polar S725",
    "NONE_23",
    "NONE_24",
    "NONE_25",
    "NONE_26",
    "NONE_27",
    "NONE_28",
    "NONE_29",
    "NONE_30",
    "NONE_31",
    "NONE_32",
    "NONE_33",
    "NONE_34",
    "NONE_35",
    "Polar RS400",
];

/// Name reported for indices outside the table.
pub const UNKNOWN_MONITOR: &str = "unknown";

/// A monitor model resolved from its numeric index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorModel {
    pub index: u32,
    pub name: &'static str,
}

impl MonitorModel {
    pub fn from_index(index: u32) -> Self {
        let name = usize::try_from(index)
            .ok()
            .and_then(|i| MONITOR_MODELS.get(i))
            .copied()
            .unwrap_or(UNKNOWN_MONITOR);
        Self { index, name }
    }

    pub fn is_known(&self) -> bool {
        self.name != UNKNOWN_MONITOR
    }
}

impl std::fmt::Display for MonitorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
