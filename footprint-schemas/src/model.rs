use serde::{Deserialize, Serialize};

/// Each flight is modeled as one short-haul trip of this many km.
pub const DEFAULT_KM_PER_FLIGHT: f64 = 1000.0;
/// Local sourcing never brings the meat-meal multiplier below this.
pub const DEFAULT_MEAT_REDUCTION_FLOOR: f64 = 0.8;
/// Share of meat-meal impact removed at 100% local sourcing.
pub const DEFAULT_MAX_LOCAL_MEAT_REDUCTION: f64 = 0.2;
pub const DEFAULT_KG_TO_TONNES: f64 = 0.001;
/// Changes smaller than this (in tonnes) are reported as unchanged.
pub const DEFAULT_CHANGE_DEADBAND_TONNES: f64 = 0.01;

/// Heuristic constants of the footprint model.
///
/// Each field falls back to its `DEFAULT_*` value when absent from a
/// configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConstants {
    pub km_per_flight: f64,
    pub meat_reduction_floor: f64,
    pub max_local_meat_reduction: f64,
    pub kg_to_tonnes: f64,
    pub change_deadband_tonnes: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            km_per_flight: DEFAULT_KM_PER_FLIGHT,
            meat_reduction_floor: DEFAULT_MEAT_REDUCTION_FLOOR,
            max_local_meat_reduction: DEFAULT_MAX_LOCAL_MEAT_REDUCTION,
            kg_to_tonnes: DEFAULT_KG_TO_TONNES,
            change_deadband_tonnes: DEFAULT_CHANGE_DEADBAND_TONNES,
        }
    }
}
