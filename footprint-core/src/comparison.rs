use footprint_schemas::{
    model::DEFAULT_CHANGE_DEADBAND_TONNES,
    result::{CalculationResult, CarbonLogEntry, ComparisonResult, Direction},
};

/// Compares a fresh result with the most recent logged footprint.
///
/// Absence of history is an expected state and yields `Direction::NoHistory`.
pub fn compare(current: &CalculationResult, previous: Option<&CarbonLogEntry>) -> ComparisonResult {
    compare_with_deadband(current, previous, DEFAULT_CHANGE_DEADBAND_TONNES)
}

pub fn compare_with_deadband(
    current: &CalculationResult,
    previous: Option<&CarbonLogEntry>,
    deadband_tonnes: f64,
) -> ComparisonResult {
    compare_totals(
        current.co2e_tonnes,
        previous.map(|entry| entry.co2e),
        deadband_tonnes,
    )
}

/// Classifies the change from `previous` to `current` (both tonnes).
///
/// `previous` must be a positive finite number, otherwise there is nothing to
/// compare against and the percent change would be undefined.
pub fn compare_totals(
    current: f64,
    previous: Option<f64>,
    deadband_tonnes: f64,
) -> ComparisonResult {
    let previous = match previous {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => return ComparisonResult::no_history(),
    };

    let delta = current - previous;
    let direction = if delta < -deadband_tonnes {
        Direction::Reduction
    } else if delta > deadband_tonnes {
        Direction::Increase
    } else {
        Direction::Unchanged
    };

    ComparisonResult {
        delta: Some(delta),
        percent_change: Some(delta / previous * 100.0),
        direction,
    }
}
