use chrono::{TimeZone, Utc};
use footprint_core::{
    compare,
    comparison::{compare_totals, compare_with_deadband},
};
use footprint_schemas::result::{
    CalculationResult, CarbonLogEntry, CategoryBreakdown, ComparisonResult, Direction,
    MIXED_CATEGORY,
};

fn result(co2e_tonnes: f64) -> CalculationResult {
    CalculationResult {
        co2e_tonnes,
        breakdown_tonnes: CategoryBreakdown::default(),
        timestamp: Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap(),
        category: MIXED_CATEGORY.to_string(),
    }
}

fn logged(co2e: f64) -> CarbonLogEntry {
    CarbonLogEntry {
        co2e,
        timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        category: MIXED_CATEGORY.to_string(),
    }
}

#[test]
fn no_history_yields_none() {
    assert_eq!(compare(&result(1.0), None), ComparisonResult::no_history());
}

#[test]
fn non_positive_previous_is_treated_as_no_history() {
    for previous in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let comparison = compare(&result(1.0), Some(&logged(previous)));
        assert_eq!(comparison.direction, Direction::NoHistory);
        assert_eq!(comparison.delta, None);
        assert_eq!(comparison.percent_change, None);
    }
}

#[test]
fn small_changes_fall_inside_the_deadband() {
    let comparison = compare(&result(1.00), Some(&logged(1.005)));
    assert_eq!(comparison.direction, Direction::Unchanged);
    assert!((comparison.delta.unwrap() + 0.005).abs() < 1e-12);
}

#[test]
fn increase_beyond_deadband() {
    let comparison = compare(&result(1.02), Some(&logged(1.00)));
    assert_eq!(comparison.direction, Direction::Increase);
    assert!((comparison.percent_change.unwrap() - 2.0).abs() < 1e-9);
}

#[test]
fn reduction_beyond_deadband() {
    let comparison = compare(&result(0.5), Some(&logged(1.0)));
    assert_eq!(comparison.direction, Direction::Reduction);
    assert!((comparison.delta.unwrap() + 0.5).abs() < 1e-12);
    assert!((comparison.percent_change.unwrap() + 50.0).abs() < 1e-9);
}

#[test]
fn drop_to_zero_is_a_full_reduction() {
    let comparison = compare(&result(0.0), Some(&logged(0.2)));
    assert_eq!(comparison.direction, Direction::Reduction);
    assert!((comparison.percent_change.unwrap() + 100.0).abs() < 1e-9);
}

#[test]
fn custom_deadband_widens_unchanged_band() {
    let comparison = compare_with_deadband(&result(1.04), Some(&logged(1.0)), 0.05);
    assert_eq!(comparison.direction, Direction::Unchanged);
}

#[test]
fn zero_deadband_reports_any_change() {
    assert_eq!(compare_totals(1.001, Some(1.0), 0.0).direction, Direction::Increase);
    assert_eq!(compare_totals(1.0, Some(1.0), 0.0).direction, Direction::Unchanged);
}
