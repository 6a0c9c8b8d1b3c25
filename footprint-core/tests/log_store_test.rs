use chrono::{TimeZone, Utc};
use footprint_core::{
    log_store::{CsvLogStore, LogStore, MemoryLogStore},
    EmissionsCalculator,
};
use footprint_schemas::{
    factors::EmissionFactorTable,
    input::CalculatorInput,
    model::ModelConstants,
    result::{CarbonLogEntry, MIXED_CATEGORY},
};
use std::fs;

fn entry(co2e: f64, day: u32) -> CarbonLogEntry {
    CarbonLogEntry {
        co2e,
        timestamp: Utc.with_ymd_and_hms(2024, 4, day, 12, 0, 0).unwrap(),
        category: MIXED_CATEGORY.to_string(),
    }
}

#[test]
fn missing_file_is_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLogStore::new(dir.path().join("log.csv"));
    assert!(store.entries().unwrap().is_empty());
    assert!(store.latest().unwrap().is_none());
}

#[test]
fn appends_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("log.csv");

    let mut store = CsvLogStore::new(&path);
    store.append(entry(0.012, 2)).unwrap();
    store.append(entry(0.009, 5)).unwrap();
    store.append(entry(0.015, 3)).unwrap();

    let reopened = CsvLogStore::new(&path);
    let entries = reopened.entries().unwrap();
    assert_eq!(entries, vec![entry(0.012, 2), entry(0.009, 5), entry(0.015, 3)]);
    assert_eq!(reopened.latest().unwrap(), Some(entry(0.009, 5)));

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.matches("co2e,timestamp,category").count(), 1);
}

#[test]
fn corrupt_row_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    fs::write(&path, "co2e,timestamp,category\nabc,not-a-date,mixed\n").unwrap();

    let err = CsvLogStore::new(&path).entries().unwrap_err();
    assert!(!err.is_configuration_error());
    assert!(err.to_string().contains("log.csv"));
}

#[test]
fn calculation_round_trip_through_memory_store() {
    let calculator =
        EmissionsCalculator::new(EmissionFactorTable::default(), ModelConstants::default()).unwrap();
    let mut store = MemoryLogStore::new();

    let first = calculator.compute_at(
        &CalculatorInput {
            car_miles_per_day: Some(30.0),
            ..CalculatorInput::default()
        },
        Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap(),
    );
    store.append(CarbonLogEntry::from(&first)).unwrap();

    let latest = store.latest().unwrap().unwrap();
    assert_eq!(latest.co2e, first.co2e_tonnes);
    assert_eq!(latest.timestamp, first.timestamp);
    assert_eq!(latest.category, "mixed");
}
