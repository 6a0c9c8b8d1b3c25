use anyhow::{Context, Result};
use chrono::Utc;
use footprint_core::{
    comparison::compare_with_deadband,
    history::{self, DateRange, HistorySummary, PeriodComparison},
    insights::{self, ReductionTask},
    log_store::LogStore,
    sanitize::{sanitize, SanitizationIssue},
    EmissionsCalculator,
};
use footprint_schemas::{
    input::CalculatorInput,
    result::{
        CalculationResult, CarbonLogEntry, CategoryBreakdown, ComparisonResult, Direction,
        EmissionCategory,
    },
};
use serde::Serialize;

/// Everything produced by one `calculate` run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationReport {
    pub result: CalculationResult,
    pub comparison: ComparisonResult,
    pub top_category: Option<EmissionCategory>,
    pub tip: &'static str,
    /// Percent of the total per category.
    pub category_shares: CategoryBreakdown,
    pub tasks: Vec<ReductionTask>,
    pub potential_savings_kg: f64,
    pub sanitization_issues: Vec<SanitizationIssue>,
    pub saved: bool,
}

/// Computes a footprint, compares it with the latest logged one and, when
/// `save` is set, appends it to the log.
pub fn run_calculation<S: LogStore>(
    calculator: &EmissionsCalculator,
    input: &CalculatorInput,
    store: &mut S,
    save: bool,
) -> Result<CalculationReport> {
    let sanitized = sanitize(input);
    let result = calculator.compute_sanitized(&sanitized, Utc::now());

    let previous = store.latest().context("Failed to read the footprint log")?;
    let comparison = compare_with_deadband(
        &result,
        previous.as_ref(),
        calculator.model().change_deadband_tonnes,
    );

    if save {
        store
            .append(CarbonLogEntry::from(&result))
            .context("Failed to append to the footprint log")?;
    }

    let top_category = insights::top_category(&result.breakdown_tonnes);
    let breakdown_kg = result
        .breakdown_tonnes
        .scaled(1.0 / calculator.model().kg_to_tonnes);
    let tasks = insights::reduction_tasks(&breakdown_kg);
    Ok(CalculationReport {
        top_category,
        tip: insights::reduction_tip(top_category),
        category_shares: insights::category_shares(&result.breakdown_tonnes),
        potential_savings_kg: insights::potential_savings_kg(&tasks),
        tasks,
        sanitization_issues: sanitized.issues,
        comparison,
        result,
        saved: save,
    })
}

pub fn run_history<S: LogStore>(
    store: &S,
    range: &DateRange,
    deadband_tonnes: f64,
) -> Result<HistorySummary> {
    let entries = store.entries().context("Failed to read the footprint log")?;
    Ok(history::summarize(&entries, range, deadband_tonnes))
}

pub fn run_period_comparison<S: LogStore>(
    store: &S,
    from: &DateRange,
    to: &DateRange,
    deadband_tonnes: f64,
) -> Result<PeriodComparison> {
    let entries = store.entries().context("Failed to read the footprint log")?;
    Ok(history::compare_periods(&entries, from, to, deadband_tonnes))
}

pub fn print_calculation_report(report: &CalculationReport) {
    let result = &report.result;

    println!("\n--- [Footprint Report] ---");
    println!("========================================");
    println!("Daily Footprint by Category:");
    for (category, tonnes) in result.breakdown_tonnes.iter() {
        println!(
            "  - {:<10} {:>10.2} kg CO2e {:>6.1}%",
            category.to_string(),
            tonnes * 1000.0,
            report.category_shares.get(category)
        );
    }
    println!("  --------------------------------------");
    println!(
        "  - Total:     {:>10.2} kg CO2e ({:.2} t)",
        result.co2e_tonnes * 1000.0,
        result.co2e_tonnes
    );

    println!("\nCompared with last logged footprint:");
    println!("  - {}", describe_change(&report.comparison, "last entry"));

    if !report.sanitization_issues.is_empty() {
        println!("\nInputs treated as zero or clamped:");
        for issue in &report.sanitization_issues {
            println!("  - {} ({:?})", issue.field, issue.kind);
        }
    }

    println!("\nTip: {}", report.tip);
    if !report.tasks.is_empty() {
        println!(
            "\nSuggested tasks (potential reduction {:.2} kg CO2e):",
            report.potential_savings_kg
        );
        for (i, task) in report.tasks.iter().enumerate() {
            println!(
                "  {:>2}. {} (~{:.2} kg, {:?})",
                i + 1,
                task.title,
                task.estimated_savings_kg,
                task.difficulty
            );
        }
    }
    if report.saved {
        println!("\nFootprint saved to log.");
    }
    println!("========================================");
}

pub fn print_history_summary(summary: &HistorySummary) {
    println!("\n--- [History Summary] ---");
    println!("========================================");
    println!("{}", history_headline(summary));
    if let Some(average) = summary.average_tonnes {
        println!("  - Average per entry: {:.2} kg CO2e", average * 1000.0);
    }
    if let (Some(lowest), Some(highest)) = (&summary.lowest, &summary.highest) {
        println!(
            "  - Lowest:  {:.2} kg CO2e on {}",
            lowest.co2e * 1000.0,
            lowest.timestamp.date_naive()
        );
        println!(
            "  - Highest: {:.2} kg CO2e on {}",
            highest.co2e * 1000.0,
            highest.timestamp.date_naive()
        );
    }
    if !summary.daily_totals.is_empty() {
        println!("\nDaily totals:");
        for day in &summary.daily_totals {
            println!("  - {}: {:>10.2} kg CO2e", day.date, day.tonnes * 1000.0);
        }
    }
    println!("\nTrend: {}", describe_change(&summary.trend, "previous entry"));
    println!("========================================");
}

pub fn print_period_comparison(comparison: &PeriodComparison) {
    println!("\n--- [Period Comparison] ---");
    println!("========================================");
    println!(
        "  - {}",
        period_line(&comparison.from, comparison.from_total, comparison.from_count)
    );
    println!(
        "  - {}",
        period_line(&comparison.to, comparison.to_total, comparison.to_count)
    );
    println!("\n{}", describe_change(&comparison.change, "previous period"));
    println!("========================================");
}

fn history_headline(summary: &HistorySummary) -> String {
    format!(
        "Found {} entries from {}. Total: {:.2} kg CO2e.",
        summary.entry_count,
        summary.range,
        summary.total_tonnes * 1000.0
    )
}

fn period_line(range: &DateRange, total_tonnes: f64, count: usize) -> String {
    format!(
        "{}: {:.2} kg CO2e over {} entries",
        range,
        total_tonnes * 1000.0,
        count
    )
}

/// Human-readable change, rounded for display.
pub fn describe_change(comparison: &ComparisonResult, against: &str) -> String {
    match (comparison.direction, comparison.delta, comparison.percent_change) {
        (Direction::Reduction, Some(delta), Some(percent)) => format!(
            "Emissions decreased {:.1}% ({:.2} kg) vs {}.",
            percent.abs(),
            delta.abs() * 1000.0,
            against
        ),
        (Direction::Increase, Some(delta), Some(percent)) => format!(
            "Emissions increased {:.1}% (+{:.2} kg) vs {}.",
            percent,
            delta * 1000.0,
            against
        ),
        (Direction::Unchanged, _, _) => format!("Emissions unchanged vs {}.", against),
        _ => format!("No {} to compare against.", against),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::log_store::MemoryLogStore;
    use chrono::NaiveDate;
    use footprint_schemas::{factors::EmissionFactorTable, model::ModelConstants};

    fn calculator() -> EmissionsCalculator {
        EmissionsCalculator::new(EmissionFactorTable::default(), ModelConstants::default()).unwrap()
    }

    fn driving(miles: f64) -> CalculatorInput {
        CalculatorInput {
            car_miles_per_day: Some(miles),
            ..CalculatorInput::default()
        }
    }

    #[test]
    fn first_calculation_has_no_history() {
        let mut store = MemoryLogStore::new();
        let report = run_calculation(&calculator(), &driving(20.0), &mut store, false).unwrap();

        assert_eq!(report.comparison.direction, Direction::NoHistory);
        assert_eq!(report.top_category, Some(EmissionCategory::Transport));
        assert!(store.entries().unwrap().is_empty());
    }

    #[test]
    fn saved_calculation_becomes_the_baseline() {
        let mut store = MemoryLogStore::new();
        run_calculation(&calculator(), &driving(100.0), &mut store, true).unwrap();
        let report = run_calculation(&calculator(), &driving(20.0), &mut store, true).unwrap();

        // 41 kg -> 8.2 kg
        assert_eq!(report.comparison.direction, Direction::Reduction);
        assert!((report.comparison.percent_change.unwrap() + 80.0).abs() < 1e-9);
        assert_eq!(store.entries().unwrap().len(), 2);
    }

    #[test]
    fn sanitization_issues_are_reported() {
        let mut store = MemoryLogStore::new();
        let input = CalculatorInput {
            gas_therms_per_day: Some(-2.0),
            renewable_percent: Some(120.0),
            ..CalculatorInput::default()
        };
        let report = run_calculation(&calculator(), &input, &mut store, false).unwrap();

        let fields: Vec<_> = report.sanitization_issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["gasThermsPerDay", "renewablePercent"]);
        assert_eq!(report.result.co2e_tonnes, 0.0);
        assert!(report.tip.starts_with("Keep tracking"));
    }

    #[test]
    fn change_descriptions_round_for_display() {
        let reduction = ComparisonResult {
            delta: Some(-0.0123),
            percent_change: Some(-12.345),
            direction: Direction::Reduction,
        };
        assert_eq!(
            describe_change(&reduction, "last entry"),
            "Emissions decreased 12.3% (12.30 kg) vs last entry."
        );
        assert_eq!(
            describe_change(&ComparisonResult::no_history(), "last entry"),
            "No last entry to compare against."
        );
    }

    #[test]
    fn report_carries_shares_and_sorted_tasks() {
        let mut store = MemoryLogStore::new();
        let input = CalculatorInput {
            car_miles_per_day: Some(20.0),
            electricity_kwh_per_day: Some(10.0),
            ..CalculatorInput::default()
        };
        let report = run_calculation(&calculator(), &input, &mut store, false).unwrap();

        // 8.2 kg transport, 2.33 kg energy
        let shares = &report.category_shares;
        assert!((shares.transport + shares.energy - 100.0).abs() < 1e-9);
        assert!(shares.transport > shares.energy);
        assert_eq!(report.tasks[0].id, "task_transport_public");
        assert!((report.tasks[0].estimated_savings_kg - 4.92).abs() < 1e-9);
        let total: f64 = report.tasks.iter().map(|t| t.estimated_savings_kg).sum();
        assert_eq!(report.potential_savings_kg, total);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tasks"][0]["estimatedSavingsKg"], 4.92);
        assert!(json["categoryShares"]["transport"].is_number());
    }

    #[test]
    fn totals_are_printed_in_kilograms() {
        let march = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1),
            NaiveDate::from_ymd_opt(2024, 3, 31),
        );
        assert_eq!(
            period_line(&march, 0.055, 3),
            "2024-03-01 to 2024-03-31: 55.00 kg CO2e over 3 entries"
        );

        let entries: Vec<_> = [0.020, 0.021]
            .into_iter()
            .map(|co2e| CarbonLogEntry {
                co2e,
                timestamp: Utc::now(),
                category: "mixed".to_string(),
            })
            .collect();
        let summary = history::summarize(&entries, &DateRange::all(), 0.01);
        assert_eq!(
            history_headline(&summary),
            "Found 2 entries from beginning to now. Total: 41.00 kg CO2e."
        );
    }
}
