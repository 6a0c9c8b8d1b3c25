use footprint_schemas::input::CalculatorInput;
use serde::Serialize;
use tracing::{debug, warn};

const MAX_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Not a finite number; treated as 0.
    NonNumeric,
    /// Below zero; treated as 0.
    Negative,
    /// A percentage above 100; treated as 100.
    AboveMaximum,
}

/// A non-fatal coercion applied to one input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizationIssue {
    pub field: &'static str,
    pub kind: IssueKind,
}

/// Calculator input after every field has been coerced into range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizedInput {
    pub car_miles_per_day: f64,
    pub flights_per_day: f64,
    pub public_transport_miles_per_day: f64,
    pub electricity_kwh_per_day: f64,
    pub gas_therms_per_day: f64,
    pub renewable_percent: f64,
    pub meat_meals_per_day: f64,
    pub dairy_servings_per_day: f64,
    pub local_food_percent: f64,
    pub waste_bags_per_day: f64,
    pub recycling_percent: f64,
    pub shopping_spend_per_day: f64,
    pub electronics_items_per_day: f64,
    pub issues: Vec<SanitizationIssue>,
}

/// Coerces every field to `max(0, value)`, percentages additionally capped at
/// 100. Absent, non-numeric and negative values all become 0.
pub fn sanitize(input: &CalculatorInput) -> SanitizedInput {
    let mut issues = Vec::new();
    let mut quantity =
        |field: &'static str, raw: Option<f64>| sanitize_field(field, raw, None, &mut issues);

    let car_miles_per_day = quantity("carMilesPerDay", input.car_miles_per_day);
    let flights_per_day = quantity("flightsPerDay", input.flights_per_day);
    let public_transport_miles_per_day =
        quantity("publicTransportMilesPerDay", input.public_transport_miles_per_day);
    let electricity_kwh_per_day = quantity("electricityKwhPerDay", input.electricity_kwh_per_day);
    let gas_therms_per_day = quantity("gasThermsPerDay", input.gas_therms_per_day);
    let meat_meals_per_day = quantity("meatMealsPerDay", input.meat_meals_per_day);
    let dairy_servings_per_day = quantity("dairyServingsPerDay", input.dairy_servings_per_day);
    let waste_bags_per_day = quantity("wasteBagsPerDay", input.waste_bags_per_day);
    let shopping_spend_per_day = quantity("shoppingSpendPerDay", input.shopping_spend_per_day);
    let electronics_items_per_day =
        quantity("electronicsItemsPerDay", input.electronics_items_per_day);

    let mut percent = |field: &'static str, raw: Option<f64>| {
        sanitize_field(field, raw, Some(MAX_PERCENT), &mut issues)
    };
    let renewable_percent = percent("renewablePercent", input.renewable_percent);
    let local_food_percent = percent("localFoodPercent", input.local_food_percent);
    let recycling_percent = percent("recyclingPercent", input.recycling_percent);

    SanitizedInput {
        car_miles_per_day,
        flights_per_day,
        public_transport_miles_per_day,
        electricity_kwh_per_day,
        gas_therms_per_day,
        renewable_percent,
        meat_meals_per_day,
        dairy_servings_per_day,
        local_food_percent,
        waste_bags_per_day,
        recycling_percent,
        shopping_spend_per_day,
        electronics_items_per_day,
        issues,
    }
}

fn sanitize_field(
    field: &'static str,
    raw: Option<f64>,
    max: Option<f64>,
    issues: &mut Vec<SanitizationIssue>,
) -> f64 {
    let Some(value) = raw else {
        debug!(field, "input field absent, using 0");
        return 0.0;
    };

    let (sanitized, kind) = if !value.is_finite() {
        (0.0, Some(IssueKind::NonNumeric))
    } else if value < 0.0 {
        (0.0, Some(IssueKind::Negative))
    } else {
        match max {
            Some(max) if value > max => (max, Some(IssueKind::AboveMaximum)),
            _ => (value, None),
        }
    };

    if let Some(kind) = kind {
        warn!(field, raw = value, sanitized, ?kind, "input field sanitized");
        issues.push(SanitizationIssue { field, kind });
    }
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zero_without_issues() {
        let sanitized = sanitize(&CalculatorInput::default());
        assert_eq!(sanitized, SanitizedInput::default());
    }

    #[test]
    fn negative_and_nan_become_zero() {
        let input = CalculatorInput {
            car_miles_per_day: Some(-5.0),
            gas_therms_per_day: Some(f64::NAN),
            flights_per_day: Some(f64::INFINITY),
            ..CalculatorInput::default()
        };
        let sanitized = sanitize(&input);
        assert_eq!(sanitized.car_miles_per_day, 0.0);
        assert_eq!(sanitized.gas_therms_per_day, 0.0);
        assert_eq!(sanitized.flights_per_day, 0.0);
        assert_eq!(
            sanitized.issues,
            vec![
                SanitizationIssue { field: "carMilesPerDay", kind: IssueKind::Negative },
                SanitizationIssue { field: "flightsPerDay", kind: IssueKind::NonNumeric },
                SanitizationIssue { field: "gasThermsPerDay", kind: IssueKind::NonNumeric },
            ]
        );
    }

    #[test]
    fn percentages_are_clamped_to_range() {
        let input = CalculatorInput {
            renewable_percent: Some(150.0),
            local_food_percent: Some(-10.0),
            recycling_percent: Some(100.0),
            ..CalculatorInput::default()
        };
        let sanitized = sanitize(&input);
        assert_eq!(sanitized.renewable_percent, 100.0);
        assert_eq!(sanitized.local_food_percent, 0.0);
        assert_eq!(sanitized.recycling_percent, 100.0);
        assert_eq!(sanitized.issues.len(), 2);
    }

    #[test]
    fn large_quantities_are_not_capped() {
        let input = CalculatorInput {
            shopping_spend_per_day: Some(250.0),
            ..CalculatorInput::default()
        };
        assert_eq!(sanitize(&input).shopping_spend_per_day, 250.0);
    }

    #[test]
    fn non_finite_yaml_values_are_reported() {
        let input: CalculatorInput =
            serde_yaml::from_str("carMilesPerDay: .nan\ngasThermsPerDay: .inf\nflightsPerDay: abc\n")
                .unwrap();
        let sanitized = sanitize(&input);
        let fields: Vec<_> = sanitized.issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["carMilesPerDay", "flightsPerDay", "gasThermsPerDay"]);
        assert!(sanitized
            .issues
            .iter()
            .all(|i| i.kind == IssueKind::NonNumeric));
        assert_eq!(sanitized.gas_therms_per_day, 0.0);
    }
}
