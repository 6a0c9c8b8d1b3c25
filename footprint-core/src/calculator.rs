use crate::{
    error::FootprintError,
    factors::{self, FactorConfig},
    sanitize::{sanitize, SanitizedInput},
};
use chrono::{DateTime, Utc};
use footprint_schemas::{
    factors::EmissionFactorTable,
    input::CalculatorInput,
    model::ModelConstants,
    result::{CalculationResult, CategoryBreakdown, MIXED_CATEGORY},
};
use tracing::{debug, warn};

/// Maps daily activity quantities to a CO2e footprint.
///
/// The factor table is validated once in [`EmissionsCalculator::new`]; every
/// later [`compute`](EmissionsCalculator::compute) is infallible and pure
/// apart from the timestamp it stamps on the result.
#[derive(Debug, Clone)]
pub struct EmissionsCalculator {
    factors: EmissionFactorTable,
    model: ModelConstants,
}

impl EmissionsCalculator {
    /// # Errors
    ///
    /// Returns a configuration error if any factor or model constant is invalid.
    pub fn new(
        factors: EmissionFactorTable,
        model: ModelConstants,
    ) -> Result<Self, FootprintError> {
        factors::validate(&factors, &model)?;
        Ok(Self { factors, model })
    }

    /// Builds a calculator from an already loaded (and validated) config.
    pub fn from_config(config: &FactorConfig) -> Result<Self, FootprintError> {
        Self::new(config.factors.clone(), config.model.clone())
    }

    pub fn factors(&self) -> &EmissionFactorTable {
        &self.factors
    }

    pub fn model(&self) -> &ModelConstants {
        &self.model
    }

    pub fn compute(&self, input: &CalculatorInput) -> CalculationResult {
        self.compute_at(input, Utc::now())
    }

    /// Same as [`compute`](Self::compute) with a caller-supplied timestamp.
    pub fn compute_at(
        &self,
        input: &CalculatorInput,
        timestamp: DateTime<Utc>,
    ) -> CalculationResult {
        self.compute_sanitized(&sanitize(input), timestamp)
    }

    /// Computes from input the caller has already sanitized, e.g. to report
    /// the sanitization issues alongside the result.
    pub fn compute_sanitized(
        &self,
        sanitized: &SanitizedInput,
        timestamp: DateTime<Utc>,
    ) -> CalculationResult {
        let kg = self.category_kg(sanitized);
        let total_kg = kg.sum();
        let mut co2e_tonnes = total_kg * self.model.kg_to_tonnes;

        if !co2e_tonnes.is_finite() || co2e_tonnes < 0.0 {
            warn!(total_kg, co2e_tonnes, "footprint total out of range, reporting zero");
            co2e_tonnes = 0.0;
        }

        CalculationResult {
            co2e_tonnes,
            breakdown_tonnes: kg.scaled(self.model.kg_to_tonnes),
            timestamp,
            category: MIXED_CATEGORY.to_string(),
        }
    }

    /// Daily kg CO2e per category. Not clamped: waste may be negative.
    pub fn category_kg(&self, input: &SanitizedInput) -> CategoryBreakdown {
        let breakdown = CategoryBreakdown {
            transport: self.transport_kg(input),
            energy: self.energy_kg(input),
            food: self.food_kg(input),
            waste: self.waste_kg(input),
            shopping: self.shopping_kg(input),
        };
        debug!(?breakdown, "category totals (kg/day)");
        breakdown
    }

    fn transport_kg(&self, input: &SanitizedInput) -> f64 {
        let f = &self.factors.transport;
        input.car_miles_per_day * f.car
            + input.flights_per_day * self.model.km_per_flight * f.flight_short
            + input.public_transport_miles_per_day * f.public_transport
    }

    fn energy_kg(&self, input: &SanitizedInput) -> f64 {
        let f = &self.factors.energy;
        let grid_share = 1.0 - input.renewable_percent / 100.0;
        input.electricity_kwh_per_day * f.electricity * grid_share
            + input.gas_therms_per_day * f.gas
    }

    fn food_kg(&self, input: &SanitizedInput) -> f64 {
        let f = &self.factors.food;
        let meat_factor = self.meat_reduction_factor(input.local_food_percent);
        input.meat_meals_per_day * f.meat_meal * meat_factor
            + input.dairy_servings_per_day * f.dairy_serving
    }

    fn meat_reduction_factor(&self, local_food_percent: f64) -> f64 {
        let reduced = 1.0 - (local_food_percent / 100.0) * self.model.max_local_meat_reduction;
        reduced.max(self.model.meat_reduction_floor)
    }

    fn waste_kg(&self, input: &SanitizedInput) -> f64 {
        let f = &self.factors.waste;
        let waste_emissions = input.waste_bags_per_day * f.waste_bag;
        let recycling_offset =
            waste_emissions * (input.recycling_percent / 100.0) * f.recycling_offset.abs();
        waste_emissions - recycling_offset
    }

    fn shopping_kg(&self, input: &SanitizedInput) -> f64 {
        let f = &self.factors.shopping;
        input.shopping_spend_per_day * f.general + input.electronics_items_per_day * f.electronics
    }
}

/// Validates `factors` and computes a footprint with the default model constants.
pub fn compute(
    input: &CalculatorInput,
    factors: &EmissionFactorTable,
) -> Result<CalculationResult, FootprintError> {
    let calculator = EmissionsCalculator::new(factors.clone(), ModelConstants::default())?;
    Ok(calculator.compute(input))
}
