use serde::{Deserialize, Serialize};

/// kg CO2e per unit of travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportFactors {
    /// kg CO2e per mile driven.
    pub car: f64,
    /// kg CO2e per km of short-haul flight.
    pub flight_short: f64,
    /// kg CO2e per mile on public transport.
    pub public_transport: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyFactors {
    /// kg CO2e per kWh.
    pub electricity: f64,
    /// kg CO2e per therm.
    pub gas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FoodFactors {
    pub meat_meal: f64,
    pub dairy_serving: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WasteFactors {
    /// kg CO2e per bag sent to landfill.
    pub waste_bag: f64,
    /// Stored negative; only the magnitude is used as the offset rate.
    pub recycling_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShoppingFactors {
    /// kg CO2e per dollar of general spend.
    pub general: f64,
    /// kg CO2e per electronics item.
    pub electronics: f64,
}

/// The static per-unit emission factors used by every calculation.
///
/// All categories and factors are required when loading from a file. The
/// `Default` value is the built-in table shipped with the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmissionFactorTable {
    pub transport: TransportFactors,
    pub energy: EnergyFactors,
    pub food: FoodFactors,
    pub waste: WasteFactors,
    pub shopping: ShoppingFactors,
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        Self {
            transport: TransportFactors {
                car: 0.41,
                flight_short: 0.255,
                public_transport: 0.14,
            },
            energy: EnergyFactors {
                electricity: 0.233,
                gas: 5.3,
            },
            food: FoodFactors {
                meat_meal: 3.3,
                dairy_serving: 0.6,
            },
            waste: WasteFactors {
                waste_bag: 2.5,
                recycling_offset: -1.2,
            },
            shopping: ShoppingFactors {
                general: 0.5,
                electronics: 70.0,
            },
        }
    }
}

impl EmissionFactorTable {
    /// Flattened `(path, value)` view used for validation and reporting.
    pub fn entries(&self) -> [(&'static str, f64); 11] {
        [
            ("transport.car", self.transport.car),
            ("transport.flight_short", self.transport.flight_short),
            ("transport.public_transport", self.transport.public_transport),
            ("energy.electricity", self.energy.electricity),
            ("energy.gas", self.energy.gas),
            ("food.meat_meal", self.food.meat_meal),
            ("food.dairy_serving", self.food.dairy_serving),
            ("waste.waste_bag", self.waste.waste_bag),
            ("waste.recycling_offset", self.waste.recycling_offset),
            ("shopping.general", self.shopping.general),
            ("shopping.electronics", self.shopping.electronics),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_factor_is_rejected() {
        let yaml = r#"
transport: { car: 0.41, flight_short: 0.255 }
energy: { electricity: 0.233, gas: 5.3 }
food: { meat_meal: 3.3, dairy_serving: 0.6 }
waste: { waste_bag: 2.5, recycling_offset: -1.2 }
shopping: { general: 0.5, electronics: 70.0 }
"#;
        let parsed: Result<EmissionFactorTable, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_category_is_rejected() {
        let yaml = r#"
transport: { car: 0.41, flight_short: 0.255, public_transport: 0.14 }
energy: { electricity: 0.233, gas: 5.3 }
food: { meat_meal: 3.3, dairy_serving: 0.6 }
waste: { waste_bag: 2.5, recycling_offset: -1.2 }
"#;
        let parsed: Result<EmissionFactorTable, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn default_table_round_trips_through_yaml() {
        let table = EmissionFactorTable::default();
        let yaml = serde_yaml::to_string(&table).unwrap();
        let parsed: EmissionFactorTable = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn only_recycling_offset_is_negative_by_default() {
        let negative: Vec<_> = EmissionFactorTable::default()
            .entries()
            .into_iter()
            .filter(|(_, v)| *v < 0.0)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(negative, vec!["waste.recycling_offset"]);
    }
}
