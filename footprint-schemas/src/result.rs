use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag carried by every calculation result; one result spans all categories.
pub const MIXED_CATEGORY: &str = "mixed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionCategory {
    Transport,
    Energy,
    Food,
    Waste,
    Shopping,
}

impl EmissionCategory {
    pub const ALL: [EmissionCategory; 5] = [
        EmissionCategory::Transport,
        EmissionCategory::Energy,
        EmissionCategory::Food,
        EmissionCategory::Waste,
        EmissionCategory::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmissionCategory::Transport => "transport",
            EmissionCategory::Energy => "energy",
            EmissionCategory::Food => "food",
            EmissionCategory::Waste => "waste",
            EmissionCategory::Shopping => "shopping",
        }
    }
}

impl fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category amounts. Waste may be negative when recycling outweighs it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub transport: f64,
    pub energy: f64,
    pub food: f64,
    pub waste: f64,
    pub shopping: f64,
}

impl CategoryBreakdown {
    pub fn get(&self, category: EmissionCategory) -> f64 {
        match category {
            EmissionCategory::Transport => self.transport,
            EmissionCategory::Energy => self.energy,
            EmissionCategory::Food => self.food,
            EmissionCategory::Waste => self.waste,
            EmissionCategory::Shopping => self.shopping,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmissionCategory, f64)> + '_ {
        EmissionCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn sum(&self) -> f64 {
        self.transport + self.energy + self.food + self.waste + self.shopping
    }

    /// Multiplies every category by `factor`, e.g. to convert kg to tonnes.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            transport: self.transport * factor,
            energy: self.energy * factor,
            food: self.food * factor,
            waste: self.waste * factor,
            shopping: self.shopping * factor,
        }
    }
}

/// The output of one footprint calculation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Daily total in tonnes CO2e, always >= 0.
    pub co2e_tonnes: f64,
    pub breakdown_tonnes: CategoryBreakdown,
    pub timestamp: DateTime<Utc>,
    pub category: String,
}

/// A persisted footprint record as kept by the log store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonLogEntry {
    /// Tonnes CO2e.
    pub co2e: f64,
    pub timestamp: DateTime<Utc>,
    pub category: String,
}

impl From<&CalculationResult> for CarbonLogEntry {
    fn from(result: &CalculationResult) -> Self {
        Self {
            co2e: result.co2e_tonnes,
            timestamp: result.timestamp,
            category: result.category.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Reduction,
    Increase,
    Unchanged,
    /// No usable previous footprint to compare against.
    #[serde(rename = "none")]
    NoHistory,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Reduction => "reduction",
            Direction::Increase => "increase",
            Direction::Unchanged => "unchanged",
            Direction::NoHistory => "none",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Tonnes; `None` when there is no usable history.
    pub delta: Option<f64>,
    pub percent_change: Option<f64>,
    pub direction: Direction,
}

impl ComparisonResult {
    pub fn no_history() -> Self {
        Self {
            delta: None,
            percent_change: None,
            direction: Direction::NoHistory,
        }
    }
}
