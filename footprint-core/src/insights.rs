use footprint_schemas::result::{CategoryBreakdown, EmissionCategory};
use serde::Serialize;
use std::cmp::Ordering;

/// At most this many tasks are suggested, highest saving first.
pub const MAX_TASKS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A concrete action with its estimated saving in kg CO2e.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionTask {
    pub id: &'static str,
    /// `None` for general advice that is not tied to a category.
    pub category: Option<EmissionCategory>,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub estimated_savings_kg: f64,
}

impl ReductionTask {
    fn new(
        id: &'static str,
        category: Option<EmissionCategory>,
        title: &'static str,
        description: &'static str,
        difficulty: Difficulty,
        estimated_savings_kg: f64,
    ) -> Self {
        Self {
            id,
            category,
            title,
            description,
            difficulty,
            estimated_savings_kg,
        }
    }
}

/// The category contributing most, if any contributes a positive amount.
pub fn top_category(breakdown: &CategoryBreakdown) -> Option<EmissionCategory> {
    breakdown
        .iter()
        .filter(|(_, amount)| *amount > 0.0)
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|(category, _)| category)
}

pub fn reduction_tip(top: Option<EmissionCategory>) -> &'static str {
    match top {
        Some(EmissionCategory::Transport) => {
            "Consider carpooling, using bus/train, or switching to e-bikes for short trips."
        }
        Some(EmissionCategory::Energy) => {
            "Switch to renewable energy providers and use energy-efficient appliances."
        }
        Some(EmissionCategory::Food) => {
            "Reduce meat consumption, especially beef, and choose local/seasonal produce."
        }
        _ => "Keep tracking your emissions to identify reduction opportunities.",
    }
}

/// Percent of the net total contributed by each category. All zero when the
/// total is not positive.
pub fn category_shares(breakdown: &CategoryBreakdown) -> CategoryBreakdown {
    let total = breakdown.sum();
    if !total.is_finite() || total <= 0.0 {
        return CategoryBreakdown::default();
    }
    breakdown.scaled(100.0 / total)
}

/// Suggested tasks for a breakdown in kg CO2e, sorted by estimated saving
/// (highest first) and capped at [`MAX_TASKS`].
///
/// Proportional savings take a fraction of the category amount; the others
/// are fixed estimates. Categories that are zero, negative or non-finite get
/// no tasks.
pub fn reduction_tasks(breakdown_kg: &CategoryBreakdown) -> Vec<ReductionTask> {
    use Difficulty::*;
    use EmissionCategory::*;

    let mut tasks = Vec::new();
    let emits = |amount: f64| amount.is_finite() && amount > 0.0;

    let transport = breakdown_kg.transport;
    if emits(transport) {
        tasks.extend([
            ReductionTask::new(
                "task_transport_car_reduce",
                Some(Transport),
                "Reduce Car Travel by 20%",
                "Try carpooling, using public transport, or cycling for short trips.",
                Medium,
                round_kg(transport * 0.2),
            ),
            ReductionTask::new(
                "task_transport_public",
                Some(Transport),
                "Switch to Public Transport",
                "Try using bus or train for your daily commute. It can reduce emissions by 50-70% compared to cars.",
                Easy,
                round_kg(transport * 0.6),
            ),
            ReductionTask::new(
                "task_transport_bus",
                Some(Transport),
                "Use Bus for Short Trips",
                "Try taking the bus for trips under 5 km. Buses are much more efficient per passenger.",
                Easy,
                3.0,
            ),
            ReductionTask::new(
                "task_transport_bike",
                Some(Transport),
                "Cycle or Walk for Short Distances",
                "For trips under 3 km, consider cycling or walking. Zero emissions and great for health!",
                Easy,
                2.0,
            ),
        ]);
    }

    if emits(breakdown_kg.shopping) {
        tasks.extend([
            ReductionTask::new(
                "task_shopping_bag",
                Some(Shopping),
                "Carry Reusable Shopping Bags",
                "Bring your own reusable bags when shopping. Plastic bags contribute to waste emissions.",
                Easy,
                0.75,
            ),
            ReductionTask::new(
                "task_shopping_bulk",
                Some(Shopping),
                "Buy in Bulk to Reduce Packaging",
                "Purchase items in larger quantities to reduce packaging waste and trips to the store.",
                Easy,
                1.5,
            ),
            ReductionTask::new(
                "task_shopping_local",
                Some(Shopping),
                "Buy Local and Seasonal Products",
                "Choose locally produced items to reduce transportation emissions from shipping.",
                Medium,
                3.0,
            ),
            ReductionTask::new(
                "task_shopping_secondhand",
                Some(Shopping),
                "Buy Secondhand or Refurbished Items",
                "Consider buying secondhand clothing, electronics, or furniture. Reduces manufacturing emissions.",
                Medium,
                7.5,
            ),
        ]);
    }

    let food = breakdown_kg.food;
    if emits(food) {
        tasks.extend([
            ReductionTask::new(
                "task_food_reduce_meat",
                Some(Food),
                "Reduce Meat Consumption",
                "Try having 2-3 meat-free days per week.",
                Medium,
                round_kg(food * 0.3),
            ),
            ReductionTask::new(
                "task_food_plant_based",
                Some(Food),
                "Try Plant-Based Alternatives",
                "Replace one meat meal per week with plant-based options. Beans, lentils, and tofu have much lower emissions.",
                Easy,
                round_kg(food * 0.15),
            ),
            ReductionTask::new(
                "task_food_waste",
                Some(Food),
                "Reduce Food Waste",
                "Plan meals, use leftovers, and compost food scraps. Food waste contributes significantly to emissions.",
                Medium,
                4.0,
            ),
            ReductionTask::new(
                "task_food_local",
                Some(Food),
                "Buy Local and Seasonal Produce",
                "Choose locally grown, seasonal fruits and vegetables to reduce transportation emissions.",
                Easy,
                1.5,
            ),
        ]);
    }

    let energy = breakdown_kg.energy;
    if emits(energy) {
        tasks.extend([
            ReductionTask::new(
                "task_energy_switch",
                Some(Energy),
                "Switch to Renewable Energy",
                "Switch to a renewable energy provider or install solar panels if possible.",
                Hard,
                round_kg(energy * 0.5),
            ),
            ReductionTask::new(
                "task_energy_efficient",
                Some(Energy),
                "Use Energy-Efficient Appliances",
                "Replace old appliances with energy-efficient models and use LED bulbs.",
                Medium,
                3.0,
            ),
            ReductionTask::new(
                "task_energy_unplug",
                Some(Energy),
                "Unplug Electronics When Not in Use",
                "Turn off and unplug devices when not in use to reduce phantom power consumption.",
                Easy,
                1.5,
            ),
        ]);
    }

    tasks.push(ReductionTask::new(
        "task_general_track",
        None,
        "Continue Tracking Your Carbon Footprint",
        "Keep logging your activities to monitor progress and identify new reduction opportunities.",
        Easy,
        0.0,
    ));

    // Stable, so equal savings keep category order.
    tasks.sort_by(|a, b| {
        b.estimated_savings_kg
            .partial_cmp(&a.estimated_savings_kg)
            .unwrap_or(Ordering::Equal)
    });
    tasks.truncate(MAX_TASKS);
    tasks
}

/// Sum of the estimated savings of `tasks`, in kg CO2e.
pub fn potential_savings_kg(tasks: &[ReductionTask]) -> f64 {
    tasks.iter().map(|t| t.estimated_savings_kg).sum()
}

fn round_kg(kg: f64) -> f64 {
    (kg * 100.0).round() / 100.0
}
