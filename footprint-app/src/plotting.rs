//! Charts for calculation results and logged history.

use anyhow::Result;
use footprint_core::history::DailyTotal;
use footprint_schemas::result::{CalculationResult, CategoryBreakdown, EmissionCategory};
use plotters::prelude::*;
use std::{ops::Range, path::Path};
use tracing::{info, warn};

const CATEGORY_COLORS: [RGBColor; 5] = [
    RGBColor(70, 130, 180),
    RGBColor(218, 165, 32),
    RGBColor(178, 34, 34),
    RGBColor(46, 139, 87),
    RGBColor(106, 90, 205),
];

/// Generates a bar chart of the per-category daily footprint.
///
/// Negative categories (net recycling credit) are drawn below the axis.
pub fn plot_breakdown(path: &Path, result: &CalculationResult) -> Result<()> {
    let values = finite_bars(&result.breakdown_tonnes);
    let Range { start: y_min, end: y_max } = bar_range(&values);

    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Footprint by Category", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..values.len() as u32).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Category")
        .y_desc("t CO2e / day")
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => values
                .get(*i as usize)
                .map(|(category, _)| category.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|y| format!("{:.4}", y))
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, (_, tonnes))| {
        let color = CATEGORY_COLORS[i % CATEGORY_COLORS.len()];
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i as u32), 0.0),
                (SegmentValue::Exact(i as u32 + 1), *tonnes),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 15, 15);
        bar
    }))?;

    root.present()?;
    info!(path = %path.display(), "breakdown chart saved");
    Ok(())
}

/// Bar values with non-finite categories (an overflowed product) drawn as 0.
pub fn finite_bars(breakdown: &CategoryBreakdown) -> Vec<(EmissionCategory, f64)> {
    breakdown
        .iter()
        .map(|(category, tonnes)| {
            if tonnes.is_finite() {
                (category, tonnes)
            } else {
                warn!(%category, tonnes, "non-finite category drawn as zero");
                (category, 0.0)
            }
        })
        .collect()
}

/// Y axis range covering every bar with 10% headroom, always including 0.
fn bar_range(values: &[(EmissionCategory, f64)]) -> Range<f64> {
    let max = values.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let min = values.iter().map(|(_, v)| *v).fold(0.0, f64::min);
    let y_max = if max > 0.0 { max * 1.1 } else { 0.001 };
    let y_min = if min < 0.0 { min * 1.1 } else { 0.0 };
    y_min..y_max
}

/// Generates a line chart of logged daily totals.
pub fn plot_daily_totals(path: &Path, totals: &[DailyTotal]) -> Result<()> {
    if totals.is_empty() {
        warn!("no history to plot");
        return Ok(());
    }

    let max_tonnes = totals
        .iter()
        .map(|d| d.tonnes)
        .filter(|t| t.is_finite())
        .fold(0.0, f64::max);
    let y_max = if max_tonnes > 0.0 { max_tonnes * 1.1 } else { 0.001 };
    let x_max = (totals.len() as u32 - 1).max(1);

    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Logged Footprint Over Time", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0u32..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("t CO2e")
        .x_label_formatter(&|x| {
            totals
                .get(*x as usize)
                .map(|d| d.date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| format!("{:.4}", y))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            totals.iter().enumerate().map(|(i, d)| (i as u32, d.tonnes)),
            BLUE.stroke_width(2),
        ))?
        .label("Daily total")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    chart.draw_series(
        totals
            .iter()
            .enumerate()
            .map(|(i, d)| Circle::new((i as u32, d.tonnes), 4, BLUE.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    info!(path = %path.display(), "history chart saved");
    Ok(())
}
