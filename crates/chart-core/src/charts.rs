// File: crates/chart-core/src/charts.rs
// Summary: Async chart constructors: resolve options, load the CSV once, render the first frame.

use log::info;

use crate::chart::Chart;
use crate::config::{ChartKind, ChartOptions};
use crate::error::Result;
use crate::interaction::TooltipFormatter;
use crate::loader::load_csv;

/// Resolve `options` for `kind`, load its data file and build the chart.
/// A failed load or parse is returned and nothing is rendered.
pub async fn build(kind: ChartKind, options: ChartOptions, tooltip: Option<TooltipFormatter>) -> Result<Chart> {
    let config = options.resolve(kind)?;
    let dataset = load_csv(&config.data_path).await?;
    let chart = Chart::build(config, dataset, tooltip)?;
    info!(
        "{} {:?} chart: {} marks from {} rows",
        chart.config().container,
        kind,
        chart.marks().len(),
        chart.dataset().len()
    );
    Ok(chart)
}

pub async fn scatter(options: ChartOptions, tooltip: Option<TooltipFormatter>) -> Result<Chart> {
    build(ChartKind::Scatter, options, tooltip).await
}

/// Bars default to a descending sort with the top 10 shown.
pub async fn bar_chart(options: ChartOptions, tooltip: Option<TooltipFormatter>) -> Result<Chart> {
    build(ChartKind::Bar, options, tooltip).await
}

pub async fn line_chart(options: ChartOptions, tooltip: Option<TooltipFormatter>) -> Result<Chart> {
    build(ChartKind::Line, options, tooltip).await
}

pub async fn multi_line_chart(options: ChartOptions, tooltip: Option<TooltipFormatter>) -> Result<Chart> {
    build(ChartKind::MultiLine, options, tooltip).await
}

/// `x` names the longitude field, the single `y` the latitude field.
pub async fn geo_scatter(options: ChartOptions, tooltip: Option<TooltipFormatter>) -> Result<Chart> {
    build(ChartKind::GeoScatter, options, tooltip).await
}
