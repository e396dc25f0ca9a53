// File: crates/demo/src/main.rs
// Summary: chart-cli: build one chart kind from a CSV, replay toggle clicks, write SVG/HTML/PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_core::{charts, escape, ChartKind, ChartOptions, Record, TooltipFormatter};
use clap::{Parser, ValueEnum};
use log::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Scatter,
    Bar,
    Line,
    MultiLine,
    GeoScatter,
}

impl From<Kind> for ChartKind {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Scatter => ChartKind::Scatter,
            Kind::Bar => ChartKind::Bar,
            Kind::Line => ChartKind::Line,
            Kind::MultiLine => ChartKind::MultiLine,
            Kind::GeoScatter => ChartKind::GeoScatter,
        }
    }
}

/// Render a chart from CSV data to SVG or HTML
#[derive(Parser, Debug)]
#[command(name = "chart-cli", author, version, about, long_about = None)]
struct Cli {
    /// Chart kind
    #[arg(value_enum)]
    kind: Kind,

    /// CSV data file (overrides `data` in --config)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Independent-variable field (longitude for geo-scatter)
    #[arg(long)]
    x: Option<String>,

    /// Dependent-variable field(s); several become toggle controls or lines
    #[arg(long, num_args = 1..)]
    y: Vec<String>,

    /// JSON file with chart options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Container selector written into the HTML output
    #[arg(long)]
    container: Option<String>,

    /// Click these series' toggle controls in order before writing output
    #[arg(long)]
    select: Vec<String>,

    /// Fields listed in the hover tooltip
    #[arg(long, num_args = 1..)]
    tooltip: Vec<String>,

    /// Output path (defaults to the data file with .svg/.html)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write the HTML fragment (controls, svg, tooltip) instead of bare SVG
    #[arg(long)]
    html: bool,

    /// Also write a PNG next to the output (requires the `png` feature)
    #[arg(long)]
    png: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            serde_json::from_str::<ChartOptions>(&text)
                .with_context(|| format!("invalid chart options in '{}'", path.display()))?
        }
        None => ChartOptions::default(),
    };
    if let Some(data) = &cli.data {
        options.data = Some(data.clone());
    }
    if let Some(x) = &cli.x {
        options.x = Some(x.clone());
    }
    if !cli.y.is_empty() {
        options.y = cli.y.clone();
    }
    if let Some(c) = &cli.container {
        options.container = Some(c.clone());
    }
    if options.container.is_none() {
        options.container = Some("#chart".to_string());
    }
    let data_path = options.data.clone();

    let kind = ChartKind::from(cli.kind);
    let tooltip = (!cli.tooltip.is_empty()).then(|| tooltip_formatter(cli.tooltip.clone()));
    let mut chart = charts::build(kind, options, tooltip)
        .await
        .with_context(|| format!("failed to build {kind:?} chart"))?;

    for series in &cli.select {
        let moved = chart.select_series(series).with_context(|| format!("cannot select series '{series}'"))?;
        info!("select {series}: {}", if moved { "switched" } else { "already active" });
    }

    let ext = if cli.html { "html" } else { "svg" };
    let out = match (&cli.out, &data_path) {
        (Some(out), _) => out.clone(),
        (None, Some(data)) => out_name_with(data, kind, ext),
        (None, None) => PathBuf::from(format!("chart.{ext}")),
    };
    if cli.html {
        chart.render_to_html(&out)?;
    } else {
        chart.render_to_svg(&out)?;
    }
    println!("Wrote {}", out.display());

    if cli.png {
        write_png(&chart, &out.with_extension("png"))?;
    }
    Ok(())
}

/// `<b>field</b>: value` lines for each requested field, with names and
/// values escaped.
fn tooltip_formatter(fields: Vec<String>) -> TooltipFormatter {
    Box::new(move |r: &Record| {
        fields
            .iter()
            .map(|f| format!("<b>{}</b>: {}", escape(f), escape(r.get(f).unwrap_or(""))))
            .collect::<Vec<_>>()
            .join("<br/>")
    })
}

fn out_name_with(input: &Path, kind: ChartKind, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let name = format!("{stem}_{}.{ext}", kind.css_class().trim_start_matches("d3-"));
    input.with_file_name(name)
}

#[cfg(feature = "png")]
fn write_png(chart: &chart_core::Chart, path: &Path) -> Result<()> {
    chart_render_skia::render_to_png(chart, &chart_render_skia::PngOptions::default(), path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(not(feature = "png"))]
fn write_png(_chart: &chart_core::Chart, _path: &Path) -> Result<()> {
    anyhow::bail!("PNG output needs chart-cli built with `--features png`")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::Dataset;

    #[test]
    fn cli_parses_multiple_series() {
        let cli = Cli::try_parse_from([
            "chart-cli", "multi-line", "--data", "d.csv", "--x", "t", "--y", "a", "b", "--select", "b", "--html",
        ])
        .unwrap();
        assert!(matches!(cli.kind, Kind::MultiLine));
        assert_eq!(cli.y, ["a", "b"]);
        assert_eq!(cli.select, ["b"]);
        assert!(cli.html && !cli.png);
    }

    #[test]
    fn tooltip_escapes_cell_values() {
        let data = Dataset::parse("name,note\nK2,<b>steep</b> & cold\n").unwrap();
        let tip = tooltip_formatter(vec!["name".into(), "note".into()]);
        let row = data.get(0).unwrap();
        assert_eq!(tip(row), "<b>name</b>: K2<br/><b>note</b>: &lt;b&gt;steep&lt;/b&gt; &amp; cold");
    }

    #[test]
    fn output_name_follows_kind() {
        let p = out_name_with(Path::new("data/cities.csv"), ChartKind::GeoScatter, "svg");
        assert_eq!(p, PathBuf::from("data/cities_geo-scatter.svg"));
    }
}
