// File: crates/chart-examples/src/bin/lines.rs
// Summary: Minimal example: an in-memory multi-line chart with one line selected, written as HTML.

use chart_core::{Chart, ChartKind, ChartOptions, Dataset};

const TEMPERATURES: &str = "\
month,Lisbon,Oslo,Cairo
1,15,-2,19
2,16,-1,21
3,18,3,24
4,20,9,28
5,22,15,32
6,26,19,34
7,28,22,35
8,28,21,35
9,27,16,33
10,23,9,30
11,18,3,25
12,15,0,21
";

fn main() -> anyhow::Result<()> {
    let config = ChartOptions::new("#temperatures", "month", ["Lisbon", "Oslo", "Cairo"], "inline.csv")
        .labels("Month", "Mean high (°C)")
        .resolve(ChartKind::MultiLine)?;
    let data = Dataset::parse(TEMPERATURES)?;
    let mut chart = Chart::with_tooltip(config, data, |r| {
        format!("month {}: Oslo {}°C", r.get("month").unwrap_or("?"), r.get("Oslo").unwrap_or("?"))
    })?;
    chart.click_mark("Oslo")?;

    let out = std::path::PathBuf::from("target/out/example_lines.html");
    chart.render_to_html(&out)?;
    println!("Wrote {}", out.display());
    Ok(())
}
