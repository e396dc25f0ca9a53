// File: crates/chart-examples/src/bin/bars.rs
// Summary: Ranked bar chart with two toggleable metrics; writes the HTML before and after a toggle.

use chart_core::{Chart, ChartKind, ChartOptions, Dataset};

const PEAKS: &str = "\
peak,height,prominence
Everest,8849,8849
K2,8611,4020
Kangchenjunga,8586,3922
Lhotse,8516,610
Makalu,8485,2378
Cho Oyu,8188,2344
Dhaulagiri,8167,3357
Manaslu,8163,3092
Nanga Parbat,8126,4608
Annapurna,8091,2984
Gasherbrum I,8080,2155
Broad Peak,8051,
";

fn main() -> anyhow::Result<()> {
    let config = ChartOptions::new("#peaks", "peak", ["height", "prominence"], "inline.csv")
        .labels("Peak", "Metres")
        .resolve(ChartKind::Bar)?;
    let mut chart = Chart::new(config, Dataset::parse(PEAKS)?)?;

    let before = std::path::PathBuf::from("target/out/example_bars_height.html");
    chart.render_to_html(&before)?;
    chart.select_series("prominence")?;
    let after = before.with_file_name("example_bars_prominence.html");
    chart.render_to_html(&after)?;
    println!("Wrote {} and {}", before.display(), after.display());
    Ok(())
}
