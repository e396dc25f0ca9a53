use std::time::Duration;

use anyhow::Result;
use chart_core::{Chart, ChartKind, ChartOptions, Dataset, SeriesSelector};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn dataset(n: usize) -> Dataset {
    let mut text = String::from("name,x,a,b\n");
    for i in 0..n {
        let x = i as f64;
        text.push_str(&format!("n{i},{x},{},{}\n", (x * 0.01).sin() * 10.0, (x * 0.02).cos() * 5.0));
    }
    Dataset::parse(&text).expect("bench data")
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle_update");
    for (kind, x) in [(ChartKind::Scatter, "x"), (ChartKind::Bar, "name")] {
        for &n in &[1_000usize, 10_000usize] {
            let config = ChartOptions::new("#bench", x, ["a", "b"], "bench.csv")
                .limit(0)
                .resolve(kind)
                .expect("config");
            let mut chart = Chart::new(config, dataset(n)).expect("chart");
            let mut flip = false;
            group.bench_function(format!("{kind:?}_{n}"), |b| {
                b.iter(|| -> Result<()> {
                    flip = !flip;
                    let series = if flip { "b" } else { "a" };
                    let diff = chart.update(SeriesSelector::field(series), Duration::from_millis(1000))?;
                    black_box(diff);
                    Ok(())
                });
            });
        }
    }
    group.finish();
}

fn bench_svg(c: &mut Criterion) {
    let config = ChartOptions::new("#bench", "x", ["a"], "bench.csv").resolve(ChartKind::Scatter).expect("config");
    let chart = Chart::new(config, dataset(10_000)).expect("chart");
    c.bench_function("to_svg_10000", |b| b.iter(|| black_box(chart.to_svg())));
}

criterion_group!(benches, bench_update, bench_svg);
criterion_main!(benches);
