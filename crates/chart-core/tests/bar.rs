// File: crates/chart-core/tests/bar.rs
// Purpose: Ranked bar display: sort/limit, zero-based y domain, band layout, series toggles.

use std::time::Duration;

use chart_core::{Chart, ChartError, ChartKind, ChartOptions, Dataset, Mark, SeriesSelector, Shape, XScale};

fn bar_chart(csv: &str, y: &[&str], tweak: impl FnOnce(ChartOptions) -> ChartOptions) -> Chart {
    let options = tweak(ChartOptions::new("#bar", "cat", y.iter().copied(), "inline.csv"));
    let config = options.resolve(ChartKind::Bar).expect("config");
    Chart::new(config, Dataset::parse(csv).expect("csv")).expect("chart")
}

fn rect(m: &Mark) -> (f64, f64, f64, f64) {
    match m.shape {
        Shape::Rect { x, y, width, height } => (x, y, width, height),
        ref other => panic!("expected a bar, got {other:?}"),
    }
}

fn keys(chart: &Chart) -> Vec<&str> {
    chart.marks().iter().map(|m| m.key.as_str()).collect()
}

#[test]
fn ranked_order_heights_and_domain() {
    let chart = bar_chart("cat,v\nA,5\nB,9\nC,3\n", &["v"], |o| o);
    assert_eq!(keys(&chart), ["B", "A", "C"]);
    assert_eq!(chart.y_scale().domain, (0.0, 9.0));

    // 400 - 10 - 40 = 350px of plot height
    let heights: Vec<f64> = chart.marks().iter().map(|m| rect(m).3).collect();
    assert!((heights[0] - 350.0).abs() < 1e-9);
    for (h, v) in heights.iter().zip([9.0, 5.0, 3.0]) {
        assert!((h / heights[0] - v / 9.0).abs() < 1e-9, "height {h} not proportional to {v}");
    }
    // bars stand on the baseline
    for m in chart.marks() {
        let (_, y, _, h) = rect(m);
        assert!((y + h - 350.0).abs() < 1e-9);
    }
}

#[test]
fn band_layout_with_default_padding() {
    let chart = bar_chart("cat,v\nA,5\nB,9\nC,3\n", &["v"], |o| o);
    // 620px wide, 3 bands, 0.2 inner/outer padding: step 193.75, bandwidth 155
    let XScale::Band(band) = chart.x_scale() else { panic!("bar charts use a band scale") };
    assert!((band.step() - 193.75).abs() < 1e-9);
    assert!((band.bandwidth() - 155.0).abs() < 1e-9);
    let (x, _, w, _) = rect(&chart.marks()[0]);
    assert!((x - 38.75).abs() < 1e-9);
    assert!((w - 155.0).abs() < 1e-9);
    let labels: Vec<&str> = chart.x_axis().ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["B", "A", "C"]);
}

#[test]
fn limit_keeps_the_highest_rows() {
    let values = [7, 3, 12, 1, 9, 4, 11, 2, 8, 6, 10, 5];
    let mut csv = String::from("cat,v\n");
    for (i, v) in values.iter().enumerate() {
        csv.push_str(&format!("c{i},{v}\n"));
    }
    let chart = bar_chart(&csv, &["v"], |o| o);
    assert_eq!(chart.marks().len(), 10);
    let shown: Vec<i32> = chart
        .marks()
        .iter()
        .map(|m| {
            let row = chart.dataset().get(m.rows[0]).unwrap();
            row.get("v").unwrap().parse().unwrap()
        })
        .collect();
    assert_eq!(shown, [12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);

    let unlimited = bar_chart(&csv, &["v"], |o| o.limit(0));
    assert_eq!(unlimited.marks().len(), 12);
}

#[test]
fn equal_values_keep_input_order() {
    let chart = bar_chart("cat,v\nA,2\nB,5\nC,2\nD,5\nE,2\n", &["v"], |o| o);
    assert_eq!(keys(&chart), ["B", "D", "A", "C", "E"]);
    let unsorted = bar_chart("cat,v\nA,2\nB,5\nC,2\n", &["v"], |o| o.sort(false));
    assert_eq!(keys(&unsorted), ["A", "B", "C"]);
}

#[test]
fn missing_metric_drops_the_bar() {
    let chart = bar_chart("cat,v\nA,5\nB,\nC,n/a\nD,3\n,4\n", &["v"], |o| o);
    assert_eq!(keys(&chart), ["A", "D"]);
    assert_eq!(chart.y_scale().domain, (0.0, 5.0));
}

#[test]
fn negative_values_hang_below_zero() {
    let chart = bar_chart("cat,v\nA,-4\nB,6\n", &["v"], |o| o);
    assert_eq!(chart.y_scale().domain, (-4.0, 6.0));
    let zero = chart.y_scale().map(0.0);
    let (_, y, _, h) = rect(chart.mark("A").unwrap());
    assert!((y - zero).abs() < 1e-9);
    assert!((h - 140.0).abs() < 1e-9);
}

#[test]
fn toggling_series_reorders_with_a_transition() {
    let mut chart = bar_chart("cat,v,w\nA,5,1\nB,9,2\nC,3,8\n", &["v", "w"], |o| o);
    let controls = chart.controls().expect("two series get toggle controls");
    assert_eq!(controls.selected(), "v");
    let ids: Vec<(String, u64)> = chart.marks().iter().map(|m| (m.key.clone(), m.id)).collect();

    assert!(chart.select_series("w").unwrap());
    assert_eq!(keys(&chart), ["C", "B", "A"]);
    assert_eq!(chart.selector(), &SeriesSelector::field("w"));
    assert_eq!(chart.controls().unwrap().selected(), "w");
    assert_eq!(chart.y_scale().domain, (0.0, 8.0));
    for (key, id) in &ids {
        let m = chart.mark(key).unwrap();
        assert_eq!(m.id, *id, "bar {key} must be updated in place");
        assert!(m.is_transitioning());
        assert_eq!(m.duration, Duration::from_millis(1000));
    }

    // clicking the active control is a no-op
    let before = chart.marks().to_vec();
    assert!(!chart.select_series("w").unwrap());
    assert_eq!(chart.marks(), before.as_slice());

    assert!(matches!(chart.select_series("zzz"), Err(ChartError::UnknownSeries(s)) if s == "zzz"));
    assert_eq!(chart.controls().unwrap().selected(), "w");
}

#[test]
fn single_series_has_no_controls() {
    let mut chart = bar_chart("cat,v\nA,5\n", &["v"], |o| o);
    assert!(chart.controls().is_none());
    assert!(!chart.select_series("v").unwrap());
    assert!(matches!(chart.select_series("w"), Err(ChartError::UnknownSeries(_))));
    let err = chart.update(SeriesSelector::Fields(vec!["v".into(), "v".into()]), Duration::ZERO);
    assert!(matches!(err, Err(ChartError::InvalidOption { option: "series", .. })));
}
