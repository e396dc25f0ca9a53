// File: crates/chart-core/tests/lines.rs
// Purpose: Line and multi-line charts: path morphing, per-series gaps, selection vs hover, temporal x.

use std::time::Duration;

use chart_core::theme::CATEGORY10;
use chart_core::{Chart, ChartError, ChartKind, ChartOptions, Dataset, SeriesSelector, Shape, LINE_KEY};

const DATA: &str = "t,a,b\n1,1,4\n2,3,5\n3,2,\n";

fn chart(kind: ChartKind, y: &[&str]) -> Chart {
    let config = ChartOptions::new("#lines", "t", y.iter().copied(), "inline.csv")
        .resolve(kind)
        .expect("config");
    Chart::new(config, Dataset::parse(DATA).expect("csv")).expect("chart")
}

fn points(chart: &Chart, key: &str) -> Vec<(f64, f64)> {
    match &chart.mark(key).expect("mark").shape {
        Shape::Path { points } => points.clone(),
        other => panic!("expected a path, got {other:?}"),
    }
}

#[test]
fn single_line_morphs_between_series() {
    let mut c = chart(ChartKind::Line, &["a", "b"]);
    assert_eq!(c.marks().len(), 1);
    assert_eq!(points(&c, LINE_KEY).len(), 3);
    assert_eq!(c.mark(LINE_KEY).unwrap().rows, vec![0, 1, 2]);
    let id = c.mark(LINE_KEY).unwrap().id;

    assert!(c.select_series("b").unwrap());
    let line = c.mark(LINE_KEY).unwrap();
    assert_eq!(line.id, id);
    assert_eq!(line.rows, vec![0, 1]);
    assert!(line.is_transitioning());
    // x domain comes from the rows that are still visible
    assert_eq!(points(&c, LINE_KEY), vec![(0.0, 350.0), (620.0, 0.0)]);
}

#[test]
fn line_transition_is_animated_when_point_counts_match() {
    let config = ChartOptions::new("#l", "t", ["a", "b"], "inline.csv").resolve(ChartKind::Line).unwrap();
    let mut c = Chart::new(config, Dataset::parse("t,a,b\n1,1,4\n2,3,5\n3,2,9\n").unwrap()).unwrap();
    c.select_series("b").unwrap();
    let svg = c.to_svg().unwrap();
    assert!(svg.contains(r#"<animate attributeName="d""#));
    assert!(svg.contains(r#"dur="1000ms""#));
}

#[test]
fn multi_line_draws_every_series_with_gaps() {
    let c = chart(ChartKind::MultiLine, &["a", "b"]);
    assert!(c.controls().is_none());
    let keys: Vec<&str> = c.marks().iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(c.mark("b").unwrap().rows, vec![0, 1]);
    assert_eq!(c.y_scale().domain, (1.0, 5.0));
    assert_eq!(c.mark("a").unwrap().color, CATEGORY10[0]);
    assert_eq!(c.mark("b").unwrap().color, CATEGORY10[1]);
    assert_eq!(c.y_axis().label, None);
    assert!(c.marks().iter().all(|m| m.handlers.hover && m.handlers.click));
}

#[test]
fn hover_does_not_override_selection() {
    let mut c = chart(ChartKind::MultiLine, &["a", "b"]);
    assert!(c.click_mark("a").unwrap());
    assert_eq!(c.mark("a").unwrap().class_list(), "line selected");

    c.pointer_enter("a", 0.0, 0.0).unwrap();
    assert_eq!(c.mark("a").unwrap().class_list(), "line selected");
    c.pointer_enter("b", 0.0, 0.0).unwrap();
    assert_eq!(c.mark("b").unwrap().class_list(), "line hover");
    c.pointer_leave("b").unwrap();
    assert_eq!(c.mark("b").unwrap().class_list(), "line");
    c.pointer_leave("a").unwrap();
    assert_eq!(c.mark("a").unwrap().class_list(), "line selected");

    assert!(!c.click_mark("a").unwrap());
    assert_eq!(c.mark("a").unwrap().class_list(), "line");
}

#[test]
fn selection_survives_updates_of_the_same_series() {
    let mut c = chart(ChartKind::MultiLine, &["a", "b"]);
    c.click_mark("b").unwrap();
    let id_b = c.mark("b").unwrap().id;
    let id_a = c.mark("a").unwrap().id;

    c.update(SeriesSelector::Fields(vec!["b".into()]), Duration::ZERO).unwrap();
    assert!(c.mark("a").is_none());
    assert!(c.mark("b").unwrap().selected);
    assert_eq!(c.mark("b").unwrap().id, id_b);

    c.update(SeriesSelector::Fields(vec!["a".into(), "b".into()]), Duration::ZERO).unwrap();
    assert_ne!(c.mark("a").unwrap().id, id_a, "re-entered line is a new mark");
    assert!(c.mark("b").unwrap().selected);

    let err = c.update(SeriesSelector::field("c"), Duration::ZERO);
    assert!(matches!(err, Err(ChartError::UnknownSeries(s)) if s == "c"));
}

#[test]
fn multi_line_tooltip_uses_nearest_row() {
    let config = ChartOptions::new("#m", "t", ["a", "b"], "inline.csv").resolve(ChartKind::MultiLine).unwrap();
    let mut c = Chart::with_tooltip(config, Dataset::parse(DATA).unwrap(), |r| {
        format!("t={}", r.get("t").unwrap_or_default())
    })
    .unwrap();
    // plot starts 50px in; x=3 sits at the right edge of the 620px plot
    assert!(c.pointer_enter("a", 50.0 + 600.0, 10.0).unwrap());
    assert_eq!(c.tooltip().unwrap().html, "t=3");
    assert!(c.pointer_enter("b", 50.0 + 600.0, 10.0).unwrap());
    assert_eq!(c.tooltip().unwrap().html, "t=2");
}

#[test]
fn temporal_x_uses_dates() {
    let mut o = ChartOptions::new("#d", "date", ["v"], "inline.csv");
    o.x_time_format = Some("%Y-%m-%d".into());
    let config = o.resolve(ChartKind::Line).unwrap();
    let data = Dataset::parse("date,v\n2024-01-01,1\nnot a date,2\n2024-01-03,3\n").unwrap();
    let c = Chart::new(config, data).unwrap();
    assert_eq!(c.mark(LINE_KEY).unwrap().rows, vec![0, 2]);
    let chart_core::XScale::Linear(x) = c.x_scale() else { panic!("linear x expected") };
    assert_eq!(x.domain, (1_704_067_200.0, 1_704_240_000.0));
    assert!(!c.x_axis().ticks.is_empty());
    assert!(c.x_axis().ticks.iter().all(|t| t.label.starts_with("2024-01-0")));
}
