// File: crates/chart-core/tests/geo.rs
// Purpose: Geo-scatter: projection fit into the plot area, hidden axes, missing coordinates.

use chart_core::{Chart, ChartError, ChartKind, ChartOptions, Dataset, MarkClass, ProjectionKind, Shape};

const CITIES: &str = "name,lon,lat\nSan Francisco,-122.4,37.8\nNew York,-74.0,40.7\nNowhere,,1\nMiami,-80.2,25.8\n";

fn geo(projection: ProjectionKind) -> Chart {
    let mut o = ChartOptions::new("#map", "lon", ["lat"], "inline.csv");
    o.projection = Some(projection);
    let config = o.resolve(ChartKind::GeoScatter).expect("config");
    Chart::new(config, Dataset::parse(CITIES).expect("csv")).expect("chart")
}

fn centre(chart: &Chart, key: &str) -> (f64, f64) {
    match chart.mark(key).expect("mark").shape {
        Shape::Circle { cx, cy, .. } => (cx, cy),
        ref other => panic!("expected a circle, got {other:?}"),
    }
}

#[test]
fn points_fit_inside_the_plot() {
    for kind in [ProjectionKind::Mercator, ProjectionKind::Equirectangular] {
        let chart = geo(kind);
        let (w, h) = chart.plot_size();
        let keys: Vec<&str> = chart.marks().iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, ["0", "1", "3"]);
        for m in chart.marks() {
            assert_eq!(m.class, MarkClass::GeoPoint);
            let (cx, cy) = centre(&chart, &m.key);
            assert!((-1e-9..=w + 1e-9).contains(&cx), "{kind:?}: x {cx} outside 0..{w}");
            assert!((-1e-9..=h + 1e-9).contains(&cy), "{kind:?}: y {cy} outside 0..{h}");
        }
        let (sf, ny, mia) = (centre(&chart, "0"), centre(&chart, "1"), centre(&chart, "3"));
        assert!(sf.0 < mia.0 && mia.0 < ny.0, "west to east");
        assert!(ny.1 < sf.1 && sf.1 < mia.1, "north is up");
        assert_eq!(chart.projection().map(|p| p.kind), Some(kind));
    }
}

#[test]
fn axes_are_hidden() {
    let chart = geo(ProjectionKind::Mercator);
    assert!(chart.x_axis().ticks.is_empty() && chart.x_axis().label.is_none());
    assert!(chart.y_axis().ticks.is_empty());
    let svg = chart.to_svg().unwrap();
    assert!(!svg.contains("class=\"x axis\""));
    assert_eq!(svg.matches(r#"class="geo-point""#).count(), 3);
}

#[test]
fn single_point_is_centred() {
    let config = ChartOptions::new("#map", "lon", ["lat"], "inline.csv")
        .resolve(ChartKind::GeoScatter)
        .unwrap();
    let chart = Chart::new(config, Dataset::parse("lon,lat\n2.35,48.86\n").unwrap()).unwrap();
    let (cx, cy) = centre(&chart, "0");
    assert!((cx - 310.0).abs() < 1e-6 && (cy - 175.0).abs() < 1e-6);
}

#[test]
fn geo_takes_one_latitude_field() {
    let err = ChartOptions::new("#map", "lon", ["lat", "alt"], "inline.csv").resolve(ChartKind::GeoScatter);
    assert!(matches!(err, Err(ChartError::InvalidOption { option: "y", .. })));
}
