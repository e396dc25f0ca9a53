// File: crates/chart-core/src/chart.rs
// Summary: Chart instance: owns config, data, scales and marks; runs the render/update pass and pointer events.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use log::debug;

use crate::axis::{Axis, Orient};
use crate::config::{ChartConfig, ChartKind};
use crate::data::{Dataset, Record};
use crate::error::{ChartError, Result};
use crate::geometry::{plot_area, Rect};
use crate::interaction::{ToggleGroup, Tooltip, TooltipFormatter};
use crate::mark::{Handlers, LayerDiff, Mark, MarkClass, MarkLayer, MarkSpec, Shape};
use crate::projection::Projection;
use crate::scale::{extent, BandScale, LinearScale, DEFAULT_BAND_PADDING};
use crate::svg;
use crate::theme::{Color, ColorAssigner};
use crate::view::{visible_rows, Requirement, ViewSpec};

/// Key of the single path drawn by a line chart; the path morphs between series.
pub const LINE_KEY: &str = "line";

/// Which dependent field(s) are currently mapped to the vertical axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeriesSelector {
    Field(String),
    /// Several series at once (multi-line).
    Fields(Vec<String>),
}

impl SeriesSelector {
    pub fn field(name: impl Into<String>) -> Self {
        SeriesSelector::Field(name.into())
    }

    pub fn fields(&self) -> &[String] {
        match self {
            SeriesSelector::Field(f) => std::slice::from_ref(f),
            SeriesSelector::Fields(fs) => fs,
        }
    }
}

/// Horizontal scale: continuous for scatter/line, banded for bars.
#[derive(Clone, Debug, PartialEq)]
pub enum XScale {
    Linear(LinearScale),
    Band(BandScale),
}

/// Everything one render pass derives from (config, data, selector).
struct Frame {
    visible: Vec<usize>,
    x_scale: XScale,
    y_scale: LinearScale,
    projection: Option<Projection>,
    x_axis: Axis,
    y_axis: Axis,
    specs: Vec<MarkSpec>,
}

pub struct Chart {
    config: ChartConfig,
    dataset: Dataset,
    selector: SeriesSelector,
    colors: ColorAssigner,
    /// Plot area in the translated coordinate space (origin at the top-left of the plot).
    plot: Rect,
    visible: Vec<usize>,
    x_scale: XScale,
    y_scale: LinearScale,
    projection: Option<Projection>,
    x_axis: Axis,
    y_axis: Axis,
    marks: MarkLayer,
    controls: Option<ToggleGroup>,
    tooltip: Option<Tooltip>,
    formatter: Option<TooltipFormatter>,
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("kind", &self.config.kind)
            .field("container", &self.config.container)
            .field("selector", &self.selector)
            .field("marks", &self.marks.len())
            .field("tooltip", &self.formatter.is_some())
            .finish()
    }
}

impl Chart {
    /// Validate field names against the data and render the first frame
    /// without a transition.
    pub fn new(config: ChartConfig, dataset: Dataset) -> Result<Self> {
        Self::build(config, dataset, None)
    }

    /// Like [`Chart::new`], with hover handlers that populate the tooltip
    /// through `formatter`.
    pub fn with_tooltip<F>(config: ChartConfig, dataset: Dataset, formatter: F) -> Result<Self>
    where
        F: Fn(&Record) -> String + 'static,
    {
        Self::build(config, dataset, Some(Box::new(formatter)))
    }

    pub(crate) fn build(config: ChartConfig, dataset: Dataset, formatter: Option<TooltipFormatter>) -> Result<Self> {
        if config.y_fields.is_empty() {
            return Err(ChartError::MissingParameter("y"));
        }
        dataset.require_field(&config.x_field)?;
        for y in &config.y_fields {
            dataset.require_field(y)?;
        }

        let mut colors = ColorAssigner::new(config.palette.clone());
        for y in &config.y_fields {
            colors.color_for(y);
        }
        let controls = if config.kind.toggles_series() && config.y_fields.len() > 1 {
            ToggleGroup::new(&config.y_fields)
        } else {
            None
        };
        let selector = match config.kind {
            ChartKind::MultiLine => SeriesSelector::Fields(config.y_fields.clone()),
            _ => SeriesSelector::Field(config.y_fields[0].clone()),
        };
        let area = plot_area(config.width, config.height, &config.insets);
        let plot = Rect::from_ltwh(0.0, 0.0, area.width(), area.height());
        let empty = LinearScale::new((0.0, 0.0), (0.0, plot.width()));

        let mut chart = Self {
            tooltip: formatter.as_ref().map(|_| Tooltip::default()),
            formatter,
            config,
            dataset,
            selector: selector.clone(),
            colors,
            plot,
            visible: Vec::new(),
            x_scale: XScale::Linear(empty),
            y_scale: empty,
            projection: None,
            x_axis: Axis::hidden(Orient::Bottom),
            y_axis: Axis::hidden(Orient::Left),
            marks: MarkLayer::new(),
            controls,
        };
        chart.update(selector, Duration::ZERO)?;
        Ok(chart)
    }

    /// Recompute the visible subset, scales and axes for `selector` and
    /// reconcile the mark set. A zero `duration` applies immediately; a
    /// positive one records a transition from each mark's current geometry.
    /// Calling this twice with the same arguments leaves the same state.
    pub fn update(&mut self, selector: SeriesSelector, duration: Duration) -> Result<LayerDiff> {
        self.check_selector(&selector)?;
        let frame = self.layout(selector.fields());
        let diff = self.marks.reconcile(frame.specs, duration);
        debug!(
            "{} update {:?}: {} visible rows, marks +{} ~{} -{}",
            self.config.container,
            selector.fields(),
            frame.visible.len(),
            diff.entered,
            diff.updated,
            diff.exited
        );
        self.visible = frame.visible;
        self.x_scale = frame.x_scale;
        self.y_scale = frame.y_scale;
        self.projection = frame.projection;
        self.x_axis = frame.x_axis;
        self.y_axis = frame.y_axis;
        if let (Some(controls), SeriesSelector::Field(f)) = (self.controls.as_mut(), &selector) {
            controls.click(f)?;
        }
        self.selector = selector;
        Ok(diff)
    }

    /// Toggle-control click. Switches to `series` with the configured
    /// transition; returns false when it already was the active series.
    pub fn select_series(&mut self, series: &str) -> Result<bool> {
        let moved = match self.controls.as_mut() {
            Some(controls) => controls.click(series)?,
            None if self.config.y_fields.len() == 1 && self.config.y_fields[0] == series => false,
            None => return Err(ChartError::UnknownSeries(series.to_string())),
        };
        if moved {
            self.update(SeriesSelector::field(series), self.config.transition)?;
        }
        Ok(moved)
    }

    /// Pointer entered the mark `key`. Page coordinates are relative to the
    /// chart's SVG origin. Returns true when the tooltip was populated.
    pub fn pointer_enter(&mut self, key: &str, page_x: f64, page_y: f64) -> Result<bool> {
        let mark = self.marks.get(key).ok_or_else(|| ChartError::UnknownMark(key.to_string()))?;
        if !mark.handlers.hover {
            return Ok(false);
        }
        let row = self.nearest_row(&mark.rows, page_x - self.config.insets.left as f64);
        if let Some(m) = self.marks.get_mut(key) {
            m.hovered = true;
        }
        if let (Some(format), Some(tooltip), Some(record)) = (
            self.formatter.as_ref(),
            self.tooltip.as_mut(),
            row.and_then(|r| self.dataset.get(r)),
        ) {
            tooltip.show(format(record), page_x, page_y);
            return Ok(true);
        }
        Ok(false)
    }

    pub fn pointer_leave(&mut self, key: &str) -> Result<()> {
        let mark = self.marks.get_mut(key).ok_or_else(|| ChartError::UnknownMark(key.to_string()))?;
        if !mark.handlers.hover {
            return Ok(());
        }
        mark.hovered = false;
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.hide();
        }
        Ok(())
    }

    /// Click on a mark. Lines with a click handler toggle their persistent
    /// selected state; returns the state after the click.
    pub fn click_mark(&mut self, key: &str) -> Result<bool> {
        let mark = self.marks.get_mut(key).ok_or_else(|| ChartError::UnknownMark(key.to_string()))?;
        if mark.handlers.click {
            mark.selected = !mark.selected;
        }
        Ok(mark.selected)
    }

    pub fn kind(&self) -> ChartKind { self.config.kind }
    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn dataset(&self) -> &Dataset { &self.dataset }
    pub fn selector(&self) -> &SeriesSelector { &self.selector }
    pub fn marks(&self) -> &[Mark] { self.marks.marks() }
    pub fn mark(&self, key: &str) -> Option<&Mark> { self.marks.get(key) }
    pub fn controls(&self) -> Option<&ToggleGroup> { self.controls.as_ref() }
    pub fn tooltip(&self) -> Option<&Tooltip> { self.tooltip.as_ref() }
    pub fn x_scale(&self) -> &XScale { &self.x_scale }
    pub fn y_scale(&self) -> &LinearScale { &self.y_scale }
    pub fn projection(&self) -> Option<&Projection> { self.projection.as_ref() }
    pub fn x_axis(&self) -> &Axis { &self.x_axis }
    pub fn y_axis(&self) -> &Axis { &self.y_axis }
    /// Row indices currently on screen, in display order.
    pub fn visible_rows(&self) -> &[usize] { &self.visible }
    /// Plot area size (width, height) inside the margins.
    pub fn plot_size(&self) -> (f64, f64) { (self.plot.width(), self.plot.height()) }

    pub fn series_color(&self, series: &str) -> Color {
        self.colors.get(series).unwrap_or(self.config.theme.mark_fill)
    }

    pub fn to_svg(&self) -> Result<String> {
        svg::render_svg(self)
    }

    /// Container div with toggle controls, the SVG and the tooltip overlay.
    pub fn to_html(&self) -> Result<String> {
        svg::render_html(self)
    }

    pub fn render_to_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        write_creating_dirs(path.as_ref(), &self.to_svg()?)
    }

    pub fn render_to_html(&self, path: impl AsRef<Path>) -> Result<()> {
        write_creating_dirs(path.as_ref(), &self.to_html()?)
    }

    // ---- render pass ---------------------------------------------------------

    fn check_selector(&self, selector: &SeriesSelector) -> Result<()> {
        for f in selector.fields() {
            if !self.config.y_fields.contains(f) {
                return Err(ChartError::UnknownSeries(f.clone()));
            }
        }
        if self.config.kind != ChartKind::MultiLine && selector.fields().len() != 1 {
            return Err(ChartError::InvalidOption {
                option: "series",
                reason: format!("{:?} charts show exactly one series", self.config.kind),
            });
        }
        Ok(())
    }

    fn handlers(&self) -> Handlers {
        match self.config.kind {
            ChartKind::MultiLine => Handlers { hover: true, click: true },
            _ => Handlers { hover: self.formatter.is_some(), click: false },
        }
    }

    fn layout(&self, fields: &[String]) -> Frame {
        match self.config.kind {
            ChartKind::Scatter | ChartKind::Line => self.layout_xy(&fields[0]),
            ChartKind::Bar => self.layout_bar(&fields[0]),
            ChartKind::MultiLine => self.layout_multi_line(fields),
            ChartKind::GeoScatter => self.layout_geo(&fields[0]),
        }
    }

    fn record(&self, row: usize) -> &Record {
        &self.dataset.rows()[row]
    }

    fn x_value(&self, row: usize) -> Option<f64> {
        self.record(row).coerce(&self.config.x_field, &self.config.x_coercion)
    }

    fn x_linear(&self, values: impl IntoIterator<Item = f64>) -> LinearScale {
        let s = LinearScale::from_values(values, self.config.x_domain, (0.0, self.plot.width()));
        if self.config.nice && self.config.x_domain.is_none() { s.nice(self.config.x_ticks) } else { s }
    }

    fn y_linear(&self, values: impl IntoIterator<Item = f64>) -> LinearScale {
        let s = LinearScale::from_values(values, self.config.y_domain, (self.plot.height(), 0.0));
        if self.config.nice && self.config.y_domain.is_none() { s.nice(self.config.y_ticks) } else { s }
    }

    fn axes(&self, x: &LinearScale, y: &LinearScale) -> (Axis, Axis) {
        let cfg = &self.config;
        (
            Axis::linear(Orient::Bottom, x, cfg.x_ticks, &cfg.x_format, Some(cfg.x_label.clone()), self.plot.height()),
            Axis::linear(Orient::Left, y, cfg.y_ticks, &cfg.y_format, cfg.y_label.clone(), self.plot.width()),
        )
    }

    fn layout_xy(&self, y_field: &str) -> Frame {
        let cfg = &self.config;
        let line = cfg.kind == ChartKind::Line;
        let view = ViewSpec {
            require: vec![Requirement::coerced(&cfg.x_field, &cfg.x_coercion), Requirement::number(y_field)],
            rank_by: (cfg.sort && !line).then_some(y_field),
            limit: cfg.limit,
            ..ViewSpec::default()
        };
        let visible = visible_rows(&self.dataset, &view);
        let points: Vec<(usize, f64, f64)> = visible
            .iter()
            .filter_map(|&i| Some((i, self.x_value(i)?, self.record(i).number(y_field)?)))
            .collect();
        let x = self.x_linear(points.iter().map(|p| p.1));
        let y = self.y_linear(points.iter().map(|p| p.2));
        let color = self.series_color(y_field);
        let handlers = self.handlers();

        let specs = if line {
            if points.is_empty() {
                Vec::new()
            } else {
                vec![MarkSpec {
                    key: LINE_KEY.to_string(),
                    class: MarkClass::Line,
                    shape: Shape::Path { points: points.iter().map(|p| (x.map(p.1), y.map(p.2))).collect() },
                    color,
                    rows: points.iter().map(|p| p.0).collect(),
                    handlers,
                }]
            }
        } else {
            points
                .iter()
                .map(|&(i, xv, yv)| MarkSpec {
                    key: i.to_string(),
                    class: MarkClass::DataPoint,
                    shape: Shape::Circle { cx: x.map(xv), cy: y.map(yv), r: cfg.point_radius },
                    color,
                    rows: vec![i],
                    handlers,
                })
                .collect()
        };
        let (x_axis, y_axis) = self.axes(&x, &y);
        Frame { visible, x_scale: XScale::Linear(x), y_scale: y, projection: None, x_axis, y_axis, specs }
    }

    fn layout_bar(&self, y_field: &str) -> Frame {
        let cfg = &self.config;
        let view = ViewSpec {
            require: vec![Requirement::number(y_field)],
            require_text: vec![cfg.x_field.as_str()],
            rank_by: cfg.sort.then_some(y_field),
            limit: cfg.limit,
        };
        let visible = visible_rows(&self.dataset, &view);
        let bars: Vec<(usize, &str, f64)> = visible
            .iter()
            .filter_map(|&i| {
                let r = self.record(i);
                Some((i, r.get(&cfg.x_field)?, r.number(y_field)?))
            })
            .collect();

        let band = BandScale::new(bars.iter().map(|b| b.1), (0.0, self.plot.width()), DEFAULT_BAND_PADDING);
        // bars grow from zero, so zero is always in the domain
        let (lo, hi) = extent(bars.iter().map(|b| b.2)).unwrap_or((0.0, 0.0));
        let y = self.y_linear([lo.min(0.0), hi.max(0.0)]);
        let (d0, d1) = y.domain;
        let base = y.map(0.0_f64.clamp(d0.min(d1), d0.max(d1)));
        let color = self.series_color(y_field);
        let handlers = self.handlers();

        let specs = bars
            .iter()
            .filter_map(|&(i, cat, v)| {
                let x = band.position(cat)?;
                let top = y.map(v);
                Some(MarkSpec {
                    key: cat.to_string(),
                    class: MarkClass::Bar,
                    shape: Shape::Rect {
                        x,
                        y: top.min(base),
                        width: band.bandwidth(),
                        height: (top - base).abs(),
                    },
                    color,
                    rows: vec![i],
                    handlers,
                })
            })
            .collect();
        let x_axis = Axis::band(Orient::Bottom, &band, Some(cfg.x_label.clone()));
        let y_axis = Axis::linear(Orient::Left, &y, cfg.y_ticks, &cfg.y_format, cfg.y_label.clone(), self.plot.width());
        Frame { visible, x_scale: XScale::Band(band), y_scale: y, projection: None, x_axis, y_axis, specs }
    }

    fn layout_multi_line(&self, fields: &[String]) -> Frame {
        let cfg = &self.config;
        let view = ViewSpec {
            require: vec![Requirement::coerced(&cfg.x_field, &cfg.x_coercion)],
            limit: cfg.limit,
            ..ViewSpec::default()
        };
        let visible = visible_rows(&self.dataset, &view);
        // per series, rows with an empty/non-numeric value drop out of that line only
        let series: Vec<(&String, Vec<(usize, f64, f64)>)> = fields
            .iter()
            .map(|f| {
                let pts = visible
                    .iter()
                    .filter_map(|&i| Some((i, self.x_value(i)?, self.record(i).number(f)?)))
                    .collect();
                (f, pts)
            })
            .collect();
        let x = self.x_linear(visible.iter().filter_map(|&i| self.x_value(i)));
        let y = self.y_linear(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.2)));
        let handlers = self.handlers();

        let specs = series
            .iter()
            .filter(|(_, pts)| !pts.is_empty())
            .map(|(name, pts)| MarkSpec {
                key: name.to_string(),
                class: MarkClass::Line,
                shape: Shape::Path { points: pts.iter().map(|p| (x.map(p.1), y.map(p.2))).collect() },
                color: self.series_color(name),
                rows: pts.iter().map(|p| p.0).collect(),
                handlers,
            })
            .collect();
        let (x_axis, y_axis) = self.axes(&x, &y);
        Frame { visible, x_scale: XScale::Linear(x), y_scale: y, projection: None, x_axis, y_axis, specs }
    }

    fn layout_geo(&self, lat_field: &str) -> Frame {
        let cfg = &self.config;
        let view = ViewSpec {
            require: vec![Requirement::number(&cfg.x_field), Requirement::number(lat_field)],
            limit: cfg.limit,
            ..ViewSpec::default()
        };
        let visible = visible_rows(&self.dataset, &view);
        let points: Vec<(usize, f64, f64)> = visible
            .iter()
            .filter_map(|&i| {
                let r = self.record(i);
                Some((i, r.number(&cfg.x_field)?, r.number(lat_field)?))
            })
            .collect();
        let lon_lat: Vec<(f64, f64)> = points.iter().map(|p| (p.1, p.2)).collect();
        let projection = Projection::fit(cfg.projection, &lon_lat, &self.plot);
        let color = self.series_color(lat_field);
        let handlers = self.handlers();
        let specs = points
            .iter()
            .map(|&(i, lon, lat)| {
                let (cx, cy) = projection.project(lon, lat);
                MarkSpec {
                    key: i.to_string(),
                    class: MarkClass::GeoPoint,
                    shape: Shape::Circle { cx, cy, r: cfg.point_radius },
                    color,
                    rows: vec![i],
                    handlers,
                }
            })
            .collect();
        Frame {
            visible,
            x_scale: XScale::Linear(LinearScale::from_values(lon_lat.iter().map(|p| p.0), None, (0.0, self.plot.width()))),
            y_scale: LinearScale::from_values(lon_lat.iter().map(|p| p.1), None, (self.plot.height(), 0.0)),
            projection: Some(projection),
            x_axis: Axis::hidden(Orient::Bottom),
            y_axis: Axis::hidden(Orient::Left),
            specs,
        }
    }

    /// Bound row closest to `local_x` horizontally; the only row for single-row marks.
    fn nearest_row(&self, rows: &[usize], local_x: f64) -> Option<usize> {
        if rows.len() <= 1 {
            return rows.first().copied();
        }
        let XScale::Linear(x) = &self.x_scale else {
            return rows.first().copied();
        };
        rows.iter()
            .filter_map(|&r| self.x_value(r).map(|v| (r, (x.map(v) - local_x).abs())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(r, _)| r)
    }
}

fn write_creating_dirs(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}
