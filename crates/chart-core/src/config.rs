// File: crates/chart-core/src/config.rs
// Summary: Caller-facing options (all optional) and their resolution into a complete chart configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::data::Coercion;
use crate::error::{ChartError, Result};
use crate::format::{self, ValueFormat};
use crate::projection::ProjectionKind;
use crate::theme::{self, Color, Theme, CATEGORY10};
use crate::types::{Insets, HEIGHT, WIDTH};

/// Default row limit for ranked bar displays.
pub const DEFAULT_BAR_LIMIT: i64 = 10;
/// Transition used when a toggle control switches series.
pub const DEFAULT_TRANSITION_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Scatter,
    Bar,
    Line,
    MultiLine,
    GeoScatter,
}

impl ChartKind {
    /// Class put on the container element.
    pub fn css_class(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "d3-scatter",
            ChartKind::Bar => "d3-bar",
            ChartKind::Line => "d3-line",
            ChartKind::MultiLine => "d3-multi-line",
            ChartKind::GeoScatter => "d3-geo-scatter",
        }
    }

    /// Whether several y fields become toggle controls (one series shown at a time).
    pub fn toggles_series(&self) -> bool {
        matches!(self, ChartKind::Scatter | ChartKind::Bar | ChartKind::Line)
    }
}

/// Partial, caller-supplied chart parameters. Unset fields take the
/// defaults documented on [`ChartConfig`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartOptions {
    /// Container selector, e.g. `#scatter`.
    pub container: Option<String>,
    /// Independent-variable field (longitude for geo-scatter).
    pub x: Option<String>,
    /// Dependent-variable field(s) (latitude for geo-scatter).
    pub y: Vec<String>,
    /// Path of the CSV data source.
    pub data: Option<PathBuf>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub sort: Option<bool>,
    /// Row limit; zero or negative disables limiting.
    pub limit: Option<i64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub margins: Option<Insets>,
    pub x_ticks: Option<usize>,
    pub y_ticks: Option<usize>,
    pub x_domain: Option<(f64, f64)>,
    pub y_domain: Option<(f64, f64)>,
    pub nice: Option<bool>,
    pub x_format: Option<ValueFormat>,
    pub y_format: Option<ValueFormat>,
    /// chrono format for a temporal x field, e.g. `%Y-%m-%d`.
    pub x_time_format: Option<String>,
    pub point_radius: Option<f64>,
    pub duration_ms: Option<u64>,
    pub theme: Option<String>,
    /// CSS colours (`#1f77b4`, `teal`, `rgb(..)`) replacing the default category palette.
    pub palette: Option<Vec<String>>,
    pub projection: Option<ProjectionKind>,
}

impl ChartOptions {
    pub fn new(
        container: impl Into<String>,
        x: impl Into<String>,
        y: impl IntoIterator<Item = impl Into<String>>,
        data: impl Into<PathBuf>,
    ) -> Self {
        Self {
            container: Some(container.into()),
            x: Some(x.into()),
            y: y.into_iter().map(Into::into).collect(),
            data: Some(data.into()),
            ..Self::default()
        }
    }

    pub fn labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Produce a complete configuration for `kind`, failing fast on missing
    /// required parameters or unusable values.
    pub fn resolve(self, kind: ChartKind) -> Result<ChartConfig> {
        let container = self
            .container
            .filter(|c| !c.trim().is_empty())
            .ok_or(ChartError::MissingParameter("container"))?;
        let x_field = self
            .x
            .filter(|x| !x.is_empty())
            .ok_or(ChartError::MissingParameter("x"))?;
        if self.y.is_empty() || self.y.iter().any(String::is_empty) {
            return Err(ChartError::MissingParameter("y"));
        }
        if kind == ChartKind::GeoScatter && self.y.len() != 1 {
            return Err(ChartError::InvalidOption {
                option: "y",
                reason: "geo-scatter takes exactly one latitude field".into(),
            });
        }
        let data_path = self.data.ok_or(ChartError::MissingParameter("data"))?;

        let width = self.width.unwrap_or(WIDTH);
        let height = self.height.unwrap_or(HEIGHT);
        let insets = self.margins.unwrap_or_default();
        if width <= insets.hsum() || height <= insets.vsum() {
            return Err(ChartError::InvalidOption {
                option: "margins",
                reason: format!("{width}x{height} surface leaves no plot area inside {insets:?}"),
            });
        }

        let ranked = kind == ChartKind::Bar;
        let limit = self
            .limit
            .unwrap_or(if ranked { DEFAULT_BAR_LIMIT } else { 0 });

        let palette = match self.palette {
            Some(hexes) => hexes
                .iter()
                .map(|h| {
                    Color::parse(h).ok_or_else(|| ChartError::InvalidOption {
                        option: "palette",
                        reason: format!("`{h}` is not a CSS colour"),
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => CATEGORY10.to_vec(),
        };
        if palette.is_empty() {
            return Err(ChartError::InvalidOption {
                option: "palette",
                reason: "at least one colour is required".into(),
            });
        }

        for (option, domain) in [("x_domain", self.x_domain), ("y_domain", self.y_domain)] {
            if let Some((lo, hi)) = domain {
                if !(lo.is_finite() && hi.is_finite()) {
                    return Err(ChartError::InvalidOption {
                        option,
                        reason: format!("[{lo}, {hi}] is not a finite interval"),
                    });
                }
            }
        }

        let date_formats = [
            ("x_time_format", self.x_time_format.as_deref()),
            ("x_format", date_pattern(self.x_format.as_ref())),
            ("y_format", date_pattern(self.y_format.as_ref())),
        ];
        for (option, fmt) in date_formats {
            if let Some(fmt) = fmt.filter(|f| !format::is_valid_time_format(f)) {
                return Err(ChartError::InvalidOption {
                    option,
                    reason: format!("`{fmt}` is not a valid date format"),
                });
            }
        }

        let x_coercion = match &self.x_time_format {
            Some(fmt) => Coercion::Date(fmt.clone()),
            None => Coercion::Number,
        };
        let x_format = match (self.x_format, &self.x_time_format) {
            (Some(f), _) => f,
            (None, Some(fmt)) => ValueFormat::Date(fmt.clone()),
            (None, None) => ValueFormat::Auto,
        };

        let y_label = self
            .y_label
            .or_else(|| (self.y.len() == 1).then(|| self.y[0].clone()));

        Ok(ChartConfig {
            kind,
            container,
            x_label: self.x_label.unwrap_or_else(|| x_field.clone()),
            x_field,
            y_fields: self.y,
            data_path,
            y_label,
            sort: self.sort.unwrap_or(ranked),
            limit: (limit > 0).then_some(limit as usize),
            width,
            height,
            insets,
            x_ticks: self.x_ticks.unwrap_or(8),
            y_ticks: self.y_ticks.unwrap_or(7),
            x_domain: self.x_domain,
            y_domain: self.y_domain,
            nice: self.nice.unwrap_or(false),
            x_format,
            y_format: self.y_format.unwrap_or_default(),
            x_coercion,
            point_radius: self.point_radius.unwrap_or(8.0).max(0.0),
            transition: Duration::from_millis(self.duration_ms.unwrap_or(DEFAULT_TRANSITION_MS)),
            theme: self.theme.as_deref().map(theme::find).unwrap_or_default(),
            palette,
            projection: self.projection.unwrap_or_default(),
        })
    }
}

fn date_pattern(format: Option<&ValueFormat>) -> Option<&str> {
    match format {
        Some(ValueFormat::Date(fmt)) => Some(fmt.as_str()),
        _ => None,
    }
}

/// Fully-resolved display configuration. Built once, read-only afterwards.
#[derive(Clone, Debug)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub container: String,
    pub x_field: String,
    /// Never empty.
    pub y_fields: Vec<String>,
    pub data_path: PathBuf,
    /// Defaults to the x field name.
    pub x_label: String,
    /// Defaults to the y field name when exactly one is given, else unset.
    pub y_label: Option<String>,
    /// Descending by the active metric (stable). Default: true for bars.
    pub sort: bool,
    /// None = unlimited. Default: 10 for bars.
    pub limit: Option<usize>,
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub x_domain: Option<(f64, f64)>,
    pub y_domain: Option<(f64, f64)>,
    pub nice: bool,
    pub x_format: ValueFormat,
    pub y_format: ValueFormat,
    pub x_coercion: Coercion,
    pub point_radius: f64,
    pub transition: Duration,
    pub theme: Theme,
    pub palette: Vec<Color>,
    pub projection: ProjectionKind,
}

impl ChartConfig {
    /// Container id without the leading `#`.
    pub fn container_id(&self) -> &str {
        self.container.trim().trim_start_matches('#')
    }
}
