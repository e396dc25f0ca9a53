// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the public API for building, updating and serializing charts.

pub mod axis;
pub mod chart;
pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod interaction;
pub mod join;
pub mod loader;
pub mod mark;
pub mod projection;
pub mod scale;
mod svg;
pub mod theme;
pub mod types;
pub mod view;

pub use axis::{Axis, Orient, Tick};
pub use chart::{Chart, SeriesSelector, XScale, LINE_KEY};
pub use config::{ChartConfig, ChartKind, ChartOptions};
pub use data::{Coercion, Dataset, Record};
pub use error::{ChartError, Result};
pub use format::ValueFormat;
pub use interaction::{Toggle, ToggleGroup, Tooltip, TooltipFormatter};
pub use join::{reconcile, JoinPlan};
pub use loader::load_csv;
pub use mark::{Handlers, LayerDiff, Mark, MarkClass, Shape};
pub use projection::{Projection, ProjectionKind};
pub use scale::{BandScale, LinearScale};
pub use svg::escape;
pub use theme::{Color, Theme};
pub use types::Insets;
