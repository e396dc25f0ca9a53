// File: crates/chart-core/src/interaction.rs
// Summary: Series toggle controls and the per-chart tooltip overlay.

use std::time::Duration;

use crate::data::Record;
use crate::error::{ChartError, Result};

/// Caller-supplied tooltip content for one bound record.
pub type TooltipFormatter = Box<dyn Fn(&Record) -> String>;

/// Offset of the overlay from the pointer, in pixels.
pub const TOOLTIP_OFFSET: (f64, f64) = (20.0, -28.0);
pub const TOOLTIP_OPACITY: f64 = 0.9;
pub const TOOLTIP_FADE_IN: Duration = Duration::from_millis(200);
pub const TOOLTIP_FADE_OUT: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toggle {
    pub series: String,
    pub selected: bool,
}

/// One control per series; exactly one is selected at any time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleGroup {
    controls: Vec<Toggle>,
}

impl ToggleGroup {
    /// The first series starts selected. Returns None for an empty list.
    pub fn new<S: AsRef<str>>(series: &[S]) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let controls = series
            .iter()
            .enumerate()
            .map(|(i, s)| Toggle { series: s.as_ref().to_string(), selected: i == 0 })
            .collect();
        Some(Self { controls })
    }

    pub fn controls(&self) -> &[Toggle] {
        &self.controls
    }

    pub fn selected(&self) -> &str {
        self.controls
            .iter()
            .find(|t| t.selected)
            .map(|t| t.series.as_str())
            .unwrap_or_default()
    }

    /// Select `series`. Returns `Ok(false)` when it already was selected
    /// (nothing changes), `Ok(true)` when the selection moved.
    pub fn click(&mut self, series: &str) -> Result<bool> {
        let target = self
            .controls
            .iter()
            .position(|t| t.series == series)
            .ok_or_else(|| ChartError::UnknownSeries(series.to_string()))?;
        if self.controls[target].selected {
            return Ok(false);
        }
        for (i, t) in self.controls.iter_mut().enumerate() {
            t.selected = i == target;
        }
        Ok(true)
    }
}

/// Positioned overlay shared by every mark of one chart. Re-populated on each
/// hover, never recreated.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub html: String,
    pub left: f64,
    pub top: f64,
    /// Opacity the current fade ends at.
    pub opacity: f64,
    /// Length of the current fade.
    pub fade: Duration,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self { html: String::new(), left: 0.0, top: 0.0, opacity: 0.0, fade: Duration::ZERO }
    }
}

impl Tooltip {
    pub fn show(&mut self, html: String, page_x: f64, page_y: f64) {
        self.html = html;
        self.left = page_x + TOOLTIP_OFFSET.0;
        self.top = page_y + TOOLTIP_OFFSET.1;
        self.opacity = TOOLTIP_OPACITY;
        self.fade = TOOLTIP_FADE_IN;
    }

    /// Fade out; content and position stay for the duration of the fade.
    pub fn hide(&mut self) {
        self.opacity = 0.0;
        self.fade = TOOLTIP_FADE_OUT;
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}
