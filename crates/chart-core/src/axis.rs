// File: crates/chart-core/src/axis.rs
// Summary: Axis model: orientation, formatted ticks and gridline length.

use crate::format::ValueFormat;
use crate::scale::{BandScale, LinearScale};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Pixel offset along the axis.
    pub offset: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orient: Orient,
    pub label: Option<String>,
    pub ticks: Vec<Tick>,
    /// Gridline length drawn across the plot (0 for no gridlines).
    pub grid_len: f64,
}

impl Axis {
    pub fn linear(
        orient: Orient,
        scale: &LinearScale,
        count: usize,
        format: &ValueFormat,
        label: Option<String>,
        grid_len: f64,
    ) -> Self {
        let step = scale.tick_step(count);
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| Tick { offset: scale.map(v), label: format.format(v, step) })
            .collect();
        Self { orient, label, ticks, grid_len }
    }

    /// One tick per category, at the band centre. No gridlines.
    pub fn band(orient: Orient, scale: &BandScale, label: Option<String>) -> Self {
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|c| scale.center(c).map(|offset| Tick { offset, label: c.clone() }))
            .collect();
        Self { orient, label, ticks, grid_len: 0.0 }
    }

    /// Axis without ticks (geo-scatter has no cartesian axes).
    pub fn hidden(orient: Orient) -> Self {
        Self { orient, label: None, ticks: Vec::new(), grid_len: 0.0 }
    }
}
