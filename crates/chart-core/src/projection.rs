// File: crates/chart-core/src/projection.rs
// Summary: Geographic projections fitted to the visible lon/lat extent.

use std::f64::consts::{FRAC_PI_4, PI};

use serde::Deserialize;

use crate::geometry::Rect;

/// Latitude clamp that keeps Mercator finite.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    #[default]
    Mercator,
    Equirectangular,
}

impl ProjectionKind {
    /// Unscaled planar coordinates, y pointing north.
    fn raw(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lambda = lon.to_radians();
        match self {
            ProjectionKind::Equirectangular => (lambda, lat.to_radians()),
            ProjectionKind::Mercator => {
                let phi = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
                (lambda, (FRAC_PI_4 + phi / 2.0).tan().ln())
            }
        }
    }
}

/// A projection with uniform scale and a translation so that the fitted
/// extent is centred in the target area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub kind: ProjectionKind,
    pub scale: f64,
    pub translate: (f64, f64),
}

impl Projection {
    /// Fit `points` (lon, lat) into `area` keeping aspect ratio. With no points,
    /// or a single point, the projection centres the data at the area midpoint.
    pub fn fit(kind: ProjectionKind, points: &[(f64, f64)], area: &Rect) -> Self {
        let raw: Vec<(f64, f64)> = points.iter().map(|&(lon, lat)| kind.raw(lon, lat)).collect();
        let cx = area.left + area.width() * 0.5;
        let cy = area.top + area.height() * 0.5;
        let (mut x0, mut x1, mut y0, mut y1) = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in &raw {
            x0 = x0.min(x);
            x1 = x1.max(x);
            y0 = y0.min(y);
            y1 = y1.max(y);
        }
        if raw.is_empty() {
            // whole-world width across the area
            let scale = area.width().max(1.0) / (2.0 * PI);
            return Self { kind, scale, translate: (cx, cy) };
        }
        let dx = x1 - x0;
        let dy = y1 - y0;
        let scale = match (dx > 1e-12, dy > 1e-12) {
            (true, true) => (area.width() / dx).min(area.height() / dy),
            (true, false) => area.width() / dx,
            (false, true) => area.height() / dy,
            (false, false) => area.width().max(1.0) / (2.0 * PI),
        };
        let mx = (x0 + x1) * 0.5;
        let my = (y0 + y1) * 0.5;
        Self { kind, scale, translate: (cx - mx * scale, cy + my * scale) }
    }

    /// Screen position of (lon, lat); screen y grows downward.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (x, y) = self.kind.raw(lon, lat);
        (self.translate.0 + x * self.scale, self.translate.1 - y * self.scale)
    }
}
