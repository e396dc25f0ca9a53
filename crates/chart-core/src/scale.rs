// File: crates/chart-core/src/scale.rs
// Summary: Continuous (linear) and categorical (band) scales derived from visible data.

use std::collections::HashMap;

use crate::grid;

/// Data-space value (e.g., altitude, count, epoch seconds).
pub type Value = f64;

/// [min, max] of the finite values, or None for an empty/all-missing input.
pub fn extent<I: IntoIterator<Item = Value>>(values: I) -> Option<(Value, Value)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo <= hi).then_some((lo, hi))
}

/// Linear map from a data domain to a pixel range. The range may be inverted
/// (e.g. `[height, 0]` for a vertical axis so larger values plot higher).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (Value, Value),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (Value, Value), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain from the values' extent unless `fixed` is given; an empty input
    /// falls back to `[0, 0]`.
    pub fn from_values<I: IntoIterator<Item = Value>>(
        values: I,
        fixed: Option<(Value, Value)>,
        range: (f64, f64),
    ) -> Self {
        let domain = fixed.or_else(|| extent(values)).unwrap_or((0.0, 0.0));
        Self { domain, range }
    }

    #[inline]
    pub fn map(&self, v: Value) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() < 1e-12 {
            return (r0 + r1) * 0.5;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> Value {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span.abs() < 1e-12 {
            return (d0 + d1) * 0.5;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }

    pub fn ticks(&self, count: usize) -> Vec<Value> {
        grid::ticks(self.domain.0, self.domain.1, count)
    }

    pub fn tick_step(&self, count: usize) -> Value {
        grid::tick_step(self.domain.0, self.domain.1, count)
    }

    /// Round the domain outward to tick boundaries.
    pub fn nice(mut self, count: usize) -> Self {
        self.domain = grid::nice(self.domain.0, self.domain.1, count);
        self
    }

    /// Range endpoints ordered low to high.
    pub fn range_extent(&self) -> (f64, f64) {
        let (a, b) = self.range;
        if a <= b { (a, b) } else { (b, a) }
    }
}

/// Band padding used by ranked bar displays, as a fraction of the step.
pub const DEFAULT_BAND_PADDING: f64 = 0.2;

/// Ordinal scale that splits a range into equal bands, one per category.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Domain order is kept; repeated categories collapse to their first occurrence.
    pub fn new<I, S>(categories: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut domain = Vec::new();
        let mut index = HashMap::new();
        for c in categories {
            let c: String = c.into();
            if !index.contains_key(&c) {
                index.insert(c.clone(), domain.len());
                domain.push(c);
            }
        }
        let padding = padding.clamp(0.0, 1.0);
        let mut s = Self {
            domain,
            index,
            range,
            padding_inner: padding,
            padding_outer: padding,
            align: 0.5,
            start: range.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        s.rescale();
        s
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let denom = (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.step = (hi - lo) / denom;
        self.start = lo + ((hi - lo) - self.step * (n - self.padding_inner)) * self.align;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
        if n == 0.0 {
            self.step = 0.0;
            self.bandwidth = 0.0;
            self.start = lo;
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Left edge of the category's band.
    pub fn position(&self, category: &str) -> Option<f64> {
        let i = *self.index.get(category)?;
        let reverse = self.range.1 < self.range.0;
        let i = if reverse { self.domain.len() - 1 - i } else { i };
        Some(self.start + self.step * i as f64)
    }

    pub fn center(&self, category: &str) -> Option<f64> {
        self.position(category).map(|x| x + self.bandwidth * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn extent_skips_non_finite_and_empty() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(extent(Vec::<f64>::new()), None);
    }

    #[test]
    fn linear_maps_inverted_range() {
        let s = LinearScale::new((0.0, 9.0), (350.0, 0.0));
        assert!(close(s.map(0.0), 350.0));
        assert!(close(s.map(9.0), 0.0));
        assert!(close(s.map(4.5), 175.0));
        assert!(close(s.invert(175.0), 4.5));
        assert_eq!(s.range_extent(), (0.0, 350.0));
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let s = LinearScale::from_values(Vec::<f64>::new(), None, (0.0, 100.0));
        assert_eq!(s.domain, (0.0, 0.0));
        assert!(close(s.map(42.0), 50.0));
    }

    #[test]
    fn fixed_domain_wins_over_data() {
        let s = LinearScale::from_values([1.0, 2.0], Some((-500.0, 14500.0)), (0.0, 620.0));
        assert_eq!(s.domain, (-500.0, 14500.0));
        let n = LinearScale::new((45.0, 105.0), (350.0, 0.0)).nice(7);
        assert_eq!(n.domain, (40.0, 110.0));
    }

    #[test]
    fn band_layout_with_padding() {
        // n = 3, padding 0.2: step = 100 / (3 - 0.2 + 0.4) = 31.25
        let b = BandScale::new(["B", "A", "C"], (0.0, 100.0), DEFAULT_BAND_PADDING);
        assert!(close(b.step(), 31.25));
        assert!(close(b.bandwidth(), 25.0));
        assert!(close(b.position("B").unwrap(), 6.25));
        assert!(close(b.position("A").unwrap(), 37.5));
        assert!(close(b.position("C").unwrap(), 68.75));
        assert!(close(b.center("C").unwrap(), 81.25));
        assert!(b.position("Z").is_none());
    }

    #[test]
    fn band_dedups_and_handles_empty() {
        let b = BandScale::new(["x", "y", "x"], (0.0, 90.0), 0.0);
        assert_eq!(b.domain(), ["x", "y"]);
        assert!(close(b.bandwidth(), 45.0));
        let e = BandScale::new(Vec::<String>::new(), (0.0, 90.0), 0.2);
        assert_eq!(e.bandwidth(), 0.0);
        assert!(e.domain().is_empty());
    }
}
