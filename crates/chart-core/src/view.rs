// File: crates/chart-core/src/view.rs
// Summary: Visible-subset computation: missing-value filtering, stable ranking sort, row limit.

use std::cmp::Ordering;

use log::debug;

use crate::data::{Coercion, Dataset};

static NUMBER: Coercion = Coercion::Number;

/// A numeric column the visible rows must provide.
#[derive(Clone, Copy, Debug)]
pub struct Requirement<'a> {
    pub field: &'a str,
    pub coercion: &'a Coercion,
}

impl<'a> Requirement<'a> {
    pub fn number(field: &'a str) -> Self {
        Self { field, coercion: &NUMBER }
    }

    pub fn coerced(field: &'a str, coercion: &'a Coercion) -> Self {
        Self { field, coercion }
    }
}

/// How the visible subset is derived from the dataset.
#[derive(Clone, Debug, Default)]
pub struct ViewSpec<'a> {
    /// Rows failing any requirement are excluded.
    pub require: Vec<Requirement<'a>>,
    /// Rows whose text in these fields is empty are excluded (categorical axes).
    pub require_text: Vec<&'a str>,
    /// Sort descending by this numeric field, keeping input order for ties.
    pub rank_by: Option<&'a str>,
    /// Keep at most this many rows after sorting.
    pub limit: Option<usize>,
}

/// Row indices of the visible subset, in display order.
pub fn visible_rows(dataset: &Dataset, spec: &ViewSpec<'_>) -> Vec<usize> {
    let mut rows: Vec<usize> = dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, r)| spec.require.iter().all(|q| r.coerce(q.field, q.coercion).is_some()))
        .filter(|(_, r)| {
            spec.require_text
                .iter()
                .all(|f| r.get(f).is_some_and(|s| !s.trim().is_empty()))
        })
        .map(|(i, _)| i)
        .collect();
    let dropped = dataset.len() - rows.len();
    if dropped > 0 {
        debug!("{dropped} of {} rows excluded for missing values", dataset.len());
    }

    if let Some(field) = spec.rank_by {
        let metric = |i: usize| dataset.rows()[i].number(field).unwrap_or(f64::NEG_INFINITY);
        // sort_by is stable, so equal metrics keep their input order
        rows.sort_by(|&a, &b| metric(b).partial_cmp(&metric(a)).unwrap_or(Ordering::Equal));
    }
    if let Some(limit) = spec.limit {
        rows.truncate(limit);
    }
    rows
}
