// File: crates/chart-core/src/mark.rs
// Summary: Keyed visual marks (points, bars, line paths), their transitions, and the reconciled mark layer.
// Notes:
// - Marks are never recreated for a surviving key; ids and interaction state
//   (selected/hovered) carry across updates.

use std::time::Duration;

use crate::geometry::lerp;
use crate::join::reconcile;
use crate::theme::Color;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle { cx: f64, cy: f64, r: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// Polyline through `points`, in order.
    Path { points: Vec<(f64, f64)> },
}

impl Shape {
    /// Interpolate toward `to` at `t` in [0, 1]. Shapes of different kinds,
    /// or paths with different point counts, snap to `to`.
    pub fn lerp(&self, to: &Shape, t: f64) -> Shape {
        let t = t.clamp(0.0, 1.0);
        match (self, to) {
            (Shape::Circle { cx, cy, r }, Shape::Circle { cx: cx2, cy: cy2, r: r2 }) => Shape::Circle {
                cx: lerp(*cx, *cx2, t),
                cy: lerp(*cy, *cy2, t),
                r: lerp(*r, *r2, t),
            },
            (
                Shape::Rect { x, y, width, height },
                Shape::Rect { x: x2, y: y2, width: w2, height: h2 },
            ) => Shape::Rect {
                x: lerp(*x, *x2, t),
                y: lerp(*y, *y2, t),
                width: lerp(*width, *w2, t),
                height: lerp(*height, *h2, t),
            },
            (Shape::Path { points: a }, Shape::Path { points: b }) if a.len() == b.len() => Shape::Path {
                points: a
                    .iter()
                    .zip(b)
                    .map(|(p, q)| (lerp(p.0, q.0, t), lerp(p.1, q.1, t)))
                    .collect(),
            },
            _ => to.clone(),
        }
    }
}

/// Element class used for stylesheet hook-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkClass {
    DataPoint,
    Bar,
    Line,
    GeoPoint,
}

impl MarkClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkClass::DataPoint => "data-point",
            MarkClass::Bar => "bar",
            MarkClass::Line => "line",
            MarkClass::GeoPoint => "geo-point",
        }
    }
}

/// Pointer handlers bound to a mark during the last render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Handlers {
    /// pointer-enter/leave drive the tooltip.
    pub hover: bool,
    /// click toggles the persistent selected state.
    pub click: bool,
}

/// Desired state of one mark, produced by a render pass before reconciliation.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkSpec {
    pub key: String,
    pub class: MarkClass,
    pub shape: Shape,
    pub color: Color,
    /// Bound record indices (one for points/bars, many for lines).
    pub rows: Vec<usize>,
    pub handlers: Handlers,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity; kept across updates of the same key.
    pub id: u64,
    pub key: String,
    pub class: MarkClass,
    /// Target geometry.
    pub shape: Shape,
    /// Geometry the transition starts from; None renders `shape` immediately.
    pub from: Option<Shape>,
    pub duration: Duration,
    pub color: Color,
    pub rows: Vec<usize>,
    pub handlers: Handlers,
    pub selected: bool,
    pub hovered: bool,
}

impl Mark {
    /// Geometry `elapsed` into the current transition.
    pub fn shape_at(&self, elapsed: Duration) -> Shape {
        match &self.from {
            Some(from) if !self.duration.is_zero() => {
                from.lerp(&self.shape, elapsed.as_secs_f64() / self.duration.as_secs_f64())
            }
            _ => self.shape.clone(),
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.from.is_some() && !self.duration.is_zero()
    }

    /// Class attribute: base class plus `selected`, or `hover` when not selected.
    pub fn class_list(&self) -> String {
        let base = self.class.as_str();
        if self.selected {
            format!("{base} selected")
        } else if self.hovered {
            format!("{base} hover")
        } else {
            base.to_string()
        }
    }
}

/// Summary of one reconciliation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerDiff {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Ordered, keyed set of marks owned by one chart.
#[derive(Clone, Debug, Default)]
pub struct MarkLayer {
    marks: Vec<Mark>,
    next_id: u64,
}

impl MarkLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Mark> {
        self.marks.iter().find(|m| m.key == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Mark> {
        self.marks.iter_mut().find(|m| m.key == key)
    }

    /// Bring the layer in line with `specs` (in display order). Surviving keys
    /// keep their mark and start a transition from their current geometry when
    /// it changed; new keys enter, missing keys are removed.
    pub fn reconcile(&mut self, specs: Vec<MarkSpec>, duration: Duration) -> LayerDiff {
        let old_keys: Vec<&str> = self.marks.iter().map(|m| m.key.as_str()).collect();
        let new_keys: Vec<&str> = specs.iter().map(|s| s.key.as_str()).collect();
        let plan = reconcile(&old_keys, &new_keys);
        let diff = LayerDiff {
            entered: plan.enter.len(),
            updated: plan.update.len(),
            exited: plan.exit.len(),
        };

        let mut old: Vec<Option<Mark>> = std::mem::take(&mut self.marks).into_iter().map(Some).collect();
        let mut matched: Vec<Option<usize>> = vec![None; specs.len()];
        for &(i, j) in &plan.update {
            matched[j] = Some(i);
        }

        let mut marks = Vec::with_capacity(specs.len());
        for (j, spec) in specs.into_iter().enumerate() {
            let prior = matched[j].and_then(|i| old[i].take());
            let mark = match prior {
                Some(prev) => {
                    // an unchanged target keeps whatever transition is in flight
                    let (from, duration) = if prev.shape == spec.shape {
                        (prev.from, prev.duration)
                    } else {
                        ((!duration.is_zero()).then_some(prev.shape), duration)
                    };
                    Mark {
                        id: prev.id,
                        key: spec.key,
                        class: spec.class,
                        shape: spec.shape,
                        from,
                        duration,
                        color: spec.color,
                        rows: spec.rows,
                        handlers: spec.handlers,
                        selected: prev.selected && spec.handlers.click,
                        hovered: prev.hovered && spec.handlers.hover,
                    }
                }
                None => {
                    let id = self.next_id;
                    self.next_id += 1;
                    Mark {
                        id,
                        key: spec.key,
                        class: spec.class,
                        shape: spec.shape,
                        from: None,
                        duration,
                        color: spec.color,
                        rows: spec.rows,
                        handlers: spec.handlers,
                        selected: false,
                        hovered: false,
                    }
                }
            };
            marks.push(mark);
        }
        self.marks = marks;
        diff
    }
}
