// File: crates/chart-core/src/grid.rs
// Summary: Tick/grid layout helpers (1-2-5 increments, outward "nice" domains).

/// Tick increment for roughly `count` ticks over [start, stop].
/// Positive values are a step; negative values `-k` mean a step of `1/k`,
/// which keeps fractional ticks free of accumulated float error.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !(step.is_finite() && step > 0.0) {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power) / factor)
    }
}

/// Absolute step size for roughly `count` ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let inc = tick_increment(lo, hi, count);
    if inc < 0.0 { -1.0 / inc } else { inc }
}

/// Evenly spaced, human-friendly tick values inside [start, stop].
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let inc = tick_increment(lo, hi, count);
    if inc == 0.0 {
        return Vec::new();
    }
    let mut out: Vec<f64> = if inc > 0.0 {
        let first = (lo / inc).ceil() as i64;
        let last = (hi / inc).floor() as i64;
        (first..=last).map(|i| i as f64 * inc).collect()
    } else {
        let k = -inc;
        let first = (lo * k).ceil() as i64;
        let last = (hi * k).floor() as i64;
        (first..=last).map(|i| i as f64 / k).collect()
    };
    if reverse {
        out.reverse();
    }
    out
}

/// Extend [start, stop] outward to tick boundaries.
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !(start.is_finite() && stop.is_finite()) || start == stop {
        return (start, stop);
    }
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut prev = None;
    for _ in 0..10 {
        let inc = tick_increment(lo, hi, count);
        if inc == 0.0 || prev == Some(inc) {
            break;
        }
        if inc > 0.0 {
            lo = (lo / inc).floor() * inc;
            hi = (hi / inc).ceil() * inc;
        } else {
            let k = -inc;
            lo = (lo * k).floor() / k;
            hi = (hi * k).ceil() / k;
        }
        prev = Some(inc);
    }
    if reverse { (hi, lo) } else { (lo, hi) }
}
