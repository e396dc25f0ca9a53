// File: crates/chart-core/src/format.rs
// Summary: Tick and tooltip value formatting.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;
use num_format::{Locale, ToFormattedString};
use serde::Deserialize;

/// Value formatter for axis ticks.
///
/// `Auto` picks a precision from the tick step and groups thousands
/// (`14,000`, `0.25`); the others ignore the step.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    #[default]
    Auto,
    /// Fixed decimals, no grouping.
    Fixed(usize),
    /// Multiply by 100 and append `%`, with the given decimals.
    Percent(usize),
    /// Thousands separators with the given decimals.
    Grouped(usize),
    /// chrono format applied to epoch seconds (UTC).
    Date(String),
}

impl ValueFormat {
    pub fn format(&self, value: f64, step: f64) -> String {
        match self {
            ValueFormat::Auto => grouped(value, step_precision(step)),
            ValueFormat::Fixed(p) => format!("{:.*}", p, value),
            ValueFormat::Percent(p) => format!("{:.*}%", p, value * 100.0),
            ValueFormat::Grouped(p) => grouped(value, *p),
            ValueFormat::Date(fmt) => {
                let Some(dt) = DateTime::from_timestamp(value.round() as i64, 0) else {
                    return format!("{value}");
                };
                let mut out = String::new();
                match write!(out, "{}", dt.format(fmt)) {
                    Ok(()) => out,
                    Err(_) => format!("{value}"),
                }
            }
        }
    }
}

/// Whether chrono accepts every specifier in `fmt`.
pub fn is_valid_time_format(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}

/// Decimals needed to show multiples of `step` exactly.
pub fn step_precision(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    let p = -(step.log10().floor());
    // 0.25 needs two decimals even though log10 says one
    let mut p = p.max(0.0) as usize;
    while p < 12 {
        let scaled = step * 10f64.powi(p as i32);
        if (scaled - scaled.round()).abs() < 1e-9 {
            break;
        }
        p += 1;
    }
    p
}

/// `value` at `precision` decimals with `,` between thousands.
pub fn grouped(value: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let int = match int.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => int.to_string(),
    };
    // no sign when the value rounds to zero
    let sign = if value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{int}")
    } else {
        format!("{sign}{int}.{frac}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_uses_step_precision_and_grouping() {
        assert_eq!(ValueFormat::Auto.format(14000.0, 2000.0), "14,000");
        assert_eq!(ValueFormat::Auto.format(0.4, 0.2), "0.4");
        assert_eq!(ValueFormat::Auto.format(0.25, 0.05), "0.25");
        assert_eq!(ValueFormat::Auto.format(-1234567.0, 1.0), "-1,234,567");
        assert_eq!(ValueFormat::Auto.format(-0.001, 1.0), "0");
    }

    #[test]
    fn explicit_formats() {
        assert_eq!(ValueFormat::Fixed(2).format(3.14159, 1.0), "3.14");
        assert_eq!(ValueFormat::Percent(0).format(0.42, 1.0), "42%");
        assert_eq!(ValueFormat::Grouped(1).format(12345.67, 1.0), "12,345.7");
        assert_eq!(ValueFormat::Date("%Y-%m-%d".into()).format(86_400.0, 1.0), "1970-01-02");
    }

    #[test]
    fn precision_for_fractional_steps() {
        assert_eq!(step_precision(1000.0), 0);
        assert_eq!(step_precision(0.2), 1);
        assert_eq!(step_precision(0.25), 2);
        assert_eq!(step_precision(0.0), 0);
    }

    #[test]
    fn bad_date_format_falls_back_to_the_number() {
        assert!(is_valid_time_format("%Y-%m-%d %H:%M"));
        assert!(!is_valid_time_format("%Q"));
        assert!(!is_valid_time_format("%Y-%Q"));
        assert_eq!(ValueFormat::Date("%Q".into()).format(0.0, 1.0), "0");
    }
}
