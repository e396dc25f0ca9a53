// File: crates/chart-core/src/data.rs
// Summary: Tabular dataset model (header + string records) with numeric/temporal coercion.

use std::io::Read;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ChartError, Result};

/// How a raw cell is turned into a position on a continuous axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Coercion {
    #[default]
    Number,
    /// chrono format string; parsed values become epoch seconds (UTC).
    Date(String),
}

/// Parse a cell as a finite number. Empty or non-numeric cells are missing.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a cell with a chrono format. Date-only formats are taken at midnight.
pub fn coerce_date(raw: &str, format: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(t, format) {
        return Some(dt.and_utc().timestamp() as f64);
    }
    NaiveDate::parse_from_str(t, format)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp() as f64)
}

/// One row of the dataset. Values stay strings until read through a coercion.
#[derive(Clone, Debug)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&str> {
        let ix = self.headers.iter().position(|h| h == field)?;
        self.values.get(ix).map(String::as_str)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(coerce_number)
    }

    pub fn coerce(&self, field: &str, how: &Coercion) -> Option<f64> {
        let raw = self.get(field)?;
        match how {
            Coercion::Number => coerce_number(raw),
            Coercion::Date(format) => coerce_date(raw, format),
        }
    }

    /// (field, value) pairs in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(String::as_str).zip(self.values.iter().map(String::as_str))
    }
}

/// Ordered sequence of records sharing one header row.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    headers: Arc<[String]>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Parse delimited text with a header row. Ragged rows are an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Arc<[String]> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            rows.push(Record {
                headers: Arc::clone(&headers),
                values: rec.iter().map(str::to_string).collect(),
            });
        }
        Ok(Self { headers, rows })
    }

    pub fn parse(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.headers.iter().any(|h| h == field)
    }

    pub fn require_field(&self, field: &str) -> Result<()> {
        if self.has_field(field) {
            Ok(())
        } else {
            Err(ChartError::UnknownField {
                field: field.to_string(),
                available: self.headers.join(", "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_number_rejects_blank_and_text() {
        assert_eq!(coerce_number(" 4.5 "), Some(4.5));
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("  "), None);
        assert_eq!(coerce_number("n/a"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("inf"), None);
    }

    #[test]
    fn coerce_date_handles_date_only_formats() {
        assert_eq!(coerce_date("1970-01-02", "%Y-%m-%d"), Some(86_400.0));
        assert_eq!(coerce_date("1970-01-01 00:01:00", "%Y-%m-%d %H:%M:%S"), Some(60.0));
        assert_eq!(coerce_date("yesterday", "%Y-%m-%d"), None);
    }

    #[test]
    fn parse_keeps_header_order_and_raw_strings() {
        let ds = Dataset::parse("cat,v\nA,5\nB,\n").unwrap();
        assert_eq!(ds.headers(), ["cat", "v"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[1].get("v"), Some(""));
        assert_eq!(ds.rows()[1].number("v"), None);
        assert_eq!(ds.rows()[0].number("v"), Some(5.0));
        let pairs: Vec<_> = ds.rows()[0].fields().collect();
        assert_eq!(pairs, vec![("cat", "A"), ("v", "5")]);
    }

    #[test]
    fn ragged_rows_are_errors() {
        let err = Dataset::parse("a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ChartError::Csv(_)));
    }

    #[test]
    fn require_field_lists_available_headers() {
        let ds = Dataset::parse("x,y\n1,2\n").unwrap();
        assert!(ds.require_field("x").is_ok());
        let msg = ds.require_field("z").unwrap_err().to_string();
        assert!(msg.contains("`z`") && msg.contains("x, y"), "{msg}");
    }
}
