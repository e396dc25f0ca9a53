// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for chart construction, data loading and interaction.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// A required constructor parameter was not supplied.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// An option was supplied but cannot be used as given.
    #[error("invalid option `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    /// A field name does not appear in the dataset header.
    #[error("field `{field}` not found in data header (available: {available})")]
    UnknownField { field: String, available: String },

    /// A series selector names a field the chart was not configured with.
    #[error("series `{0}` is not configured for this chart")]
    UnknownSeries(String),

    /// A pointer event targeted a key with no rendered mark.
    #[error("no mark with key `{0}`")]
    UnknownMark(String),

    #[error("failed to read data source {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to format markup")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
