// File: crates/chart-core/src/loader.rs
// Summary: Asynchronous one-shot CSV loading (single read, no retry).

use std::path::Path;

use log::info;

use crate::data::Dataset;
use crate::error::{ChartError, Result};

/// Read and parse a CSV file. Fetch and parse failures surface as errors;
/// nothing is retried.
pub async fn load_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|source| ChartError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = Dataset::from_reader(bytes.as_slice())?;
    info!(
        "loaded {} rows ({} fields) from {}",
        dataset.len(),
        dataset.headers().len(),
        path.display()
    );
    Ok(dataset)
}
