use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

use crate::models::PriceSample;
use crate::utils::ChartError;

/// Parse a JSON array of price samples
pub fn parse_samples(path: &Path, text: &str) -> Result<Vec<PriceSample>, ChartError> {
    serde_json::from_str(text).map_err(|e| ChartError::from_json(path.to_path_buf(), e))
}

/// Read and parse the whole price file
pub async fn load_samples(path: &Path) -> Result<Vec<PriceSample>, ChartError> {
    debug!("Reading price samples from {}", path.display());

    let text = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ChartError::NotFound(path.to_path_buf()),
        _ => ChartError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let samples = parse_samples(path, &text)?;
    info!("Loaded {} price samples from {}", samples.len(), path.display());

    Ok(samples)
}
