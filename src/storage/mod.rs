//! Dataset persistence: the whole in-memory dataset serialized as a single
//! bincode blob at one path, read at startup and rewritten after every
//! mutation. The rest of the application treats the blob as opaque.

pub mod model;
mod seed;

use std::fs;
use std::path::Path;

pub use model::Dataset;
pub use seed::sample_dataset;

/// Errors from reading/writing the dataset blob.
#[derive(Debug, Clone)]
pub enum StoreError {
    Io(String),
    Decode(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "I/O error: {}", msg),
            StoreError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Loads the dataset blob. `Ok(None)` when the file does not exist yet.
pub fn load(path: &Path) -> Result<Option<Dataset>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path).map_err(|e| StoreError::Io(e.to_string()))?;
    let dataset =
        bincode::deserialize(&bytes).map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(Some(dataset))
}

/// Serializes and writes the whole dataset.
pub fn save(path: &Path, dataset: &Dataset) -> Result<(), StoreError> {
    let bytes = bincode::serialize(dataset).map_err(|e| StoreError::Decode(e.to_string()))?;
    fs::write(path, bytes).map_err(|e| StoreError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.dat");
        assert!(load(&path).unwrap().is_none());
    }

    #[test]
    fn dataset_round_trips_through_the_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tilltop.dat");

        let dataset = sample_dataset();
        save(&path, &dataset).unwrap();

        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded.products.len(), dataset.products.len());
        assert_eq!(loaded.sales.len(), dataset.sales.len());
        assert_eq!(
            loaded.products[0].name, dataset.products[0].name,
        );
    }

    #[test]
    fn corrupt_blob_reports_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dat");
        std::fs::write(&path, b"not a dataset").unwrap();
        assert!(matches!(load(&path), Err(StoreError::Decode(_))));
    }
}
