//! JSON Data Loader Module
//! Reads datasets and dashboard definitions from JSON files.

use crate::data::{CategoryDataset, Dataset};
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads chart inputs from disk. Validation runs during deserialization,
/// so anything returned here is ready to render.
pub struct DataLoader;

impl DataLoader {
    /// Load any JSON-deserializable chart input.
    pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let value = serde_json::from_str(&content)?;
        debug!(path = %path.display(), bytes = content.len(), "Loaded chart data");
        Ok(value)
    }

    /// Load a `{"values": [...], "labels": [...]}` series.
    pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
        Self::load_json(path)
    }

    /// Load a `[{"name": ..., "value": ...}, ...]` category list.
    pub fn load_categories(path: impl AsRef<Path>) -> Result<CategoryDataset> {
        Self::load_json(path)
    }
}
