//! Loading the stop catalog from a JSON file.

use std::path::Path;

use serde::Deserialize;

use crate::domain::Stop;

use super::error::CatalogError;
use super::stops::StopCatalog;

/// Accepted catalog file layouts: a bare array of stops, or an object with
/// a `stops` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { stops: Vec<Stop> },
    Bare(Vec<Stop>),
}

impl CatalogDocument {
    fn into_stops(self) -> Vec<Stop> {
        match self {
            CatalogDocument::Wrapped { stops } | CatalogDocument::Bare(stops) => stops,
        }
    }
}

impl StopCatalog {
    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Json {
                message: e.to_string(),
            })?;
        Self::new(document.into_stops())
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json(&contents)
    }
}
