//! JSON file storage for the route list.

use std::path::{Path, PathBuf};

use crate::domain::Route;

use super::RouteStore;
use super::error::StoreError;

/// Default routes file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "routes.json";

/// Stores the route list as a pretty-printed JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_PATH)
    }
}

impl RouteStore for JsonFileStore {
    /// Returns `Ok(None)` when the file does not exist yet.
    fn load(&self) -> Result<Option<Vec<Route>>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    message: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        let routes: Vec<Route> =
            serde_json::from_str(&contents).map_err(|e| StoreError::Json {
                message: format!("{}: {}", self.path.display(), e),
            })?;
        Ok(Some(routes))
    }

    /// Creates parent directories if they don't exist.
    fn save(&self, routes: &[Route]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                message: format!("failed to create store directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(routes).map_err(|e| StoreError::Json {
            message: format!("failed to serialize routes: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::Io {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}
