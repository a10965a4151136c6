//! Route persistence and editing.
//!
//! The route list lives in memory in a [`RouteBook`]. After every edit the
//! whole list is written through a [`RouteStore`]. On startup the stored list
//! is loaded, falling back to the built-in seed routes when nothing usable
//! is stored.

mod book;
mod error;
mod file;
mod memory;

pub use book::RouteBook;
pub use error::{RouteError, StoreError};
pub use file::{DEFAULT_STORE_PATH, JsonFileStore};
pub use memory::MemoryStore;

use tracing::{info, warn};

use crate::domain::Route;

const SEED_ROUTES: &str = include_str!("../../data/seed_routes.json");

/// Loads and saves the full route list.
pub trait RouteStore: Send + Sync {
    /// Read the stored routes. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Route>>, StoreError>;

    /// Replace the stored routes. Failures are not retried.
    fn save(&self, routes: &[Route]) -> Result<(), StoreError>;
}

/// The built-in seed routes.
pub fn seed_routes() -> Result<Vec<Route>, StoreError> {
    let mut routes: Vec<Route> =
        serde_json::from_str(SEED_ROUTES).map_err(|e| StoreError::Json {
            message: format!("seed routes: {}", e),
        })?;
    for route in &mut routes {
        route.normalize_schedule();
    }
    Ok(routes)
}

/// Load routes from `store`, or return `seed` if the store is empty or
/// unreadable.
pub fn load_or_seed(store: &dyn RouteStore, seed: Vec<Route>) -> Vec<Route> {
    match store.load() {
        Ok(Some(mut routes)) => {
            for route in &mut routes {
                route.normalize_schedule();
            }
            info!(routes = routes.len(), "loaded stored routes");
            routes
        }
        Ok(None) => {
            info!(routes = seed.len(), "no stored routes, using seed list");
            seed
        }
        Err(e) => {
            warn!(error = %e, routes = seed.len(), "failed to load routes, using seed list");
            seed
        }
    }
}
