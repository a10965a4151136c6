//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::StopCatalog;
use crate::domain::Route;
use crate::planner::PlannerConfig;
use crate::store::{RouteBook, RouteStore};

/// Shared application state.
///
/// The catalog and config never change after startup. The route book is
/// behind a lock; searches take a read lock, edits a write lock.
#[derive(Clone)]
pub struct AppState {
    /// Stop catalog
    pub catalog: Arc<StopCatalog>,

    /// Current routes
    pub book: Arc<RwLock<RouteBook>>,

    /// Where the route list is saved after each edit
    pub store: Arc<dyn RouteStore>,

    /// Planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: StopCatalog,
        routes: Vec<Route>,
        store: impl RouteStore + 'static,
        config: PlannerConfig,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            book: Arc::new(RwLock::new(RouteBook::new(routes))),
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
