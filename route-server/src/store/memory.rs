//! In-memory route storage.

use std::sync::Mutex;

use crate::domain::Route;

use super::RouteStore;
use super::error::StoreError;

/// Keeps the last saved route list in memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    routes: Mutex<Option<Vec<Route>>>,
}

impl MemoryStore {
    /// An empty store; `load` returns `None` until the first save.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `routes`.
    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self {
            routes: Mutex::new(Some(routes)),
        }
    }
}

impl RouteStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Route>>, StoreError> {
        let guard = self.routes.lock().map_err(|_| StoreError::Io {
            message: "memory store lock poisoned".to_string(),
        })?;
        Ok(guard.clone())
    }

    fn save(&self, routes: &[Route]) -> Result<(), StoreError> {
        let mut guard = self.routes.lock().map_err(|_| StoreError::Io {
            message: "memory store lock poisoned".to_string(),
        })?;
        *guard = Some(routes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;

    #[test]
    fn empty_until_saved() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        let route = Route::new(RouteId::parse("1").unwrap(), "Linha 1", "Centro", vec![]);
        store.save(std::slice::from_ref(&route)).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![route]));
    }

    #[test]
    fn save_replaces_previous_list() {
        let a = Route::new(RouteId::parse("a").unwrap(), "A", "X", vec![]);
        let b = Route::new(RouteId::parse("b").unwrap(), "B", "Y", vec![]);
        let store = MemoryStore::with_routes(vec![a]);

        store.save(std::slice::from_ref(&b)).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![b]));
    }
}
