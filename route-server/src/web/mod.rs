//! Web layer for the route server.
//!
//! A JSON API over the stop catalog and the route book: stop lookup, route
//! search, and route editing.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
