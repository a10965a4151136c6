//! Route planning: searching existing routes and synthesizing new ones.
//!
//! Search filters a route list by free text, either as a journey between two
//! stops or as a keyword. The builder turns a free-text destination into a
//! stop sequence for a newly authored route.

mod builder;
mod config;
mod search;

pub use builder::{BuiltRoute, RouteBuilder};
pub use config::{DEFAULT_FALLBACK_LABEL, PlannerConfig, StopCount};
pub use search::{JourneySearch, SearchMode, SearchResult, search};
