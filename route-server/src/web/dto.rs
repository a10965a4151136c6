//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Route, Stop};
use crate::matching::{MatchMethod, ResolvedMatch};
use crate::planner::SearchMode;

/// Which threshold to resolve stop text with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchContext {
    /// Route search threshold
    #[default]
    Search,
    /// Route authoring threshold
    Destination,
}

/// Request to resolve free text to a stop.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Text to resolve
    pub q: String,

    /// Threshold to use (defaults to search)
    #[serde(default)]
    pub context: MatchContext,
}

/// Request for the stop nearest a position.
#[derive(Debug, Deserialize)]
pub struct NearestRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Request to search routes. Missing fields count as blank.
#[derive(Debug, Default, Deserialize)]
pub struct RouteSearchRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// Body for creating or editing a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub name: String,

    /// Free-text destination; resolved against the catalog to build stops
    pub destination: String,
}

/// Body for adding a timetable entry.
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    /// Departure time, "HH:MM"
    pub time: String,
}

/// The full stop catalog.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<Stop>,
}

/// A stop resolved from free text.
#[derive(Debug, Serialize)]
pub struct ResolvedStop {
    pub stop: Stop,

    /// Edit distance between the query and the stop name
    pub distance: usize,

    /// How the stop was matched
    pub method: MatchMethod,

    /// Human-readable form of `method`
    pub description: &'static str,
}

impl From<ResolvedMatch<'_>> for ResolvedStop {
    fn from(m: ResolvedMatch<'_>) -> Self {
        Self {
            stop: m.stop.clone(),
            distance: m.distance,
            method: m.method,
            description: m.method.description(),
        }
    }
}

/// Result of a route search.
#[derive(Debug, Serialize)]
pub struct RouteSearchResponse {
    pub mode: SearchMode,

    /// Resolved "from" stop, in journey mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<ResolvedStop>,

    /// Resolved "to" stop, in journey mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<ResolvedStop>,

    pub routes: Vec<Route>,
}

/// A list of routes.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<Route>,
}

/// A route with the details of its stops, in travel order.
#[derive(Debug, Serialize)]
pub struct RouteDetailResponse {
    pub route: Route,
    pub stops: Vec<Stop>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
