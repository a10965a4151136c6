//! Route search.
//!
//! A search takes two free-text fields, "from" and "to", and filters a route
//! list. Which fields are filled in picks the mode:
//!
//! - neither: every route
//! - both: journey mode, routes that visit the "from" stop before the "to" stop
//! - one: keyword mode, routes whose name, destination, or stops match the text

use serde::Serialize;
use tracing::debug;

use crate::catalog::{CatalogError, StopCatalog};
use crate::domain::Route;
use crate::matching::{Query, ResolvedMatch, ThresholdPolicy};

/// How a search interpreted its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// No filter: both fields were blank.
    All,
    /// Both fields were given.
    Journey,
    /// Exactly one field was given.
    Keyword,
}

/// Result of a route search.
#[derive(Debug, Clone)]
pub struct SearchResult<'c, 'r> {
    pub mode: SearchMode,
    /// The stop "from" resolved to, in journey mode.
    pub from: Option<ResolvedMatch<'c>>,
    /// The stop "to" resolved to, in journey mode.
    pub to: Option<ResolvedMatch<'c>>,
    /// Matching routes, in their original order.
    pub routes: Vec<&'r Route>,
}

/// Filters routes against free-text input.
#[derive(Debug, Clone, Copy)]
pub struct JourneySearch<'c> {
    catalog: &'c StopCatalog,
    policy: ThresholdPolicy,
}

impl<'c> JourneySearch<'c> {
    pub fn new(catalog: &'c StopCatalog, policy: ThresholdPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Run a search. The route list is only read; matches keep their order.
    pub fn run<'r>(&self, routes: &'r [Route], from: &str, to: &str) -> SearchResult<'c, 'r> {
        match (Query::new(from), Query::new(to)) {
            (None, None) => SearchResult {
                mode: SearchMode::All,
                from: None,
                to: None,
                routes: routes.iter().collect(),
            },
            (Some(_), Some(_)) => self.journey(routes, from, to),
            (Some(query), None) | (None, Some(query)) => SearchResult {
                mode: SearchMode::Keyword,
                from: None,
                to: None,
                routes: self.keyword(routes, &query),
            },
        }
    }

    /// The matching routes only.
    pub fn search<'r>(&self, routes: &'r [Route], from: &str, to: &str) -> Vec<&'r Route> {
        self.run(routes, from, to).routes
    }

    fn journey<'r>(&self, routes: &'r [Route], from: &str, to: &str) -> SearchResult<'c, 'r> {
        let resolver = self.catalog.resolver(self.policy);
        let from_stop = self.resolve_endpoint(resolver.resolve(from), "from");
        let to_stop = self.resolve_endpoint(resolver.resolve(to), "to");

        let matches = match (&from_stop, &to_stop) {
            (Some(a), Some(b)) => routes
                .iter()
                .filter(|route| {
                    if route.stops.is_empty() {
                        debug!(route = %route.id, "skipping route with no stops");
                        return false;
                    }
                    route.serves_in_order(&a.stop.id, &b.stop.id)
                })
                .collect(),
            _ => Vec::new(),
        };

        debug!(
            from = from_stop.as_ref().map(|m| m.stop.id.as_str()),
            to = to_stop.as_ref().map(|m| m.stop.id.as_str()),
            matches = matches.len(),
            "journey search"
        );

        SearchResult {
            mode: SearchMode::Journey,
            from: from_stop,
            to: to_stop,
            routes: matches,
        }
    }

    fn resolve_endpoint(
        &self,
        result: Result<Option<ResolvedMatch<'c>>, CatalogError>,
        field: &str,
    ) -> Option<ResolvedMatch<'c>> {
        match result {
            Ok(found) => found,
            Err(e) => {
                debug!(field, error = %e, "endpoint did not resolve");
                None
            }
        }
    }

    fn keyword<'r>(&self, routes: &'r [Route], query: &Query) -> Vec<&'r Route> {
        let matches: Vec<&Route> = routes
            .iter()
            .filter(|route| self.keyword_matches(route, query))
            .collect();

        debug!(
            query = query.as_str(),
            matches = matches.len(),
            "keyword search"
        );
        matches
    }

    fn keyword_matches(&self, route: &Route, query: &Query) -> bool {
        query.matches_text(&route.name, self.policy)
            || query.matches_text(&route.destination, self.policy)
            || route.stops.iter().any(|id| {
                self.catalog
                    .folded_name(id)
                    .is_some_and(|name| query.matches_folded(name, self.policy))
            })
    }
}

/// Search `routes` with the given catalog and threshold.
pub fn search<'r>(
    routes: &'r [Route],
    catalog: &StopCatalog,
    from: &str,
    to: &str,
    policy: ThresholdPolicy,
) -> Vec<&'r Route> {
    JourneySearch::new(catalog, policy).search(routes, from, to)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
