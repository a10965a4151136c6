//! Free text → catalog stop resolution.
//!
//! Resolution tries, in strict priority order:
//!
//! 1. an exact (case-insensitive) name match,
//! 2. the first stop, in catalog order, whose name contains the query,
//! 3. the stop with the smallest edit distance (first minimum in catalog
//!    order), accepted only if the threshold policy allows that distance.
//!
//! Ties go to the stop that comes first in catalog order.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{CatalogError, StopCatalog};
use crate::domain::Stop;

use super::distance::{fold, folded_distance};
use super::threshold::ThresholdPolicy;

/// How a query was matched to a stop.
///
/// Variants are ordered best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    /// The name equals the query, ignoring case.
    Exact,
    /// The name contains the query, ignoring case.
    Substring,
    /// The name is within the threshold's edit distance of the query.
    Fuzzy,
}

impl MatchMethod {
    /// Human-readable description of the match method.
    pub fn description(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "Exact name match",
            MatchMethod::Substring => "Name contains the search text",
            MatchMethod::Fuzzy => "Closest name within typo tolerance",
        }
    }
}

/// A stop that a query resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMatch<'a> {
    pub stop: &'a Stop,
    /// Edit distance between the query and the stop name.
    pub distance: usize,
    pub method: MatchMethod,
}

/// A trimmed, case-folded query with its length in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Query {
    folded: String,
    len: usize,
}

impl Query {
    /// Returns `None` for blank input, which never matches anything.
    pub(crate) fn new(text: &str) -> Option<Self> {
        let folded = fold(text.trim());
        if folded.is_empty() {
            return None;
        }
        let len = folded.chars().count();
        Some(Self { folded, len })
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.folded
    }

    /// Whether `text` contains the query or is within the policy's distance.
    pub(crate) fn matches_text(&self, text: &str, policy: ThresholdPolicy) -> bool {
        let folded = fold(text);
        self.matches_folded(&folded, policy)
    }

    pub(crate) fn matches_folded(&self, folded: &str, policy: ThresholdPolicy) -> bool {
        folded.contains(&self.folded)
            || policy.accepts(folded_distance(&self.folded, folded), self.len)
    }
}

/// Resolves free text against one catalog with one threshold policy.
#[derive(Debug, Clone, Copy)]
pub struct StopResolver<'a> {
    catalog: &'a StopCatalog,
    policy: ThresholdPolicy,
}

impl<'a> StopResolver<'a> {
    pub fn new(catalog: &'a StopCatalog, policy: ThresholdPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Resolve `text` to at most one stop.
    ///
    /// Blank text resolves to `Ok(None)`. An empty catalog is reported as
    /// [`CatalogError::EmptyCatalog`]; a catalog with no close enough name
    /// gives `Ok(None)`.
    pub fn resolve(&self, text: &str) -> Result<Option<ResolvedMatch<'a>>, CatalogError> {
        let Some(query) = Query::new(text) else {
            return Ok(None);
        };
        if self.catalog.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let found = self.resolve_query(&query);
        match &found {
            Some(m) => debug!(
                query = query.as_str(),
                stop = %m.stop.id,
                distance = m.distance,
                method = ?m.method,
                "resolved stop"
            ),
            None => debug!(
                query = query.as_str(),
                threshold = self.policy.threshold(query.len),
                "no stop within threshold"
            ),
        }
        Ok(found)
    }

    fn resolve_query(&self, query: &Query) -> Option<ResolvedMatch<'a>> {
        let q = query.as_str();

        if let Some((stop, _)) = self.catalog.folded_entries().find(|(_, name)| *name == q) {
            return Some(ResolvedMatch {
                stop,
                distance: 0,
                method: MatchMethod::Exact,
            });
        }

        if let Some((stop, name)) = self.catalog.folded_entries().find(|(_, name)| name.contains(q))
        {
            return Some(ResolvedMatch {
                stop,
                distance: folded_distance(q, name),
                method: MatchMethod::Substring,
            });
        }

        // Strict `<` keeps the first minimum in catalog order.
        let mut best: Option<(&'a Stop, usize)> = None;
        for (stop, name) in self.catalog.folded_entries() {
            let d = folded_distance(q, name);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((stop, d));
            }
        }

        best.filter(|&(_, d)| self.policy.accepts(d, query.len))
            .map(|(stop, distance)| ResolvedMatch {
                stop,
                distance,
                method: MatchMethod::Fuzzy,
            })
    }
}

/// Resolve `text` against `catalog` with the given policy.
pub fn resolve<'a>(
    text: &str,
    catalog: &'a StopCatalog,
    policy: ThresholdPolicy,
) -> Result<Option<ResolvedMatch<'a>>, CatalogError> {
    StopResolver::new(catalog, policy).resolve(text)
}
