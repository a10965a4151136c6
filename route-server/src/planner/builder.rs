//! Stop-sequence synthesis for new and edited routes.
//!
//! Routes are authored with a free-text destination only. To make them
//! navigable, the builder resolves the destination against the catalog and
//! makes up a plausible stop sequence ending there. When the destination
//! does not resolve, the whole sequence is drawn at random.
//!
//! Output is random on every call. Two builds with the same text agree on
//! whether the destination matched and, when it did, on the final stop;
//! the intermediate stops differ.

use rand::Rng;
use rand::seq::index;
use tracing::debug;

use crate::catalog::{CatalogError, StopCatalog};
use crate::domain::{Stop, StopId};

use super::config::{PlannerConfig, StopCount};

/// A synthesized stop sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRoute {
    pub stops: Vec<StopId>,
    /// The caller's destination text if it resolved, otherwise the name of
    /// the last drawn stop (or the configured fallback label).
    pub destination_label: String,
    /// Whether the destination text resolved to a catalog stop.
    pub matched: bool,
}

/// Synthesizes stop sequences from a catalog.
#[derive(Debug, Clone, Copy)]
pub struct RouteBuilder<'a> {
    catalog: &'a StopCatalog,
    config: &'a PlannerConfig,
}

impl<'a> RouteBuilder<'a> {
    pub fn new(catalog: &'a StopCatalog, config: &'a PlannerConfig) -> Self {
        Self { catalog, config }
    }

    /// Build a stop sequence for a route heading to `destination_text`.
    ///
    /// The random source is supplied per call so concurrent builds never
    /// share a generator.
    pub fn build<R: Rng>(&self, destination_text: &str, rng: &mut R) -> BuiltRoute {
        let resolver = self.catalog.resolver(self.config.destination_threshold);
        let destination = match resolver.resolve(destination_text) {
            Ok(found) => found.map(|m| m.stop),
            Err(CatalogError::EmptyCatalog) => None,
            Err(e) => {
                debug!(error = %e, "destination resolution failed");
                None
            }
        };

        let built = match destination {
            Some(dest) => self.ending_at(dest, destination_text, rng),
            None => self.random(rng),
        };

        debug!(
            destination = destination_text,
            matched = built.matched,
            stops = built.stops.len(),
            "built route"
        );
        built
    }

    fn ending_at<R: Rng>(&self, dest: &Stop, label: &str, rng: &mut R) -> BuiltRoute {
        let others: Vec<&Stop> = self.catalog.iter().filter(|s| s.id != dest.id).collect();
        let mut stops = draw(&others, self.config.lead_stops, rng);
        stops.push(dest.id.clone());

        BuiltRoute {
            stops,
            destination_label: label.to_string(),
            matched: true,
        }
    }

    fn random<R: Rng>(&self, rng: &mut R) -> BuiltRoute {
        let all: Vec<&Stop> = self.catalog.iter().collect();
        let stops = draw(&all, self.config.random_stops, rng);

        let destination_label = stops
            .last()
            .and_then(|id| self.catalog.get(id))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| self.config.fallback_label.clone());

        BuiltRoute {
            stops,
            destination_label,
            matched: false,
        }
    }
}

/// Draw a count from `count`, then that many distinct stops from `pool` in
/// random order. Small pools give as many stops as they have.
fn draw<R: Rng>(pool: &[&Stop], count: StopCount, rng: &mut R) -> Vec<StopId> {
    let amount = count.draw(rng).min(pool.len());
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].id.clone())
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::test_support::legacy_catalog;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    proptest! {
        /// Repeated builds agree on `matched` and on the destination stop
        #[test]
        fn builds_agree_on_destination(
            text in "[a-zA-Z ]{0,20}",
            seed_a in any::<u64>(),
            seed_b in any::<u64>(),
        ) {
            let catalog = legacy_catalog();
            let config = PlannerConfig::default();
            let builder = RouteBuilder::new(&catalog, &config);

            let a = builder.build(&text, &mut StdRng::seed_from_u64(seed_a));
            let b = builder.build(&text, &mut StdRng::seed_from_u64(seed_b));

            prop_assert_eq!(a.matched, b.matched);
            if a.matched {
                prop_assert_eq!(a.stops.last(), b.stops.last());
                prop_assert_eq!(&a.destination_label, &text);
            }
        }

        /// Every built route has 3 to 5 distinct catalog stops
        #[test]
        fn structural_invariants(text in "[a-zA-Z ]{0,20}", seed in any::<u64>()) {
            let catalog = legacy_catalog();
            let config = PlannerConfig::default();
            let built = RouteBuilder::new(&catalog, &config)
                .build(&text, &mut StdRng::seed_from_u64(seed));

            prop_assert!((3..=5).contains(&built.stops.len()));
            let mut seen = std::collections::HashSet::new();
            for id in &built.stops {
                prop_assert!(catalog.contains(id));
                prop_assert!(seen.insert(id.clone()));
            }
        }
    }
}
