//! The in-memory stop catalog.

use std::collections::HashMap;
use std::slice;

use crate::domain::{GeoPoint, Route, Stop, StopId};
use crate::matching::{StopResolver, ThresholdPolicy, fold};

use super::error::CatalogError;

/// The fixed, ordered set of known stops.
///
/// Iteration order is the order the stops were supplied in. Resolution and
/// nearest-stop lookups break ties by this order, so it is part of the
/// catalog's contract. The catalog is immutable once built and can be shared
/// freely between concurrent searches.
#[derive(Debug, Clone, Default)]
pub struct StopCatalog {
    stops: Vec<Stop>,
    /// Case-folded names, parallel to `stops`.
    folded_names: Vec<String>,
    index: HashMap<StopId, usize>,
}

impl StopCatalog {
    /// Build a catalog, rejecting duplicate stop ids.
    pub fn new(stops: Vec<Stop>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(stops.len());
        for (i, stop) in stops.iter().enumerate() {
            if index.insert(stop.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateStop(stop.id.clone()));
            }
        }
        let folded_names = stops.iter().map(|s| fold(&s.name)).collect();

        Ok(Self {
            stops,
            folded_names,
            index,
        })
    }

    /// A catalog with no stops.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a stop by id.
    pub fn get(&self, id: &StopId) -> Option<&Stop> {
        self.index.get(id).map(|&i| &self.stops[i])
    }

    pub fn contains(&self, id: &StopId) -> bool {
        self.index.contains_key(id)
    }

    /// Stops in catalog order.
    pub fn iter(&self) -> slice::Iter<'_, Stop> {
        self.stops.iter()
    }

    pub fn as_slice(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stops paired with their case-folded names, in catalog order.
    pub(crate) fn folded_entries(&self) -> impl Iterator<Item = (&Stop, &str)> {
        self.stops
            .iter()
            .zip(self.folded_names.iter().map(String::as_str))
    }

    /// Case-folded name of a stop, if it is in the catalog.
    pub(crate) fn folded_name(&self, id: &StopId) -> Option<&str> {
        self.index.get(id).map(|&i| self.folded_names[i].as_str())
    }

    /// The route's stops in travel order.
    ///
    /// Ids that are not in the catalog are skipped; repeated visits are kept.
    pub fn stops_for(&self, route: &Route) -> Vec<&Stop> {
        route.stops.iter().filter_map(|id| self.get(id)).collect()
    }

    /// A resolver over this catalog.
    pub fn resolver(&self, policy: ThresholdPolicy) -> StopResolver<'_> {
        StopResolver::new(self, policy)
    }

    /// The stop closest to `point` by straight-line lat/lng distance.
    ///
    /// Ties go to the stop that comes first in the catalog.
    pub fn nearest(&self, point: GeoPoint) -> Result<&Stop, CatalogError> {
        let mut best: Option<(&Stop, f64)> = None;
        for stop in &self.stops {
            let d = point.euclidean_distance(&stop.point());
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((stop, d));
            }
        }
        best.map(|(stop, _)| stop).ok_or(CatalogError::EmptyCatalog)
    }
}

impl<'a> IntoIterator for &'a StopCatalog {
    type Item = &'a Stop;
    type IntoIter = slice::Iter<'a, Stop>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{legacy_catalog, sid, stop};
    use crate::domain::RouteId;

    #[test]
    fn rejects_duplicate_ids() {
        let result = StopCatalog::new(vec![
            stop("a", "One", 0.0, 0.0),
            stop("a", "Two", 1.0, 1.0),
        ]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateStop(sid("a")));
    }

    #[test]
    fn lookup_by_id() {
        let catalog = legacy_catalog();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get(&sid("stop6")).unwrap().name, "Shopping Principal");
        assert!(catalog.get(&sid("nope")).is_none());
        assert!(catalog.contains(&sid("stop1")));
        assert_eq!(catalog.folded_name(&sid("stop1")), Some("terminal central"));
    }

    #[test]
    fn iteration_preserves_order() {
        let catalog = legacy_catalog();
        let ids: Vec<_> = catalog.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            ["stop1", "stop2", "stop3", "stop4", "stop5", "stop6", "stop7", "stop8"]
        );
    }

    #[test]
    fn stops_for_keeps_route_order_and_skips_unknown() {
        let catalog = legacy_catalog();
        let route = Route::new(
            RouteId::parse("r").unwrap(),
            "Circular",
            "Terminal Central",
            vec![sid("stop4"), sid("ghost"), sid("stop1"), sid("stop4")],
        );
        let stops = catalog.stops_for(&route);
        let names: Vec<_> = stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            ["Praça da República", "Terminal Central", "Praça da República"]
        );
    }

    #[test]
    fn nearest_stop() {
        let catalog = legacy_catalog();
        // Right next to Parque Ibirapuera
        let nearest = catalog.nearest(GeoPoint::new(-23.587, -46.659)).unwrap();
        assert_eq!(nearest.id.as_str(), "stop7");
        // Exactly on Terminal Central
        let nearest = catalog.nearest(GeoPoint::new(-23.5505, -46.6333)).unwrap();
        assert_eq!(nearest.id.as_str(), "stop1");
    }

    #[test]
    fn nearest_tie_goes_to_first() {
        let catalog = StopCatalog::new(vec![
            stop("west", "West", 0.0, -1.0),
            stop("east", "East", 0.0, 1.0),
        ])
        .unwrap();
        let nearest = catalog.nearest(GeoPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(nearest.id.as_str(), "west");
    }

    #[test]
    fn nearest_on_empty_catalog() {
        let catalog = StopCatalog::empty();
        assert_eq!(
            catalog.nearest(GeoPoint::new(0.0, 0.0)).unwrap_err(),
            CatalogError::EmptyCatalog
        );
    }
}
