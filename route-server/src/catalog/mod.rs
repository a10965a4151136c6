//! The stop catalog.
//!
//! The catalog is the source of truth for which stops exist. It is supplied
//! once at startup, either from a JSON file or from the built-in sample of
//! São Paulo and Taboão da Serra stops, and never changes afterwards.

mod error;
mod file;
mod stops;

pub use error::CatalogError;
pub use stops::StopCatalog;

const SAMPLE_STOPS: &str = include_str!("../../data/sample_stops.json");

impl StopCatalog {
    /// The built-in sample catalog.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE_STOPS)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Fixtures shared by tests across the crate.

    use super::StopCatalog;
    use crate::domain::{Stop, StopId};

    pub fn sid(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    pub fn stop(id: &str, name: &str, lat: f64, lng: f64) -> Stop {
        Stop::new(sid(id), name, lat, lng)
    }

    /// A small eight-stop catalog with well-known names.
    pub fn legacy_catalog() -> StopCatalog {
        StopCatalog::new(vec![
            stop("stop1", "Terminal Central", -23.5505, -46.6333),
            stop("stop2", "Av. Paulista, 1578", -23.5614, -46.6564),
            stop("stop3", "R. da Consolação, 2200", -23.5562, -46.6608),
            stop("stop4", "Praça da República", -23.5433, -46.6416),
            stop("stop5", "Bairro X - Ponto Final", -23.5300, -46.6200),
            stop("stop6", "Shopping Principal", -23.5700, -46.6700),
            stop("stop7", "Parque Ibirapuera", -23.588, -46.6588),
            stop("stop8", "Estação de Metrô", -23.552, -46.645),
        ])
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;

    #[test]
    fn sample_catalog_loads() {
        let catalog = StopCatalog::sample().unwrap();
        assert_eq!(catalog.len(), 21);
        let butanta = catalog.get(&StopId::parse("spzw_butanta").unwrap()).unwrap();
        assert_eq!(butanta.name, "Metrô Butantã");
    }

    #[test]
    fn sample_catalog_resolution() {
        use crate::matching::{MatchMethod, ThresholdPolicy};

        let catalog = StopCatalog::sample().unwrap();
        let resolver = catalog.resolver(ThresholdPolicy::SEARCH);

        let m = resolver.resolve("terminl centrl").unwrap().unwrap();
        assert_eq!(m.stop.id.as_str(), "stop1");
        assert_eq!(m.method, MatchMethod::Fuzzy);

        assert!(resolver.resolve("xyzxyzxyz").unwrap().is_none());
    }
}
