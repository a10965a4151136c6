//! Stop identifiers, catalog stops and coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop or route identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {reason}")]
pub struct InvalidId {
    reason: &'static str,
}

impl InvalidId {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Validate an opaque identifier: non-empty, no surrounding whitespace,
/// no path separators (ids appear in URLs).
pub(crate) fn validate_id(s: &str) -> Result<(), InvalidId> {
    if s.is_empty() {
        return Err(InvalidId::new("must not be empty"));
    }
    if s.trim() != s {
        return Err(InvalidId::new("must not have surrounding whitespace"));
    }
    if s.contains('/') {
        return Err(InvalidId::new("must not contain '/'"));
    }
    Ok(())
}

/// Opaque identifier of a catalog stop.
///
/// # Examples
///
/// ```
/// use route_server::domain::StopId;
///
/// let id = StopId::parse("stop1").unwrap();
/// assert_eq!(id.as_str(), "stop1");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse(" stop1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        validate_id(s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate_id(&s)?;
        Ok(Self(s))
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Straight-line distance on raw lat/lng values.
    ///
    /// This is not a geodesic distance; stops in one catalog are close
    /// enough together that the distortion does not change which is nearest.
    pub fn euclidean_distance(&self, other: &GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

/// A named stop in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Stop {
    pub fn new(id: StopId, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lng,
        }
    }

    /// The stop's coordinates.
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}
