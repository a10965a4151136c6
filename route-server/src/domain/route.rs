//! Transit routes and their timetables.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::stop::validate_id;
use super::{DomainError, InvalidId, ScheduleTime, StopId};

/// Opaque identifier of a route.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        validate_id(s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteId {
    type Error = InvalidId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate_id(&s)?;
        Ok(Self(s))
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Departure times per stop.
///
/// Each stop's list is kept sorted by time of day with no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(BTreeMap<StopId, Vec<ScheduleTime>>);

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Departure times at a stop, earliest first.
    pub fn times_at(&self, stop: &StopId) -> &[ScheduleTime] {
        self.0.get(stop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Insert a time, keeping the stop's list sorted.
    ///
    /// Returns `false` if the time was already present.
    pub fn insert(&mut self, stop: StopId, time: ScheduleTime) -> bool {
        let times = self.0.entry(stop).or_default();
        match times.binary_search(&time) {
            Ok(_) => false,
            Err(pos) => {
                times.insert(pos, time);
                true
            }
        }
    }

    /// Remove a time. Drops the stop's entry once its list is empty.
    ///
    /// Returns `false` if the time was not present.
    pub fn remove(&mut self, stop: &StopId, time: ScheduleTime) -> bool {
        let Some(times) = self.0.get_mut(stop) else {
            return false;
        };
        let Ok(pos) = times.binary_search(&time) else {
            return false;
        };
        times.remove(pos);
        if times.is_empty() {
            self.0.remove(stop);
        }
        true
    }

    /// Keep only entries for stops accepted by `keep`.
    pub fn retain_stops(&mut self, mut keep: impl FnMut(&StopId) -> bool) {
        self.0.retain(|stop, _| keep(stop));
    }

    /// Stops that have at least one departure time.
    pub fn stops(&self) -> impl Iterator<Item = &StopId> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Restore the sorted/deduplicated invariant after deserialization.
    fn normalize(&mut self) {
        self.0.retain(|_, times| {
            times.sort();
            times.dedup();
            !times.is_empty()
        });
    }
}

/// A transit route: an ordered walk through catalog stops.
///
/// `stops` order is meaningful: a journey from A to B is possible on this
/// route only if A is visited before B. A stop may appear more than once
/// (circular lines). An empty `stops` list is valid; no journey matches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    /// Free-text destination label; not necessarily a catalog stop name.
    pub destination: String,
    pub stops: Vec<StopId>,
    #[serde(default, skip_serializing_if = "Schedule::is_empty")]
    pub schedule: Schedule,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Route {
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        destination: impl Into<String>,
        stops: Vec<StopId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            destination: destination.into(),
            stops,
            schedule: Schedule::new(),
            is_favorite: false,
        }
    }

    /// Position of the first visit to `stop`.
    pub fn first_index_of(&self, stop: &StopId) -> Option<usize> {
        self.stops.iter().position(|s| s == stop)
    }

    /// Whether the route visits `stop` at all.
    pub fn visits(&self, stop: &StopId) -> bool {
        self.stops.contains(stop)
    }

    /// Whether a passenger can ride from `from` to `to` on this route.
    ///
    /// Both stops are located by first occurrence; `from` must come strictly
    /// before `to`.
    pub fn serves_in_order(&self, from: &StopId, to: &StopId) -> bool {
        match (self.first_index_of(from), self.first_index_of(to)) {
            (Some(f), Some(t)) => f < t,
            _ => false,
        }
    }

    /// Add a departure time at a stop on this route.
    pub fn add_departure(&mut self, stop: StopId, time: ScheduleTime) -> Result<bool, DomainError> {
        if !self.visits(&stop) {
            return Err(DomainError::StopNotOnRoute(stop));
        }
        Ok(self.schedule.insert(stop, time))
    }

    /// Remove a departure time at a stop.
    pub fn remove_departure(&mut self, stop: &StopId, time: ScheduleTime) -> bool {
        self.schedule.remove(stop, time)
    }

    /// Replace the stop sequence, dropping timetable entries for stops that
    /// are no longer visited.
    pub fn replace_stops(&mut self, stops: Vec<StopId>) {
        self.stops = stops;
        let stops = &self.stops;
        self.schedule.retain_stops(|s| stops.contains(s));
    }

    /// Sort and deduplicate timetable entries loaded from outside.
    pub(crate) fn normalize_schedule(&mut self) {
        self.schedule.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn time(s: &str) -> ScheduleTime {
        ScheduleTime::parse(s).unwrap()
    }

    fn route(stops: &[&str]) -> Route {
        Route::new(
            RouteId::parse("r1").unwrap(),
            "Linha 1",
            "Terminal Central",
            stops.iter().map(|s| sid(s)).collect(),
        )
    }

    #[test]
    fn serves_in_order_requires_strict_order() {
        let r = route(&["a", "b", "c"]);
        assert!(r.serves_in_order(&sid("a"), &sid("c")));
        assert!(r.serves_in_order(&sid("a"), &sid("b")));
        assert!(!r.serves_in_order(&sid("b"), &sid("a")));
        assert!(!r.serves_in_order(&sid("a"), &sid("a")));
        assert!(!r.serves_in_order(&sid("a"), &sid("z")));
    }

    #[test]
    fn circular_route_uses_first_occurrence() {
        // Butantã → USP → Butantã
        let r = route(&["but", "usp", "but"]);
        assert_eq!(r.first_index_of(&sid("but")), Some(0));
        assert!(r.serves_in_order(&sid("but"), &sid("usp")));
        assert!(!r.serves_in_order(&sid("usp"), &sid("but")));
    }

    #[test]
    fn empty_route_never_serves() {
        let r = route(&[]);
        assert!(!r.serves_in_order(&sid("a"), &sid("b")));
    }

    #[test]
    fn schedule_insert_keeps_sorted_and_unique() {
        let mut s = Schedule::new();
        assert!(s.insert(sid("a"), time("08:00")));
        assert!(s.insert(sid("a"), time("07:00")));
        assert!(!s.insert(sid("a"), time("08:00")));
        assert_eq!(s.times_at(&sid("a")), &[time("07:00"), time("08:00")]);
        assert!(s.times_at(&sid("b")).is_empty());
    }

    #[test]
    fn schedule_remove_drops_empty_entries() {
        let mut s = Schedule::new();
        s.insert(sid("a"), time("07:00"));
        assert!(!s.remove(&sid("a"), time("09:00")));
        assert!(s.remove(&sid("a"), time("07:00")));
        assert!(s.is_empty());
        assert!(!s.remove(&sid("a"), time("07:00")));
    }

    #[test]
    fn add_departure_rejects_foreign_stop() {
        let mut r = route(&["a", "b"]);
        assert_eq!(r.add_departure(sid("a"), time("06:00")), Ok(true));
        assert_eq!(
            r.add_departure(sid("z"), time("06:00")),
            Err(DomainError::StopNotOnRoute(sid("z")))
        );
    }

    #[test]
    fn replace_stops_drops_stale_schedule_entries() {
        let mut r = route(&["a", "b", "c"]);
        r.add_departure(sid("a"), time("06:00")).unwrap();
        r.add_departure(sid("c"), time("06:30")).unwrap();

        r.replace_stops(vec![sid("x"), sid("c")]);

        assert!(r.schedule.times_at(&sid("a")).is_empty());
        assert_eq!(r.schedule.times_at(&sid("c")), &[time("06:30")]);
    }

    #[test]
    fn deserializes_original_route_json() {
        let json = r#"{
            "id": "123",
            "name": "Linha 123 - Centro via Paulista",
            "destination": "Terminal Central",
            "stops": ["stop2", "stop1"],
            "schedule": { "stop1": ["07:45", "07:15"] }
        }"#;
        let mut r: Route = serde_json::from_str(json).unwrap();
        r.normalize_schedule();
        assert!(!r.is_favorite);
        assert_eq!(r.schedule.times_at(&sid("stop1")), &[time("07:15"), time("07:45")]);
    }

    #[test]
    fn serializes_is_favorite_in_camel_case() {
        let mut r = route(&["a"]);
        r.is_favorite = true;
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["isFavorite"], serde_json::Value::Bool(true));
        assert!(json.get("schedule").is_none());
    }
}
