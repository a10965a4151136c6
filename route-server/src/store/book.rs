//! The editable route list.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use tracing::debug;

use crate::domain::{DomainError, Route, RouteId, ScheduleTime, StopId};
use crate::planner::RouteBuilder;

use super::error::RouteError;

/// All known routes, in the order they were added.
///
/// Edits that need new stop sequences take a [`RouteBuilder`] and a random
/// source from the caller. The book itself never touches storage.
#[derive(Debug, Clone, Default)]
pub struct RouteBook {
    routes: Vec<Route>,
}

impl RouteBook {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, id: &RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| &r.id == id)
    }

    /// Favorite routes, in list order.
    pub fn favorites(&self) -> Vec<&Route> {
        self.routes.iter().filter(|r| r.is_favorite).collect()
    }

    /// Create a route heading to `destination` and append it.
    ///
    /// The stop sequence comes from `builder`. The stored destination is the
    /// caller's text if it resolved to a stop, otherwise the builder's label.
    pub fn add<R: Rng>(
        &mut self,
        name: &str,
        destination: &str,
        builder: &RouteBuilder<'_>,
        rng: &mut R,
    ) -> Result<&Route, RouteError> {
        self.add_at(Utc::now(), name, destination, builder, rng)
    }

    fn add_at<R: Rng>(
        &mut self,
        now: DateTime<Utc>,
        name: &str,
        destination: &str,
        builder: &RouteBuilder<'_>,
        rng: &mut R,
    ) -> Result<&Route, RouteError> {
        let id = self.fresh_id(now)?;
        let built = builder.build(destination, rng);
        let route = Route::new(id, name.trim(), built.destination_label, built.stops);

        debug!(route = %route.id, matched = built.matched, "added route");
        let index = self.routes.len();
        self.routes.push(route);
        Ok(&self.routes[index])
    }

    /// Rename a route and rebuild its stops for a new destination.
    ///
    /// The id and favorite flag are kept, as are timetable entries for stops
    /// still on the route.
    pub fn update<R: Rng>(
        &mut self,
        id: &RouteId,
        name: &str,
        destination: &str,
        builder: &RouteBuilder<'_>,
        rng: &mut R,
    ) -> Result<&Route, RouteError> {
        let route = self.find_mut(id)?;
        let built = builder.build(destination, rng);

        route.name = name.trim().to_string();
        route.destination = built.destination_label;
        route.replace_stops(built.stops);

        debug!(route = %route.id, matched = built.matched, "updated route");
        Ok(route)
    }

    /// Remove a route, returning it.
    pub fn delete(&mut self, id: &RouteId) -> Result<Route, RouteError> {
        let index = self
            .routes
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| RouteError::NotFound(id.clone()))?;
        Ok(self.routes.remove(index))
    }

    /// Flip a route's favorite flag.
    pub fn toggle_favorite(&mut self, id: &RouteId) -> Result<&Route, RouteError> {
        let route = self.find_mut(id)?;
        route.is_favorite = !route.is_favorite;
        Ok(route)
    }

    /// Add an "HH:MM" departure at a stop on the route. Adding a time that is
    /// already listed changes nothing.
    pub fn add_schedule_time(
        &mut self,
        id: &RouteId,
        stop: StopId,
        time: &str,
    ) -> Result<&Route, RouteError> {
        let time = ScheduleTime::parse(time.trim()).map_err(DomainError::from)?;
        let route = self.find_mut(id)?;
        route.add_departure(stop, time)?;
        Ok(route)
    }

    /// Remove an "HH:MM" departure. Removing a time that is not listed
    /// changes nothing.
    pub fn remove_schedule_time(
        &mut self,
        id: &RouteId,
        stop: &StopId,
        time: &str,
    ) -> Result<&Route, RouteError> {
        let time = ScheduleTime::parse(time.trim()).map_err(DomainError::from)?;
        let route = self.find_mut(id)?;
        route.remove_departure(stop, time);
        Ok(route)
    }

    fn find_mut(&mut self, id: &RouteId) -> Result<&mut Route, RouteError> {
        self.routes
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| RouteError::NotFound(id.clone()))
    }

    /// A timestamp id not used by any route in the book.
    fn fresh_id(&self, now: DateTime<Utc>) -> Result<RouteId, RouteError> {
        let base = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut candidate = base.clone();
        let mut n = 1;
        while self.routes.iter().any(|r| r.id.as_str() == candidate) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        RouteId::parse(&candidate).map_err(|e| RouteError::Domain(e.into()))
    }
}
