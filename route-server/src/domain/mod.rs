//! Domain types for the route search engine.
//!
//! This module contains the core domain model types: catalog stops,
//! routes and their timetables. Identifier and time types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod error;
mod route;
mod stop;
mod time;

pub use error::DomainError;
pub use route::{Route, RouteId, Schedule};
pub use stop::{GeoPoint, InvalidId, Stop, StopId};
pub use time::{ScheduleTime, TimeError};
