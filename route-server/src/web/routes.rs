//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::catalog::CatalogError;
use crate::domain::{GeoPoint, Route, RouteId, Stop, StopId};
use crate::planner::{JourneySearch, RouteBuilder};
use crate::store::{RouteBook, RouteError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/api/stops/resolve", get(resolve_stop))
        .route("/api/stops/nearest", get(nearest_stop))
        .route("/api/routes", get(search_routes).post(create_route))
        .route("/api/routes/favorites", get(favorite_routes))
        .route(
            "/api/routes/:id",
            get(route_detail).put(update_route).delete(delete_route),
        )
        .route("/api/routes/:id/favorite", post(toggle_favorite))
        .route("/api/routes/:id/schedule/:stop_id", post(add_schedule_time))
        .route(
            "/api/routes/:id/schedule/:stop_id/:time",
            delete(remove_schedule_time),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The whole stop catalog, in catalog order.
async fn list_stops(State(state): State<AppState>) -> Json<StopsResponse> {
    Json(StopsResponse {
        stops: state.catalog.as_slice().to_vec(),
    })
}

/// Resolve free text to a single stop.
async fn resolve_stop(
    State(state): State<AppState>,
    Query(req): Query<ResolveRequest>,
) -> Result<Json<ResolvedStop>, AppError> {
    let policy = match req.context {
        MatchContext::Search => state.config.search_threshold,
        MatchContext::Destination => state.config.destination_threshold,
    };

    let found = state.catalog.resolver(policy).resolve(&req.q)?;
    found
        .map(|m| Json(ResolvedStop::from(m)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("no stop matches '{}'", req.q.trim()),
        })
}

/// The stop closest to a position.
async fn nearest_stop(
    State(state): State<AppState>,
    Query(req): Query<NearestRequest>,
) -> Result<Json<Stop>, AppError> {
    let stop = state.catalog.nearest(GeoPoint::new(req.lat, req.lng))?;
    Ok(Json(stop.clone()))
}

/// Search routes by journey or keyword.
async fn search_routes(
    State(state): State<AppState>,
    Query(req): Query<RouteSearchRequest>,
) -> Json<RouteSearchResponse> {
    let book = state.book.read().await;
    let result = JourneySearch::new(&state.catalog, state.config.search_threshold).run(
        book.routes(),
        &req.from,
        &req.to,
    );

    Json(RouteSearchResponse {
        mode: result.mode,
        from: result.from.map(ResolvedStop::from),
        to: result.to.map(ResolvedStop::from),
        routes: result.routes.into_iter().cloned().collect(),
    })
}

/// Favorite routes.
async fn favorite_routes(State(state): State<AppState>) -> Json<RoutesResponse> {
    let book = state.book.read().await;
    Json(RoutesResponse {
        routes: book.favorites().into_iter().cloned().collect(),
    })
}

/// One route with its stops spelled out.
async fn route_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let id = parse_route_id(&id)?;
    let book = state.book.read().await;
    let route = book.get(&id).ok_or(RouteError::NotFound(id))?;

    Ok(Json(RouteDetailResponse {
        stops: state.catalog.stops_for(route).into_iter().cloned().collect(),
        route: route.clone(),
    }))
}

/// Create a route from a name and a free-text destination.
async fn create_route(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut book = state.book.write().await;
    let builder = RouteBuilder::new(&state.catalog, &state.config);
    let route = book
        .add(&req.name, &req.destination, &builder, &mut rand::rng())?
        .clone();

    info!(route = %route.id, stops = route.stops.len(), "created route");
    persist(&state, &book)?;
    Ok((StatusCode::CREATED, Json(route)))
}

/// Rename a route and rebuild its stops.
async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<Route>, AppError> {
    let id = parse_route_id(&id)?;
    let mut book = state.book.write().await;
    let builder = RouteBuilder::new(&state.catalog, &state.config);
    let route = book
        .update(&id, &req.name, &req.destination, &builder, &mut rand::rng())?
        .clone();

    info!(route = %route.id, "updated route");
    persist(&state, &book)?;
    Ok(Json(route))
}

/// Delete a route.
async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_route_id(&id)?;
    let mut book = state.book.write().await;
    book.delete(&id)?;

    info!(route = %id, "deleted route");
    persist(&state, &book)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Flip a route's favorite flag.
async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Route>, AppError> {
    let id = parse_route_id(&id)?;
    let mut book = state.book.write().await;
    let route = book.toggle_favorite(&id)?.clone();

    persist(&state, &book)?;
    Ok(Json(route))
}

/// Add a departure time at one of a route's stops.
async fn add_schedule_time(
    State(state): State<AppState>,
    Path((id, stop_id)): Path<(String, String)>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<Route>, AppError> {
    let id = parse_route_id(&id)?;
    let stop_id = parse_stop_id(&stop_id)?;
    let mut book = state.book.write().await;
    let route = book.add_schedule_time(&id, stop_id, &req.time)?.clone();

    persist(&state, &book)?;
    Ok(Json(route))
}

/// Remove a departure time.
async fn remove_schedule_time(
    State(state): State<AppState>,
    Path((id, stop_id, time)): Path<(String, String, String)>,
) -> Result<Json<Route>, AppError> {
    let id = parse_route_id(&id)?;
    let stop_id = parse_stop_id(&stop_id)?;
    let mut book = state.book.write().await;
    let route = book.remove_schedule_time(&id, &stop_id, &time)?.clone();

    persist(&state, &book)?;
    Ok(Json(route))
}

fn parse_route_id(s: &str) -> Result<RouteId, AppError> {
    RouteId::parse(s).map_err(|e| AppError::BadRequest {
        message: format!("Invalid route id '{}': {}", s, e),
    })
}

fn parse_stop_id(s: &str) -> Result<StopId, AppError> {
    StopId::parse(s).map_err(|e| AppError::BadRequest {
        message: format!("Invalid stop id '{}': {}", s, e),
    })
}

/// Write the whole route list through the store.
///
/// The in-memory edit is kept even if this fails; the next successful save
/// writes it out.
fn persist(state: &AppState, book: &RouteBook) -> Result<(), AppError> {
    state.store.save(book.routes()).map_err(|e| {
        warn!(error = %e, routes = book.len(), "failed to save routes");
        AppError::Internal {
            message: format!("Change applied but not saved: {}", e),
        }
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            RouteError::Domain(_) => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::EmptyCatalog => AppError::Unavailable {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, error = %message, "request failed");
        } else {
            debug!(%status, error = %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
