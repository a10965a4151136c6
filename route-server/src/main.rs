use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use route_server::catalog::StopCatalog;
use route_server::config::ServerConfig;
use route_server::planner::PlannerConfig;
use route_server::store::{JsonFileStore, load_or_seed, seed_routes};
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_server=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Load the stop catalog (fail fast if the configured file is unusable)
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "loading stop catalog");
            StopCatalog::load(path)?
        }
        None => StopCatalog::sample()?,
    };
    info!(stops = catalog.len(), "stop catalog ready");

    // Load stored routes, falling back to the seed list
    let store = JsonFileStore::new(&config.store_path);
    let routes = load_or_seed(&store, seed_routes()?);
    info!(
        routes = routes.len(),
        path = %store.path().display(),
        "route book ready"
    );

    let state = AppState::new(catalog, routes, store, PlannerConfig::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Route server listening on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Route server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
