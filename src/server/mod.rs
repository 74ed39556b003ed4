//! Web surface: one page with a discover form and a PDF upload form.

mod handlers;

use crate::adapters::{AgentEnricher, SerperClient, SqliteStore};
use crate::core::discover::DiscoverService;
use crate::utils::error::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// The concrete orchestrator wiring used by the server.
pub type Compass = DiscoverService<AgentEnricher, SerperClient, SqliteStore>;

#[derive(Clone)]
pub struct AppState {
    pub compass: Arc<Compass>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::index))
        .route("/discover", post(handlers::discover))
        .route("/extract", post(handlers::extract))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: AppState, bind: &str) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "serving Course Compass");
    axum::serve(listener, app).await?;
    Ok(())
}
