//! REST API over the electrical calculators.
//!
//! Calculator routes are mounted under `server.base_path`
//! (default `/api/electrical`):
//! - `POST /voltage-drop`, `/cable-sizing`, `/transformer-sizing`,
//!   `/check-compliance`, `/power-quality`, `/cable-derating`,
//!   `/electrical-load`
//! - `GET /standards`, `/standards/{standard_code}`
//!
//! `GET /health` is served at the root.

mod handlers;
mod types;

pub use types::{ApiError, ApiResponse};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;

/// Immutable application state shared across all request handlers.
///
/// The calculators themselves are stateless; only configuration is
/// shared, read-only, so no locks are needed.
pub struct AppState {
    pub config: ServiceConfig,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    let calculators = Router::new()
        .route("/voltage-drop", post(handlers::voltage_drop))
        .route("/cable-sizing", post(handlers::cable_sizing))
        .route("/transformer-sizing", post(handlers::transformer_sizing))
        .route("/check-compliance", post(handlers::check_compliance))
        .route("/power-quality", post(handlers::power_quality))
        .route("/cable-derating", post(handlers::cable_derating))
        .route("/electrical-load", post(handlers::electrical_load))
        .route("/standards", get(handlers::get_standards))
        .route("/standards/", get(handlers::standard_code_missing))
        .route("/standards/{standard_code}", get(handlers::get_standard));

    let base_path = state.config.server.base_path.trim_end_matches('/');
    let app = if base_path.is_empty() {
        calculators
    } else {
        Router::new().nest(base_path, calculators)
    };

    app.route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
