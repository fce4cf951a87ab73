use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a session. Nothing here reads or changes campus state.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /features
        // Service tiles rendered on the landing page.
        .route("/features", get(handlers::get_features))
        // POST /auth/login
        // Credentials are forwarded to the identity provider.
        .route("/auth/login", post(handlers::login))
        // POST /auth/register
        // Creates the provider account and the mirrored profile row.
        .route("/auth/register", post(handlers::register_user))
}
