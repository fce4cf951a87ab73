use crate::{
    AppState,
    access::{ADMIN_ONLY, RoleGate, role_gate},
    handlers,
};
use axum::{Router, middleware, routing::put};

/// Admin Router Module
///
/// Nested under `/admin`. Gated to `ADMIN_ONLY`; authentication is layered on top in
/// `create_router`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // PUT /admin/classrooms/{id}/status
        // Direct status override, e.g. taking a room into maintenance.
        .route(
            "/classrooms/{id}/status",
            put(handlers::update_classroom_status),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGate::new(ADMIN_ONLY),
            role_gate,
        ))
}
