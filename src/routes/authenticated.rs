use crate::{
    AppState,
    access::{EVERYONE, RoleGate, STAFF, role_gate},
    handlers,
};
use axum::{
    Router,
    middleware,
    routing::{get, post},
};

/// Authenticated Router Module
///
/// Every route here sits behind `auth_middleware` (applied in `create_router`), so the
/// resolved `AuthUser` is in the request extensions before any gate or handler runs.
/// The whole module is gated to `EVERYONE`; room release is narrowed to `STAFF`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // --- Session ---
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/session", get(handlers::get_session))
        .route("/me", get(handlers::get_me))
        .route("/me/meetings", get(handlers::get_my_meetings))
        // --- Classrooms ---
        // GET /classrooms?search=...&status=...&min_capacity=...
        .route("/classrooms", get(handlers::get_classrooms))
        // POST /classrooms/{id}/reserve
        // available -> occupied; any signed-in role.
        .route("/classrooms/{id}/reserve", post(handlers::reserve_classroom))
        // POST /classrooms/{id}/release
        // occupied -> available; faculty and admins only.
        .route(
            "/classrooms/{id}/release",
            post(handlers::release_classroom).route_layer(middleware::from_fn_with_state(
                RoleGate::new(STAFF),
                role_gate,
            )),
        )
        // --- Faculty ---
        // GET /faculty?search=...&department=...&status=...
        .route("/faculty", get(handlers::get_faculty))
        .route("/faculty/departments", get(handlers::get_departments))
        // POST /faculty/{id}/meetings
        // Only available faculty accept requests.
        .route("/faculty/{id}/meetings", post(handlers::request_meeting))
        // --- Canteens ---
        // GET /canteens?search=...&category=...
        .route("/canteens", get(handlers::get_canteens))
        .route_layer(middleware::from_fn_with_state(
            RoleGate::new(EVERYONE),
            role_gate,
        ))
}
