use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod access;
pub mod auth;
pub mod campus;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod repository;
pub mod search;
pub mod seed;

// Routing split by audience (Public, Authenticated, Admin).
pub mod routes;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use campus::{CampusState, InMemoryCampus};
pub use config::AppConfig;
pub use errors::ApiError;
pub use identity::{IdentityState, MockIdentityProvider, SupabaseIdentityClient};
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login, handlers::register_user, handlers::logout, handlers::get_session,
        handlers::get_me, handlers::get_features, handlers::get_classrooms,
        handlers::reserve_classroom, handlers::release_classroom,
        handlers::update_classroom_status, handlers::get_faculty, handlers::get_departments,
        handlers::request_meeting, handlers::get_my_meetings, handlers::get_canteens
    ),
    components(
        schemas(
            models::Role, models::User, models::LoginRequest, models::RegisterUserRequest,
            models::SessionResponse, models::Classroom, models::ClassroomStatus,
            models::UpdateClassroomStatusRequest, models::Faculty, models::FacultyStatus,
            models::MeetingRequest, models::MeetingStatus, models::Canteen, models::MenuItem,
            models::MealCategory, models::Feature, models::ErrorBody,
        )
    ),
    tags(
        (name = "campus-radar", description = "Campus services API: classrooms, canteens, faculty")
    )
)]
struct ApiDoc;

/// AppState
///
/// Single shared container of every service a request may need. Cloning is cheap: each
/// service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Profiles (Postgres in production).
    pub repo: RepositoryState,
    /// Classrooms, faculty, canteens and meeting requests.
    pub campus: CampusState,
    /// External identity provider.
    pub identity: IdentityState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for CampusState {
    fn from_ref(app_state: &AppState) -> CampusState {
        app_state.campus.clone()
    }
}

impl FromRef<AppState> for IdentityState {
    fn from_ref(app_state: &AppState) -> IdentityState {
        app_state.identity.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing tree, attaches authentication to the protected modules and wraps
/// everything in the observability and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    // Authentication is the outermost route layer, so the role gates inside see the user.
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::auth_middleware,
            )),
        )
        .nest(
            "/admin",
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::auth_middleware,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Request span carrying method, URI and the `x-request-id`, so every log line of one
/// request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
