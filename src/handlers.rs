use crate::{
    AppState,
    auth::{AuthUser, bearer_token},
    errors::ApiError,
    identity::{ProviderSession, ProviderUser, user_message},
    models::{
        Canteen, Classroom, Faculty, Feature, LoginRequest, MeetingRequest, RegisterUserRequest,
        Role, SessionResponse, UpdateClassroomStatusRequest, User,
    },
    search::{CanteenFilter, CanteenQuery, ClassroomFilter, ClassroomQuery, FacultyFilter, FacultyQuery},
    seed,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};

// --- Helpers ---

fn require_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required.".to_string(),
        ));
    }
    Ok(())
}

/// Role of a provider account: the profile row wins, then the sign-up metadata.
async fn resolve_role(state: &AppState, user: &ProviderUser) -> Role {
    match state.repo.get_user(user.id).await {
        Some(profile) => profile.role,
        None => user.role.unwrap_or_default(),
    }
}

/// The `profiles` row behind a provider account. An account signed in for the first time
/// without one (e.g. created outside `/auth/register`) gets it here, so the issued token
/// is accepted by `AuthUser` on the next request.
async fn ensure_profile(state: &AppState, user: &ProviderUser) -> Result<User, ApiError> {
    if let Some(profile) = state.repo.get_user(user.id).await {
        return Ok(profile);
    }

    let profile = User {
        id: user.id,
        email: user.email.clone(),
        role: user.role.unwrap_or_default(),
    };
    match state.repo.create_user(profile).await {
        Some(created) => {
            tracing::info!(user_id = %created.id, role = %created.role, "profile created at first sign-in");
            Ok(created)
        }
        // Lost a race against a concurrent insert.
        None => state.repo.get_user(user.id).await.ok_or_else(|| {
            tracing::error!(user_id = %user.id, "profile missing and could not be created at sign-in");
            ApiError::Internal("Could not load the user profile.".to_string())
        }),
    }
}

fn session_response(session: ProviderSession, role: Role) -> SessionResponse {
    SessionResponse {
        user: User {
            id: session.user.id,
            email: session.user.email,
            role,
        },
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
    }
}

// --- Session ---

/// login
///
/// [Public Route] Forwards the credentials to the identity provider and returns the
/// session together with the caller's role. The role always comes from the `profiles`
/// row, which is created from the account metadata (default student) if missing.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 401, description = "Rejected", body = crate::models::ErrorBody),
        (status = 500, description = "Profile unavailable", body = crate::models::ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    require_credentials(&payload.email, &payload.password)?;

    let session = state
        .identity
        .sign_in(payload.email.trim(), &payload.password)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "sign-in failed");
            ApiError::Authentication(user_message(&e))
        })?;

    let profile = ensure_profile(&state, &session.user).await?;
    tracing::info!(user_id = %profile.id, role = %profile.role, "user signed in");
    Ok(Json(session_response(session, profile.role)))
}

/// register_user
///
/// [Public Route] Creates the account at the identity provider, then the mirrored
/// `profiles` row under the provider's user id.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Registered", body = SessionResponse),
        (status = 400, description = "Rejected", body = crate::models::ErrorBody),
        (status = 500, description = "Profile could not be created", body = crate::models::ErrorBody)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    require_credentials(&payload.email, &payload.password)?;

    let session = state
        .identity
        .sign_up(payload.email.trim(), &payload.password, payload.role)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "sign-up failed");
            ApiError::Registration(user_message(&e))
        })?;

    let profile = User {
        id: session.user.id,
        email: session.user.email.clone(),
        role: payload.role,
    };
    let created = match state.repo.create_user(profile).await {
        Some(created) => created,
        None => match state.repo.get_user(session.user.id).await {
            // Already mirrored, e.g. by an earlier sign-in.
            Some(existing) => existing,
            None => {
                tracing::error!(
                    orphaned_user_id = %session.user.id,
                    email = %session.user.email,
                    "profile creation failed after sign-up; provider account left without a profile"
                );
                return Err(ApiError::Internal(
                    "Could not create the user profile.".to_string(),
                ));
            }
        },
    };

    if session.access_token.is_none() {
        tracing::info!(user_id = %created.id, "registered; awaiting email confirmation");
    }
    Ok((StatusCode::CREATED, Json(session_response(session, created.role))))
}

/// logout
///
/// [Authenticated Route] Revokes the provider session behind the bearer token. A request
/// authenticated through the local `x-user-id` bypass has nothing to revoke.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Signed out"))
)]
pub async fn logout(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        state.identity.sign_out(token).await.map_err(|e| {
            tracing::warn!(user_id = %id, error = %e, "sign-out failed");
            ApiError::Upstream(user_message(&e))
        })?;
    }
    tracing::info!(user_id = %id, "user signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// get_session
///
/// [Authenticated Route] Asks the identity provider who owns the bearer token.
#[utoipa::path(
    get,
    path = "/auth/session",
    responses((status = 200, description = "Current session user", body = User))
)]
pub async fn get_session(
    _caller: AuthUser,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, ApiError> {
    let token = bearer_token(&headers).ok_or_else(ApiError::sign_in_required)?;
    let provider_user = state.identity.current_user(token).await.map_err(|e| {
        tracing::warn!(error = %e, "session lookup failed");
        ApiError::sign_in_required()
    })?;
    let role = resolve_role(&state, &provider_user).await;
    Ok(Json(User {
        id: provider_user.id,
        email: provider_user.email,
        role,
    }))
}

/// get_me
///
/// [Authenticated Route] The caller's profile.
#[utoipa::path(
    get,
    path = "/me",
    responses((status = 200, description = "Profile", body = User))
)]
pub async fn get_me(AuthUser { id, email, role }: AuthUser) -> Json<User> {
    Json(User { id, email, role })
}

// --- Landing page ---

/// get_features
///
/// [Public Route] Service tiles of the landing page.
#[utoipa::path(
    get,
    path = "/features",
    responses((status = 200, description = "Features", body = [Feature]))
)]
pub async fn get_features() -> Json<Vec<Feature>> {
    Json(seed::features())
}

// --- Classrooms ---

/// get_classrooms
///
/// [Authenticated Route] Lists classrooms matching the search text, status and capacity.
#[utoipa::path(
    get,
    path = "/classrooms",
    params(ClassroomQuery),
    responses(
        (status = 200, description = "Matching classrooms", body = [Classroom]),
        (status = 400, description = "Unknown status", body = crate::models::ErrorBody)
    )
)]
pub async fn get_classrooms(
    State(state): State<AppState>,
    Query(query): Query<ClassroomQuery>,
) -> Result<Json<Vec<Classroom>>, ApiError> {
    let filter = ClassroomFilter::try_from(query)?;
    Ok(Json(state.campus.classrooms(&filter).await))
}

/// reserve_classroom
///
/// [Authenticated Route] Reserves an available classroom for the default slot.
#[utoipa::path(
    post,
    path = "/classrooms/{id}/reserve",
    params(("id" = String, Path, description = "Classroom ID")),
    responses(
        (status = 200, description = "Reserved", body = Classroom),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Occupied or under maintenance")
    )
)]
pub async fn reserve_classroom(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Classroom>, ApiError> {
    let room = state.campus.reserve_classroom(&id).await?;
    tracing::debug!(%user_id, classroom_id = %id, "reservation accepted");
    Ok(Json(room))
}

/// release_classroom
///
/// [Staff Route] Frees an occupied classroom.
#[utoipa::path(
    post,
    path = "/classrooms/{id}/release",
    params(("id" = String, Path, description = "Classroom ID")),
    responses(
        (status = 200, description = "Released", body = Classroom),
        (status = 403, description = "Students cannot release rooms"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Not occupied")
    )
)]
pub async fn release_classroom(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Classroom>, ApiError> {
    Ok(Json(state.campus.release_classroom(&id).await?))
}

/// update_classroom_status
///
/// [Admin Route] Sets a classroom's status directly, e.g. to take it into maintenance.
#[utoipa::path(
    put,
    path = "/admin/classrooms/{id}/status",
    params(("id" = String, Path, description = "Classroom ID")),
    request_body = UpdateClassroomStatusRequest,
    responses(
        (status = 200, description = "Updated", body = Classroom),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_classroom_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateClassroomStatusRequest>,
) -> Result<Json<Classroom>, ApiError> {
    let room = state
        .campus
        .set_classroom_status(&id, payload.status, payload.time_slot)
        .await?;
    Ok(Json(room))
}

// --- Faculty ---

/// get_faculty
///
/// [Authenticated Route] Lists faculty matching the search text, department and status.
#[utoipa::path(
    get,
    path = "/faculty",
    params(FacultyQuery),
    responses(
        (status = 200, description = "Matching faculty", body = [Faculty]),
        (status = 400, description = "Unknown status", body = crate::models::ErrorBody)
    )
)]
pub async fn get_faculty(
    State(state): State<AppState>,
    Query(query): Query<FacultyQuery>,
) -> Result<Json<Vec<Faculty>>, ApiError> {
    let filter = FacultyFilter::try_from(query)?;
    Ok(Json(state.campus.faculty(&filter).await))
}

/// get_departments
///
/// [Authenticated Route] Department choices for the faculty filter.
#[utoipa::path(
    get,
    path = "/faculty/departments",
    responses((status = 200, description = "Departments", body = [String]))
)]
pub async fn get_departments(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.campus.departments().await)
}

/// request_meeting
///
/// [Authenticated Route] Sends a meeting request to a faculty member who is not offline.
#[utoipa::path(
    post,
    path = "/faculty/{id}/meetings",
    params(("id" = String, Path, description = "Faculty ID")),
    responses(
        (status = 201, description = "Request sent", body = MeetingRequest),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Offline")
    )
)]
pub async fn request_meeting(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(faculty_id): Path<String>,
) -> Result<(StatusCode, Json<MeetingRequest>), ApiError> {
    let request = state.campus.request_meeting(&faculty_id, user_id).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// get_my_meetings
///
/// [Authenticated Route] The caller's meeting requests, newest first.
#[utoipa::path(
    get,
    path = "/me/meetings",
    responses((status = 200, description = "My meeting requests", body = [MeetingRequest]))
)]
pub async fn get_my_meetings(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Json<Vec<MeetingRequest>> {
    Json(state.campus.meetings_for(id).await)
}

// --- Canteens ---

/// get_canteens
///
/// [Authenticated Route] Lists canteens matching the search text and meal category.
#[utoipa::path(
    get,
    path = "/canteens",
    params(CanteenQuery),
    responses(
        (status = 200, description = "Matching canteens", body = [Canteen]),
        (status = 400, description = "Unknown category", body = crate::models::ErrorBody)
    )
)]
pub async fn get_canteens(
    State(state): State<AppState>,
    Query(query): Query<CanteenQuery>,
) -> Result<Json<Vec<Canteen>>, ApiError> {
    let filter = CanteenFilter::try_from(query)?;
    Ok(Json(state.campus.canteens(&filter).await))
}
