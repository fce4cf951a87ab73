use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{auth::AuthUser, errors::ApiError, models::Role};

pub const LOGIN_PATH: &str = "/login";

/// Every signed-in role.
pub const EVERYONE: &[Role] = &[Role::Student, Role::Faculty, Role::Admin];
/// Roles that may free up an occupied classroom.
pub const STAFF: &[Role] = &[Role::Faculty, Role::Admin];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// has_access
///
/// Membership test of `role` in the allow-list.
pub fn has_access(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

/// home_for
///
/// Where a user lands when a page is off-limits for their role.
pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::Student => "/classrooms",
        Role::Faculty => "/faculty",
        Role::Admin => "/",
    }
}

/// AccessDecision
///
/// Outcome of running a `RoleGate` against the current caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    /// Nobody is signed in.
    SignInRequired { redirect_to: &'static str },
    /// Signed in with a role outside the allow-list; go to the role's home.
    Redirect { to: &'static str },
}

impl AccessDecision {
    pub fn into_result(self) -> Result<(), ApiError> {
        match self {
            AccessDecision::Granted => Ok(()),
            AccessDecision::SignInRequired { redirect_to } => Err(ApiError::Unauthenticated {
                redirect_to: redirect_to.to_string(),
            }),
            AccessDecision::Redirect { to } => Err(ApiError::Forbidden {
                redirect_to: to.to_string(),
            }),
        }
    }
}

/// RoleGate
///
/// An allow-list of roles guarding a route. Attached with
/// `middleware::from_fn_with_state(RoleGate::new(STAFF), role_gate)` *inside* the
/// authentication layer, so the resolved `AuthUser` is already in the request extensions.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    allowed: &'static [Role],
    redirect_to: &'static str,
}

impl RoleGate {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self {
            allowed,
            redirect_to: LOGIN_PATH,
        }
    }

    /// Overrides where anonymous callers are sent.
    pub const fn redirect_to(mut self, path: &'static str) -> Self {
        self.redirect_to = path;
        self
    }

    pub fn allowed(&self) -> &'static [Role] {
        self.allowed
    }

    pub fn evaluate(&self, user: Option<&AuthUser>) -> AccessDecision {
        match user {
            None => AccessDecision::SignInRequired {
                redirect_to: self.redirect_to,
            },
            Some(user) if has_access(user.role, self.allowed) => AccessDecision::Granted,
            Some(user) => AccessDecision::Redirect {
                to: home_for(user.role),
            },
        }
    }
}

/// role_gate
///
/// Middleware enforcing a `RoleGate`. Rejections carry the redirect target in the body.
pub async fn role_gate(State(gate): State<RoleGate>, request: Request, next: Next) -> Response {
    let decision = gate.evaluate(request.extensions().get::<AuthUser>());
    match decision.into_result() {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::debug!(
                path = %request.uri().path(),
                allowed = ?gate.allowed(),
                "role gate rejected request"
            );
            err.into_response()
        }
    }
}
