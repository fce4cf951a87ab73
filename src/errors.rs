use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{campus::CampusError, models::ErrorBody};

/// ApiError
///
/// Every failure a handler, extractor, or gate can answer with. Each variant maps to one
/// status code and renders an `ErrorBody`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No usable session. The client should send the user to `redirect_to`.
    #[error("authentication required")]
    Unauthenticated { redirect_to: String },

    /// Signed in, but the role is not allowed here.
    #[error("access denied")]
    Forbidden { redirect_to: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Sign-in rejected by the identity provider; carries the display message.
    #[error("{0}")]
    Authentication(String),

    /// Sign-up rejected by the identity provider; carries the display message.
    #[error("{0}")]
    Registration(String),

    /// The identity provider could not be reached or answered garbage.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated { .. } | ApiError::Authentication(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) | ApiError::Registration(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn sign_in_required() -> Self {
        ApiError::Unauthenticated {
            redirect_to: crate::access::LOGIN_PATH.to_string(),
        }
    }
}

impl From<CampusError> for ApiError {
    fn from(err: CampusError) -> Self {
        match err {
            CampusError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CampusError::Conflict(msg) => ApiError::Conflict(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let redirect_to = match &self {
            ApiError::Unauthenticated { redirect_to } | ApiError::Forbidden { redirect_to } => {
                Some(redirect_to.clone())
            }
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            redirect_to,
        };
        (status, Json(body)).into_response()
    }
}
