use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Role;

pub const EMAIL_NOT_CONFIRMED_MESSAGE: &str =
    "Please confirm your email address before signing in.";
pub const GENERIC_AUTH_FAILURE_MESSAGE: &str = "Authentication failed. Please try again.";

/// IdentityError
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider answered with a non-success status.
    #[error("identity provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("identity provider sent an unexpected response: {0}")]
    Malformed(String),
}

/// user_message
///
/// Collapses any provider failure into the one string shown to the user. The only case
/// singled out is an account whose email address has not been confirmed yet.
pub fn user_message(err: &IdentityError) -> String {
    match err {
        IdentityError::Rejected { message, .. }
            if message.to_lowercase().contains("email not confirmed") =>
        {
            EMAIL_NOT_CONFIRMED_MESSAGE.to_string()
        }
        _ => GENERIC_AUTH_FAILURE_MESSAGE.to_string(),
    }
}

/// ProviderUser
///
/// The provider's account record, reduced to what the session needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderUser {
    pub id: Uuid,
    pub email: String,
    /// Role stored in the account's user metadata at sign-up, if any.
    pub role: Option<Role>,
}

/// ProviderSession
///
/// Result of a sign-in or sign-up. Tokens are `None` when sign-up still awaits email
/// confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSession {
    pub user: ProviderUser,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

/// IdentityProvider
///
/// Contract of the external authentication service. Credentials are forwarded as-is;
/// this service never validates or stores passwords itself.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<ProviderSession, IdentityError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

    async fn current_user(&self, access_token: &str) -> Result<ProviderUser, IdentityError>;
}

pub type IdentityState = Arc<dyn IdentityProvider>;

// --- GoTrue wire shapes ---

#[derive(Debug, Deserialize)]
struct WireUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Value,
}

impl WireUser {
    fn into_user(self, fallback_email: &str) -> ProviderUser {
        let role = self
            .user_metadata
            .get("role")
            .and_then(Value::as_str)
            .and_then(|role| role.parse().ok());
        ProviderUser {
            id: self.id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
            role,
        }
    }
}

/// Sign-in always answers with a session; sign-up answers with a session when the project
/// auto-confirms accounts and with the bare user otherwise.
#[derive(Debug, Deserialize)]
struct WireSession {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user: Option<WireUser>,
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Value,
}

impl WireSession {
    fn into_session(self, fallback_email: &str) -> Result<ProviderSession, IdentityError> {
        let user = match (self.user, self.id) {
            (Some(user), _) => user,
            (None, Some(id)) => WireUser {
                id,
                email: self.email,
                user_metadata: self.user_metadata,
            },
            (None, None) => {
                return Err(IdentityError::Malformed(
                    "response carries neither a user nor a user id".to_string(),
                ));
            }
        };
        Ok(ProviderSession {
            user: user.into_user(fallback_email),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in,
        })
    }
}

/// error_message
///
/// Picks the human-readable part of a GoTrue error body. Older deployments use
/// `error_description`, newer ones `msg`.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

async fn reject_unless_success(response: Response) -> Result<Response, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(IdentityError::Rejected {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// SupabaseIdentityClient
///
/// `IdentityProvider` speaking the Supabase Auth (GoTrue) REST API.
#[derive(Clone)]
pub struct SupabaseIdentityClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseIdentityClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn decode_session(
        response: Response,
        email: &str,
    ) -> Result<ProviderSession, IdentityError> {
        let wire = response
            .json::<WireSession>()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        wire.into_session(email)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError> {
        let response = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let response = reject_unless_success(response).await?;
        Self::decode_session(response, email).await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<ProviderSession, IdentityError> {
        let response = self
            .client
            .post(self.endpoint("signup"))
            .header("apikey", &self.api_key)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "role": role.as_str() },
            }))
            .send()
            .await?;

        let response = reject_unless_success(response).await?;
        Self::decode_session(response, email).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        reject_unless_success(response).await.map(|_| ())
    }

    async fn current_user(&self, access_token: &str) -> Result<ProviderUser, IdentityError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = reject_unless_success(response).await?;
        let user = response
            .json::<WireUser>()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        Ok(user.into_user(""))
    }
}

/// MockIdentityProvider
///
/// In-process stand-in for the identity provider, used by tests. Every call succeeds with
/// `user_id` unless `failure` is set, in which case it is rejected with that message.
#[derive(Clone)]
pub struct MockIdentityProvider {
    pub user_id: Uuid,
    /// Role reported in the account metadata.
    pub metadata_role: Option<Role>,
    /// When false, sign-up returns no tokens, as if email confirmation were pending.
    pub auto_confirm: bool,
    pub failure: Option<String>,
}

impl MockIdentityProvider {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            metadata_role: None,
            auto_confirm: true,
            failure: None,
        }
    }

    pub fn new_failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Uuid::nil())
        }
    }

    fn check(&self) -> Result<(), IdentityError> {
        match &self.failure {
            Some(message) => Err(IdentityError::Rejected {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn session(&self, email: &str, role: Option<Role>, with_tokens: bool) -> ProviderSession {
        let token = |kind: &str| with_tokens.then(|| format!("mock-{kind}-{}", self.user_id));
        ProviderSession {
            user: ProviderUser {
                id: self.user_id,
                email: email.to_string(),
                role,
            },
            access_token: token("access"),
            refresh_token: token("refresh"),
            expires_in: with_tokens.then_some(3600),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<ProviderSession, IdentityError> {
        self.check()?;
        Ok(self.session(email, self.metadata_role, true))
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        role: Role,
    ) -> Result<ProviderSession, IdentityError> {
        self.check()?;
        Ok(self.session(email, Some(role), self.auto_confirm))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), IdentityError> {
        self.check()
    }

    async fn current_user(&self, _access_token: &str) -> Result<ProviderUser, IdentityError> {
        self.check()?;
        Ok(ProviderUser {
            id: self.user_id,
            email: format!("{}@mock.local", self.user_id.simple()),
            role: self.metadata_role,
        })
    }
}
