#![allow(dead_code)]

use async_trait::async_trait;
use campus_radar::{
    AppConfig, AppState, InMemoryCampus, MockIdentityProvider,
    auth::{AuthUser, Claims},
    config::Env,
    models::{Role, User},
    repository::Repository,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::SystemTime,
};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
pub const STUDENT_ID: Uuid = Uuid::from_u128(1);
pub const FACULTY_ID: Uuid = Uuid::from_u128(2);
pub const ADMIN_ID: Uuid = Uuid::from_u128(3);

// --- Mock Repository ---

/// Profiles kept in a map; `fail_creates` simulates a database outage on insert.
#[derive(Default)]
pub struct MockProfiles {
    pub users: Mutex<HashMap<Uuid, User>>,
    pub fail_creates: bool,
}

impl MockProfiles {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
            fail_creates: false,
        }
    }

    /// One profile per role, ids `STUDENT_ID`, `FACULTY_ID`, `ADMIN_ID`.
    pub fn campus_people() -> Self {
        Self::with_users(vec![
            user(STUDENT_ID, "student@example.edu", Role::Student),
            user(FACULTY_ID, "faculty@example.edu", Role::Faculty),
            user(ADMIN_ID, "admin@example.edu", Role::Admin),
        ])
    }
}

#[async_trait]
impl Repository for MockProfiles {
    async fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    async fn create_user(&self, user: User) -> Option<User> {
        if self.fail_creates {
            return None;
        }
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.id) {
            return None;
        }
        users.insert(user.id, user.clone());
        Some(user)
    }
}

// --- Builders ---

pub fn user(id: Uuid, email: &str, role: Role) -> User {
    User {
        id,
        email: email.to_string(),
        role,
    }
}

pub fn auth_user(id: Uuid, role: Role) -> AuthUser {
    AuthUser {
        id,
        email: format!("{}@example.edu", role),
        role,
    }
}

pub fn test_config(env: Env) -> AppConfig {
    AppConfig {
        env,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    }
}

pub fn build_state(env: Env, repo: MockProfiles, identity: MockIdentityProvider) -> AppState {
    AppState {
        repo: Arc::new(repo),
        campus: Arc::new(InMemoryCampus::seeded()),
        identity: Arc::new(identity),
        config: test_config(env),
    }
}

/// Seeded campus, one profile per role, an identity provider that accepts everything.
pub fn default_state() -> AppState {
    build_state(
        Env::Local,
        MockProfiles::campus_people(),
        MockIdentityProvider::new(STUDENT_ID),
    )
}

// --- Tokens ---

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn token_with(user_id: Uuid, exp: u64, aud: &str, secret: &str) -> String {
    let claims = Claims {
        sub: user_id,
        iat: now_secs() as usize,
        exp: exp as usize,
        aud: aud.to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Valid for an hour, signed with `TEST_JWT_SECRET`.
pub fn create_token(user_id: Uuid) -> String {
    token_with(user_id, now_secs() + 3600, "authenticated", TEST_JWT_SECRET)
}
