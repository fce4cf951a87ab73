use crate::models::{Role, User};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Persistence contract for user profiles, the only data this service owns. Handlers and
/// the `AuthUser` extractor talk to `Arc<dyn Repository>`, so tests swap in mocks freely.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Looks up the profile mirrored from the identity provider account `id`.
    async fn get_user(&self, id: Uuid) -> Option<User>;
    /// Inserts the profile for a freshly registered account. `None` on failure.
    async fn create_user(&self, user: User) -> Option<User>;
}

pub type RepositoryState = Arc<dyn Repository>;

/// ProfileRow
///
/// Raw `profiles` row; `role` is free text in the database.
#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    email: String,
    role: String,
}

impl From<ProfileRow> for User {
    fn from(row: ProfileRow) -> Self {
        let role = row.role.parse::<Role>().unwrap_or_else(|e| {
            tracing::warn!(user_id = %row.id, "profile has {e}; treating as student");
            Role::Student
        });
        User {
            id: row.id,
            email: row.email,
            role,
        }
    }
}

/// PostgresRepository
///
/// `Repository` backed by the `profiles` table.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, ProfileRow>("SELECT id, email, role FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user error: {:?}", e);
                None
            })
            .map(User::from)
    }

    /// create_user
    ///
    /// Re-registering an id that already has a profile keeps the stored row untouched and
    /// returns nothing.
    async fn create_user(&self, user: User) -> Option<User> {
        sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, email, role) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, email, role
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(user.role.as_str())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_user error: {:?}", e);
            None
        })
        .map(User::from)
    }
}
