//! Database repository for admin users.
//!
//! Users are provisioned at startup (initial admin) and looked up at login;
//! there is no public CRUD surface for this table.

use crate::db::{
    errors::Result,
    models::users::{UserCreateDBRequest, UserDBResponse},
};
use crate::types::UserId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct User {
    id: UserId,
    username: String,
    hashed_password: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<User> for UserDBResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            hashed_password: user.hashed_password,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(username = %request.username), err)]
    pub async fn create(&mut self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, hashed_password, role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&request.username)
        .bind(&request.hashed_password)
        .bind(&request.role)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(UserDBResponse::from(user))
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: UserId) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user.map(UserDBResponse::from))
    }

    #[instrument(skip(self, username), err)]
    pub async fn get_by_username(&mut self, username: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user.map(UserDBResponse::from))
    }

    #[instrument(skip(self, hashed_password), err)]
    pub async fn set_password(&mut self, id: UserId, hashed_password: &str) -> Result<()> {
        sqlx::query("UPDATE users SET hashed_password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(hashed_password)
            .execute(&mut *self.db)
            .await?;

        Ok(())
    }
}
