//! Database repository for teaching groups.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::groups::{GroupCreateDBRequest, GroupDBResponse},
};
use crate::types::GroupId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Group {
    id: GroupId,
    name: String,
    course_id: i32,
    teacher_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Group> for GroupDBResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            course_id: group.course_id,
            teacher_id: group.teacher_id,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

pub struct Groups<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Groups<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Groups<'c> {
    type CreateRequest = GroupCreateDBRequest;
    // Groups are replaced wholesale via PUT
    type UpdateRequest = GroupCreateDBRequest;
    type Response = GroupDBResponse;
    type Id = GroupId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (name, course_id, teacher_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(request.course_id)
        .bind(request.teacher_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(GroupDBResponse::from(group))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let group = sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(group.map(GroupDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let groups = sqlx::query_as::<_, Group>("SELECT * FROM groups ORDER BY id LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(groups.into_iter().map(GroupDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            UPDATE groups SET
                name = $2,
                course_id = $3,
                teacher_id = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(request.course_id)
        .bind(request.teacher_id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(GroupDBResponse::from(group))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
