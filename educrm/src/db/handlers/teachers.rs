//! Database repository for teachers.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::teachers::{TeacherCreateDBRequest, TeacherDBResponse},
};
use crate::types::TeacherId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Teacher {
    id: TeacherId,
    full_name: String,
    specialty: String,
    experience: String,
    phone: String,
    image: Option<String>,
    tags: Option<String>,
    quote: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Teacher> for TeacherDBResponse {
    fn from(teacher: Teacher) -> Self {
        Self {
            id: teacher.id,
            full_name: teacher.full_name,
            specialty: teacher.specialty,
            experience: teacher.experience,
            phone: teacher.phone,
            image: teacher.image,
            tags: teacher.tags,
            quote: teacher.quote,
            created_at: teacher.created_at,
            updated_at: teacher.updated_at,
        }
    }
}

pub struct Teachers<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Teachers<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Teachers<'c> {
    type CreateRequest = TeacherCreateDBRequest;
    // Teachers are replaced wholesale via PUT
    type UpdateRequest = TeacherCreateDBRequest;
    type Response = TeacherDBResponse;
    type Id = TeacherId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(full_name = %request.full_name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (full_name, specialty, experience, phone, image, tags, quote)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&request.full_name)
        .bind(&request.specialty)
        .bind(&request.experience)
        .bind(&request.phone)
        .bind(&request.image)
        .bind(&request.tags)
        .bind(&request.quote)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(TeacherDBResponse::from(teacher))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let teacher = sqlx::query_as::<_, Teacher>("SELECT * FROM teachers WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(teacher.map(TeacherDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let teachers = sqlx::query_as::<_, Teacher>("SELECT * FROM teachers ORDER BY id LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(teachers.into_iter().map(TeacherDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            UPDATE teachers SET
                full_name = $2,
                specialty = $3,
                experience = $4,
                phone = $5,
                image = $6,
                tags = $7,
                quote = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.full_name)
        .bind(&request.specialty)
        .bind(&request.experience)
        .bind(&request.phone)
        .bind(&request.image)
        .bind(&request.tags)
        .bind(&request.quote)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(TeacherDBResponse::from(teacher))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
