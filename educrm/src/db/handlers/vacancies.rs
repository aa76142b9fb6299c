//! Database repository for job vacancies.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::vacancies::{VacancyCreateDBRequest, VacancyDBResponse, VacancyUpdateDBRequest},
};
use crate::types::VacancyId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model. "type" is a reserved word in Rust, so the column
// is renamed to `kind` on this side.
#[derive(Debug, Clone, FromRow)]
struct Vacancy {
    id: VacancyId,
    title: String,
    #[sqlx(rename = "type")]
    kind: String,
    salary: String,
    location: String,
    description: Option<String>,
    requirements: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Vacancy> for VacancyDBResponse {
    fn from(vacancy: Vacancy) -> Self {
        Self {
            id: vacancy.id,
            title: vacancy.title,
            kind: vacancy.kind,
            salary: vacancy.salary,
            location: vacancy.location,
            description: vacancy.description,
            requirements: vacancy.requirements,
            status: vacancy.status,
            created_at: vacancy.created_at,
            updated_at: vacancy.updated_at,
        }
    }
}

pub struct Vacancies<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Vacancies<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Vacancies<'c> {
    type CreateRequest = VacancyCreateDBRequest;
    type UpdateRequest = VacancyUpdateDBRequest;
    type Response = VacancyDBResponse;
    type Id = VacancyId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let vacancy = sqlx::query_as::<_, Vacancy>(
            r#"
            INSERT INTO vacancies (title, type, salary, location, description, requirements, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&request.title)
        .bind(&request.kind)
        .bind(&request.salary)
        .bind(&request.location)
        .bind(&request.description)
        .bind(&request.requirements)
        .bind(&request.status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(VacancyDBResponse::from(vacancy))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let vacancy = sqlx::query_as::<_, Vacancy>("SELECT * FROM vacancies WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(vacancy.map(VacancyDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let vacancies = sqlx::query_as::<_, Vacancy>("SELECT * FROM vacancies ORDER BY id LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(vacancies.into_iter().map(VacancyDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Atomic update with conditional field updates
        let vacancy = sqlx::query_as::<_, Vacancy>(
            r#"
            UPDATE vacancies SET
                title = COALESCE($2, title),
                type = COALESCE($3, type),
                salary = COALESCE($4, salary),
                location = COALESCE($5, location),
                description = COALESCE($6, description),
                requirements = COALESCE($7, requirements),
                status = COALESCE($8, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.kind)
        .bind(&request.salary)
        .bind(&request.location)
        .bind(&request.description)
        .bind(&request.requirements)
        .bind(&request.status)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(VacancyDBResponse::from(vacancy))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
