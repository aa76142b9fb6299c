//! Database repository for vacancy applications.
//!
//! Reads join the vacancy title in, so list/detail views don't need a
//! second query per row.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::vacancy_applications::{
        VacancyApplicationCreateDBRequest, VacancyApplicationDBResponse, VacancyApplicationUpdateDBRequest,
    },
};
use crate::types::{VacancyApplicationId, VacancyId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model, joined with the vacancy title
#[derive(Debug, Clone, FromRow)]
struct VacancyApplication {
    id: VacancyApplicationId,
    full_name: String,
    phone: String,
    education: Option<String>,
    certificates: Option<String>,
    certificate_level: Option<String>,
    vacancy_id: VacancyId,
    status: String,
    notes: Option<String>,
    vacancy_title: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VacancyApplication> for VacancyApplicationDBResponse {
    fn from(row: VacancyApplication) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            education: row.education,
            certificates: row.certificates,
            certificate_level: row.certificate_level,
            vacancy_id: row.vacancy_id,
            status: row.status,
            notes: row.notes,
            vacancy_title: row.vacancy_title,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_WITH_TITLE: &str = r#"
    SELECT va.id, va.full_name, va.phone, va.education, va.certificates,
           va.certificate_level, va.vacancy_id, va.status, va.notes,
           v.title AS vacancy_title, va.created_at, va.updated_at
    FROM vacancy_applications va
    LEFT JOIN vacancies v ON v.id = va.vacancy_id
"#;

pub struct VacancyApplications<'c> {
    db: &'c mut PgConnection,
}

impl<'c> VacancyApplications<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for VacancyApplications<'c> {
    type CreateRequest = VacancyApplicationCreateDBRequest;
    type UpdateRequest = VacancyApplicationUpdateDBRequest;
    type Response = VacancyApplicationDBResponse;
    type Id = VacancyApplicationId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(vacancy_id = request.vacancy_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let inserted_id: (VacancyApplicationId,) = sqlx::query_as(
            r#"
            INSERT INTO vacancy_applications
                (full_name, phone, education, certificates, certificate_level, vacancy_id, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.education)
        .bind(&request.certificates)
        .bind(&request.certificate_level)
        .bind(request.vacancy_id)
        .bind(&request.status)
        .bind(&request.notes)
        .fetch_one(&mut *self.db)
        .await?;

        self.get_by_id(inserted_id.0).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let row = sqlx::query_as::<_, VacancyApplication>(&format!("{SELECT_WITH_TITLE} WHERE va.id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(row.map(VacancyApplicationDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let rows = sqlx::query_as::<_, VacancyApplication>(&format!(
            "{SELECT_WITH_TITLE} ORDER BY va.created_at DESC, va.id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows.into_iter().map(VacancyApplicationDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let updated: Option<(VacancyApplicationId,)> = sqlx::query_as(
            r#"
            UPDATE vacancy_applications SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                education = COALESCE($4, education),
                certificates = COALESCE($5, certificates),
                certificate_level = COALESCE($6, certificate_level),
                status = COALESCE($7, status),
                notes = COALESCE($8, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.education)
        .bind(&request.certificates)
        .bind(&request.certificate_level)
        .bind(&request.status)
        .bind(&request.notes)
        .fetch_optional(&mut *self.db)
        .await?;

        let (id,) = updated.ok_or(DbError::NotFound)?;
        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM vacancy_applications WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
