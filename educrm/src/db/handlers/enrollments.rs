//! Database repository for the legacy enrollment link table.
//!
//! The payment ledger reads group memberships, not this table; enrollments
//! survive for clients that still manage them directly.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::enrollments::{EnrollmentCreateDBRequest, EnrollmentDBResponse},
};
use crate::types::{EnrollmentId, StudentId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Enrollment {
    id: EnrollmentId,
    student_id: StudentId,
    course_id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Enrollment> for EnrollmentDBResponse {
    fn from(row: Enrollment) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            course_id: row.course_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct Enrollments<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Enrollments<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn list_by_student(&mut self, student_id: StudentId) -> Result<Vec<EnrollmentDBResponse>> {
        let rows = sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE student_id = $1 ORDER BY id")
            .bind(student_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(rows.into_iter().map(EnrollmentDBResponse::from).collect())
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Enrollments<'c> {
    type CreateRequest = EnrollmentCreateDBRequest;
    // Enrollments are not editable; recreate to change status
    type UpdateRequest = EnrollmentCreateDBRequest;
    type Response = EnrollmentDBResponse;
    type Id = EnrollmentId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(student_id = request.student_id, course_id = request.course_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let row = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (student_id, course_id, status)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(request.student_id)
        .bind(request.course_id)
        .bind(&request.status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(EnrollmentDBResponse::from(row))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let row = sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(row.map(EnrollmentDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let rows = sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments ORDER BY id LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(rows.into_iter().map(EnrollmentDBResponse::from).collect())
    }

    async fn update(&mut self, _id: Self::Id, _request: &Self::UpdateRequest) -> Result<Self::Response> {
        Err(DbError::Other(anyhow::anyhow!("enrollments are immutable")))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_course, create_test_student};
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn duplicate_enrollment_is_a_unique_violation(pool: PgPool) {
        let course = create_test_course(&pool, "Informatika", 300_000).await;
        let student = create_test_student(&pool, "Kamola Rashidova").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Enrollments::new(&mut conn);
        let request = EnrollmentCreateDBRequest {
            student_id: student.id,
            course_id: course.id,
            status: "active".to_string(),
        };

        repo.create(&request).await.expect("First enrollment should succeed");

        match repo.create(&request).await {
            Err(DbError::UniqueViolation { table, .. }) => {
                assert_eq!(table.as_deref(), Some("enrollments"));
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn enrollment_with_unknown_course_is_a_fk_violation(pool: PgPool) {
        let student = create_test_student(&pool, "Shaxzod Umarov").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Enrollments::new(&mut conn);
        let result = repo
            .create(&EnrollmentCreateDBRequest {
                student_id: student.id,
                course_id: 999_999,
                status: "active".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }
}
