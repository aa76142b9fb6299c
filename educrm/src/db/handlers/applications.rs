//! Database repository for inbound course-interest applications, including
//! the application → student promotion.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::applications::{ApplicationCreateDBRequest, ApplicationDBResponse, ApplicationUpdateDBRequest},
};
use crate::types::{ApplicationId, StudentId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Application {
    id: ApplicationId,
    full_name: String,
    phone: String,
    school: Option<String>,
    grade: Option<String>,
    address: Option<String>,
    course_id: Option<i32>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Application> for ApplicationDBResponse {
    fn from(app: Application) -> Self {
        Self {
            id: app.id,
            full_name: app.full_name,
            phone: app.phone,
            school: app.school,
            grade: app.grade,
            address: app.address,
            course_id: app.course_id,
            status: app.status,
            created_at: app.created_at,
            updated_at: app.updated_at,
        }
    }
}

pub struct Applications<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Applications<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Provision a student from an application, keyed on phone number.
    ///
    /// Atomic insert-if-absent: an existing student with the same phone wins
    /// and is never modified, so two concurrent promotions of the same phone
    /// produce exactly one row and neither request fails. Returns the new
    /// student id, or `None` when the student already existed.
    ///
    /// Run this on the same transaction as the status write.
    #[instrument(skip(self, app), fields(application_id = app.id), err)]
    pub async fn promote_to_student(&mut self, app: &ApplicationDBResponse) -> Result<Option<StudentId>> {
        let created: Option<(StudentId,)> = sqlx::query_as(
            r#"
            INSERT INTO students (full_name, phone, school, grade, address)
            VALUES ($1, $2, COALESCE($3, '—'), COALESCE($4, '—'), $5)
            ON CONFLICT (phone) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&app.full_name)
        .bind(&app.phone)
        .bind(&app.school)
        .bind(&app.grade)
        .bind(&app.address)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(created.map(|(id,)| id))
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Applications<'c> {
    type CreateRequest = ApplicationCreateDBRequest;
    type UpdateRequest = ApplicationUpdateDBRequest;
    type Response = ApplicationDBResponse;
    type Id = ApplicationId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(full_name = %request.full_name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let app = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (full_name, phone, school, grade, address, course_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.school)
        .bind(&request.grade)
        .bind(&request.address)
        .bind(request.course_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(ApplicationDBResponse::from(app))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let app = sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(app.map(ApplicationDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let apps = sqlx::query_as::<_, Application>("SELECT * FROM applications ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(apps.into_iter().map(ApplicationDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Atomic update with conditional field updates. course_id cannot be
        // cleared through this surface, only replaced.
        let app = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                school = COALESCE($4, school),
                grade = COALESCE($5, grade),
                address = COALESCE($6, address),
                course_id = COALESCE($7, course_id),
                status = COALESCE($8, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.school)
        .bind(&request.grade)
        .bind(&request.address)
        .bind(request.course_id)
        .bind(&request.status)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(ApplicationDBResponse::from(app))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::handlers::Students;
    use crate::test_utils::{create_test_application, create_test_student, unique_phone};
    use sqlx::PgPool;

    async fn count_students_with_phone(pool: &PgPool, phone: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE phone = $1")
            .bind(phone)
            .fetch_one(pool)
            .await
            .expect("Failed to count students")
    }

    #[sqlx::test]
    #[test_log::test]
    async fn promotion_creates_a_student_once(pool: PgPool) {
        let phone = unique_phone();
        let first = create_test_application(&pool, "Laylo Sobirova", &phone).await;
        let second = create_test_application(&pool, "Laylo S.", &phone).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Applications::new(&mut conn);

        let created = repo.promote_to_student(&first).await.unwrap();
        assert!(created.is_some());

        // A second application with the same phone promotes into the same row
        let created_again = repo.promote_to_student(&second).await.unwrap();
        assert!(created_again.is_none());

        assert_eq!(count_students_with_phone(&pool, &phone).await, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn promotion_never_overwrites_an_existing_student(pool: PgPool) {
        let existing = create_test_student(&pool, "Ravshan Ikromov").await;
        let app = create_test_application(&pool, "Completely Different Name", &existing.phone).await;

        let mut conn = pool.acquire().await.unwrap();
        {
            let mut repo = Applications::new(&mut conn);
            assert!(repo.promote_to_student(&app).await.unwrap().is_none());
        }

        let mut students = Students::new(&mut conn);
        let unchanged = students.get_by_phone(&existing.phone).await.unwrap().unwrap();
        assert_eq!(unchanged.full_name, "Ravshan Ikromov");
        assert_eq!(count_students_with_phone(&pool, &existing.phone).await, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn promotion_defaults_missing_school_and_grade(pool: PgPool) {
        let phone = unique_phone();
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Applications::new(&mut conn);

        let app = repo
            .create(&ApplicationCreateDBRequest {
                full_name: "Umid Xo'jayev".to_string(),
                phone: phone.clone(),
                school: None,
                grade: None,
                address: Some("Shovot tumani".to_string()),
                course_id: None,
            })
            .await
            .unwrap();

        let student_id = repo.promote_to_student(&app).await.unwrap().expect("Student should be created");

        let mut students = Students::new(&mut conn);
        let student = students.get_by_id(student_id).await.unwrap().unwrap();
        assert_eq!(student.school, "—");
        assert_eq!(student.grade, "—");
        assert_eq!(student.address.as_deref(), Some("Shovot tumani"));
        assert!(student.email.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn invalid_status_is_a_check_violation(pool: PgPool) {
        let app = create_test_application(&pool, "Test Person", &unique_phone()).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Applications::new(&mut conn);
        let result = repo
            .update(
                app.id,
                &ApplicationUpdateDBRequest {
                    status: Some("archived".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DbError::CheckViolation { .. })));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn list_is_newest_first(pool: PgPool) {
        let a = create_test_application(&pool, "First", &unique_phone()).await;
        let b = create_test_application(&pool, "Second", &unique_phone()).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Applications::new(&mut conn);
        let listed = repo.list(&PageFilter::default()).await.unwrap();

        let pos_a = listed.iter().position(|x| x.id == a.id).unwrap();
        let pos_b = listed.iter().position(|x| x.id == b.id).unwrap();
        assert!(pos_b < pos_a, "newer application should come first");
    }
}
