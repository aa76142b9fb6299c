//! Database repository for students.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::students::{StudentCreateDBRequest, StudentDBResponse},
};
use crate::types::StudentId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Student {
    id: StudentId,
    full_name: String,
    phone: String,
    email: Option<String>,
    school: String,
    grade: String,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Student> for StudentDBResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name,
            phone: student.phone,
            email: student.email,
            school: student.school,
            grade: student.grade,
            address: student.address,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

pub struct Students<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Students<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up a student by phone number (the natural key used by
    /// application promotion).
    #[instrument(skip(self, phone), err)]
    pub async fn get_by_phone(&mut self, phone: &str) -> Result<Option<StudentDBResponse>> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(student.map(StudentDBResponse::from))
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Students<'c> {
    type CreateRequest = StudentCreateDBRequest;
    // Students are replaced wholesale via PUT
    type UpdateRequest = StudentCreateDBRequest;
    type Response = StudentDBResponse;
    type Id = StudentId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(full_name = %request.full_name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (full_name, phone, email, school, grade, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.school)
        .bind(&request.grade)
        .bind(&request.address)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(StudentDBResponse::from(student))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(student.map(StudentDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let students = sqlx::query_as::<_, Student>("SELECT * FROM students ORDER BY id LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(students.into_iter().map(StudentDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET
                full_name = $2,
                phone = $3,
                email = $4,
                school = $5,
                grade = $6,
                address = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.school)
        .bind(&request.grade)
        .bind(&request.address)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(StudentDBResponse::from(student))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_student;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn duplicate_phone_is_a_unique_violation(pool: PgPool) {
        let existing = create_test_student(&pool, "Aziza Karimova").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Students::new(&mut conn);
        let result = repo
            .create(&StudentCreateDBRequest {
                full_name: "Another Person".to_string(),
                phone: existing.phone.clone(),
                email: None,
                school: "5-maktab".to_string(),
                grade: "9".to_string(),
                address: None,
            })
            .await;

        match result {
            Err(DbError::UniqueViolation { table, constraint, .. }) => {
                assert_eq!(table.as_deref(), Some("students"));
                assert!(constraint.as_deref().unwrap_or_default().contains("phone"));
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn get_by_phone_finds_the_row(pool: PgPool) {
        let student = create_test_student(&pool, "Bobur Aliyev").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Students::new(&mut conn);

        let found = repo.get_by_phone(&student.phone).await.unwrap().expect("Student should exist");
        assert_eq!(found.id, student.id);

        assert!(repo.get_by_phone("+998000000000").await.unwrap().is_none());
    }
}
