//! Database repository for courses.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::courses::{CourseCreateDBRequest, CourseDBResponse},
};
use crate::types::CourseId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Course {
    id: CourseId,
    name: String,
    price: i32,
    duration: String,
    audience: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Course> for CourseDBResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            price: course.price,
            duration: course.duration,
            audience: course.audience,
            description: course.description,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

pub struct Courses<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Courses<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Courses<'c> {
    type CreateRequest = CourseCreateDBRequest;
    // Courses are replaced wholesale via PUT
    type UpdateRequest = CourseCreateDBRequest;
    type Response = CourseDBResponse;
    type Id = CourseId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (name, price, duration, audience, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(request.price)
        .bind(&request.duration)
        .bind(&request.audience)
        .bind(&request.description)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(CourseDBResponse::from(course))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(course.map(CourseDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let courses = sqlx::query_as::<_, Course>("SELECT * FROM courses ORDER BY id LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(courses.into_iter().map(CourseDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses SET
                name = $2,
                price = $3,
                duration = $4,
                audience = $5,
                description = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(request.price)
        .bind(&request.duration)
        .bind(&request.audience)
        .bind(&request.description)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(CourseDBResponse::from(course))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_course;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn crud_roundtrip(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Courses::new(&mut conn);

        let created = repo
            .create(&CourseCreateDBRequest {
                name: "English B2".to_string(),
                price: 450_000,
                duration: "6 oy".to_string(),
                audience: "9-11 sinf".to_string(),
                description: None,
            })
            .await
            .expect("Failed to create course");
        assert_eq!(created.price, 450_000);

        let fetched = repo.get_by_id(created.id).await.unwrap().expect("Course should exist");
        assert_eq!(fetched.name, "English B2");

        let updated = repo
            .update(
                created.id,
                &CourseCreateDBRequest {
                    name: "English B2".to_string(),
                    price: 500_000,
                    duration: "6 oy".to_string(),
                    audience: "9-11 sinf".to_string(),
                    description: Some("Intensiv kurs".to_string()),
                },
            )
            .await
            .expect("Failed to update course");
        assert_eq!(updated.price, 500_000);
        assert_eq!(updated.description.as_deref(), Some("Intensiv kurs"));

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn update_missing_course_is_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Courses::new(&mut conn);

        let result = repo
            .update(
                999_999,
                &CourseCreateDBRequest {
                    name: "Ghost".to_string(),
                    price: 1,
                    duration: "1 oy".to_string(),
                    audience: "hamma".to_string(),
                    description: None,
                },
            )
            .await;

        assert!(matches!(result, Err(DbError::NotFound)));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn list_is_paginated(pool: PgPool) {
        for i in 0..5 {
            create_test_course(&pool, &format!("Course {i}"), 100).await;
        }

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Courses::new(&mut conn);

        let page = repo.list(&PageFilter::new(2, 2)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "Course 2");
    }
}
