//! Database repository for group roster memberships.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::group_students::{GroupStudentCreateDBRequest, GroupStudentDBResponse},
};
use crate::types::{GroupId, GroupStudentId, StudentId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct GroupStudent {
    id: GroupStudentId,
    group_id: GroupId,
    student_id: StudentId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GroupStudent> for GroupStudentDBResponse {
    fn from(row: GroupStudent) -> Self {
        Self {
            id: row.id,
            group_id: row.group_id,
            student_id: row.student_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct GroupStudents<'c> {
    db: &'c mut PgConnection,
}

impl<'c> GroupStudents<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn list_by_group(&mut self, group_id: GroupId) -> Result<Vec<GroupStudentDBResponse>> {
        let rows = sqlx::query_as::<_, GroupStudent>("SELECT * FROM group_students WHERE group_id = $1 ORDER BY id")
            .bind(group_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(rows.into_iter().map(GroupStudentDBResponse::from).collect())
    }

    #[instrument(skip(self), err)]
    pub async fn list_by_student(&mut self, student_id: StudentId) -> Result<Vec<GroupStudentDBResponse>> {
        let rows = sqlx::query_as::<_, GroupStudent>("SELECT * FROM group_students WHERE student_id = $1 ORDER BY id")
            .bind(student_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(rows.into_iter().map(GroupStudentDBResponse::from).collect())
    }

    #[instrument(skip(self), err)]
    pub async fn find_by_pair(&mut self, group_id: GroupId, student_id: StudentId) -> Result<Option<GroupStudentDBResponse>> {
        let row = sqlx::query_as::<_, GroupStudent>("SELECT * FROM group_students WHERE group_id = $1 AND student_id = $2")
            .bind(group_id)
            .bind(student_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(row.map(GroupStudentDBResponse::from))
    }

    /// Remove a membership by (group, student) rather than by row id.
    #[instrument(skip(self), err)]
    pub async fn delete_by_pair(&mut self, group_id: GroupId, student_id: StudentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM group_students WHERE group_id = $1 AND student_id = $2")
            .bind(group_id)
            .bind(student_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for GroupStudents<'c> {
    type CreateRequest = GroupStudentCreateDBRequest;
    // Memberships are immutable; there is no update surface
    type UpdateRequest = GroupStudentCreateDBRequest;
    type Response = GroupStudentDBResponse;
    type Id = GroupStudentId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(group_id = request.group_id, student_id = request.student_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let row = sqlx::query_as::<_, GroupStudent>(
            r#"
            INSERT INTO group_students (group_id, student_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(request.group_id)
        .bind(request.student_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(GroupStudentDBResponse::from(row))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let row = sqlx::query_as::<_, GroupStudent>("SELECT * FROM group_students WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(row.map(GroupStudentDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let rows = sqlx::query_as::<_, GroupStudent>("SELECT * FROM group_students ORDER BY id LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(rows.into_iter().map(GroupStudentDBResponse::from).collect())
    }

    async fn update(&mut self, _id: Self::Id, _request: &Self::UpdateRequest) -> Result<Self::Response> {
        Err(DbError::Other(anyhow::anyhow!("group memberships are immutable")))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM group_students WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::handlers::{Enrollments, Groups};
    use crate::db::models::enrollments::EnrollmentCreateDBRequest;
    use crate::test_utils::{add_student_to_group, create_test_course, create_test_group, create_test_student, create_test_teacher};
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn duplicate_pair_is_a_unique_violation(pool: PgPool) {
        let course = create_test_course(&pool, "Matematika", 300_000).await;
        let teacher = create_test_teacher(&pool, "Dilshod Rahimov").await;
        let group = create_test_group(&pool, "M-1", course.id, teacher.id).await;
        let student = create_test_student(&pool, "Malika Yusupova").await;

        add_student_to_group(&pool, group.id, student.id).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = GroupStudents::new(&mut conn);
        let result = repo
            .create(&GroupStudentCreateDBRequest {
                group_id: group.id,
                student_id: student.id,
            })
            .await;

        match result {
            Err(DbError::UniqueViolation { table, .. }) => {
                assert_eq!(table.as_deref(), Some("group_students"));
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn deleting_group_cascades_memberships(pool: PgPool) {
        let course = create_test_course(&pool, "Fizika", 250_000).await;
        let teacher = create_test_teacher(&pool, "Gulnora Tosheva").await;
        let group = create_test_group(&pool, "F-1", course.id, teacher.id).await;
        let student = create_test_student(&pool, "Javlon Ergashev").await;
        add_student_to_group(&pool, group.id, student.id).await;

        let mut conn = pool.acquire().await.unwrap();
        {
            let mut groups_repo = Groups::new(&mut conn);
            assert!(groups_repo.delete(group.id).await.unwrap());
        }

        let mut repo = GroupStudents::new(&mut conn);
        assert!(repo.list_by_student(student.id).await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn deleting_course_cascades_enrollments_but_not_memberships(pool: PgPool) {
        let billed_course = create_test_course(&pool, "Ingliz tili", 400_000).await;
        let legacy_course = create_test_course(&pool, "Rus tili", 350_000).await;
        let teacher = create_test_teacher(&pool, "Nodira Sattorova").await;
        let group = create_test_group(&pool, "I-1", billed_course.id, teacher.id).await;
        let student = create_test_student(&pool, "Sardor Qodirov").await;
        add_student_to_group(&pool, group.id, student.id).await;

        let mut conn = pool.acquire().await.unwrap();
        {
            let mut enrollments = Enrollments::new(&mut conn);
            enrollments
                .create(&EnrollmentCreateDBRequest {
                    student_id: student.id,
                    course_id: legacy_course.id,
                    status: "active".to_string(),
                })
                .await
                .expect("Failed to create enrollment");
        }

        // Deleting the legacy course removes its enrollment rows...
        {
            let mut courses = crate::db::handlers::Courses::new(&mut conn);
            assert!(courses.delete(legacy_course.id).await.unwrap());
        }

        {
            let mut enrollments = Enrollments::new(&mut conn);
            let remaining = enrollments.list_by_student(student.id).await.unwrap();
            assert!(remaining.is_empty());
        }

        // ...but group memberships are untouched
        let mut repo = GroupStudents::new(&mut conn);
        let memberships = repo.list_by_student(student.id).await.unwrap();
        assert_eq!(memberships.len(), 1);
        assert_eq!(memberships[0].group_id, group.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn delete_by_pair_removes_only_that_membership(pool: PgPool) {
        let course = create_test_course(&pool, "Kimyo", 200_000).await;
        let teacher = create_test_teacher(&pool, "Otabek Nazarov").await;
        let group_a = create_test_group(&pool, "K-1", course.id, teacher.id).await;
        let group_b = create_test_group(&pool, "K-2", course.id, teacher.id).await;
        let student = create_test_student(&pool, "Zilola Mirzaeva").await;
        add_student_to_group(&pool, group_a.id, student.id).await;
        add_student_to_group(&pool, group_b.id, student.id).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = GroupStudents::new(&mut conn);

        assert!(repo.delete_by_pair(group_a.id, student.id).await.unwrap());
        assert!(!repo.delete_by_pair(group_a.id, student.id).await.unwrap());

        let remaining = repo.list_by_student(student.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].group_id, group_b.id);
    }
}
