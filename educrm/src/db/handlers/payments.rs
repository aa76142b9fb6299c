//! Database repository for the payment ledger.
//!
//! The canonical "which courses is this student billed for" relationship is
//! `group_students → groups → courses`; both ledger read paths below walk
//! it. Settlement is computed on read: a month is complete when the paid sum
//! reaches the course price.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::payments::{
        CourseLedgerDBResponse, MonthlySummaryDBResponse, PaymentCreateDBRequest, PaymentDBResponse, PaymentUpdateDBRequest,
    },
};
use crate::types::{CourseId, PaymentId, StudentId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

/// Filter for listing payments
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub student_id: Option<StudentId>,
    pub course_id: Option<CourseId>,
    pub month: Option<String>,
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Payment {
    id: PaymentId,
    student_id: StudentId,
    course_id: CourseId,
    amount: i32,
    month: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDBResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            student_id: payment.student_id,
            course_id: payment.course_id,
            amount: payment.amount,
            month: payment.month,
            status: payment.status,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

// One billed course derived from group membership
#[derive(Debug, Clone, FromRow)]
struct BilledCourse {
    course_id: CourseId,
    course_name: String,
    course_price: i32,
    membership_id: i32,
}

// Deduplicates by course: a student in two groups of the same course is
// billed for it once.
const BILLED_COURSES_SQL: &str = r#"
    SELECT DISTINCT ON (c.id)
           c.id AS course_id, c.name AS course_name, c.price AS course_price,
           gs.id AS membership_id
    FROM group_students gs
    JOIN groups g ON g.id = gs.group_id
    JOIN courses c ON c.id = g.course_id
    WHERE gs.student_id = $1
    ORDER BY c.id, gs.id
"#;

pub struct Payments<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Payments<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Is the student a member of any group teaching this course?
    ///
    /// Payment creation refuses ledger entries for courses the student is
    /// not billed for.
    #[instrument(skip(self), err)]
    pub async fn student_billed_for_course(&mut self, student_id: StudentId, course_id: CourseId) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM group_students gs
                JOIN groups g ON g.id = gs.group_id
                WHERE gs.student_id = $1 AND g.course_id = $2
            )
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(exists.0)
    }

    /// The student's billed courses with their full payment history
    /// (newest first) attached.
    #[instrument(skip(self), err)]
    pub async fn courses_with_payments(&mut self, student_id: StudentId) -> Result<Vec<CourseLedgerDBResponse>> {
        let courses = sqlx::query_as::<_, BilledCourse>(BILLED_COURSES_SQL)
            .bind(student_id)
            .fetch_all(&mut *self.db)
            .await?;

        let payments = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE student_id = $1 ORDER BY created_at DESC, id DESC")
            .bind(student_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(courses
            .into_iter()
            .map(|course| {
                let history = payments
                    .iter()
                    .filter(|p| p.course_id == course.course_id)
                    .cloned()
                    .map(PaymentDBResponse::from)
                    .collect();
                CourseLedgerDBResponse {
                    course_id: course.course_id,
                    course_name: course.course_name,
                    course_price: course.course_price,
                    membership_id: course.membership_id,
                    payments: history,
                }
            })
            .collect())
    }

    /// Per-course settlement state for one month.
    ///
    /// Only `paid` rows count toward the total; the attached payment list
    /// includes pending rows so the admin UI can show what is outstanding.
    #[instrument(skip(self), fields(month = %month), err)]
    pub async fn monthly_summary(&mut self, student_id: StudentId, month: &str) -> Result<Vec<MonthlySummaryDBResponse>> {
        let courses = sqlx::query_as::<_, BilledCourse>(BILLED_COURSES_SQL)
            .bind(student_id)
            .fetch_all(&mut *self.db)
            .await?;

        let payments = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE student_id = $1 AND month = $2 ORDER BY created_at DESC, id DESC")
            .bind(student_id)
            .bind(month)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(courses
            .into_iter()
            .map(|course| {
                let month_rows: Vec<PaymentDBResponse> = payments
                    .iter()
                    .filter(|p| p.course_id == course.course_id)
                    .cloned()
                    .map(PaymentDBResponse::from)
                    .collect();

                let total_paid: i64 = month_rows
                    .iter()
                    .filter(|p| p.status == "paid")
                    .map(|p| i64::from(p.amount))
                    .sum();

                let price = i64::from(course.course_price);
                MonthlySummaryDBResponse {
                    course_id: course.course_id,
                    course_name: course.course_name,
                    course_price: course.course_price,
                    total_paid,
                    remaining: (price - total_paid).max(0),
                    is_complete: total_paid >= price,
                    payments: month_rows,
                }
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Payments<'c> {
    type CreateRequest = PaymentCreateDBRequest;
    type UpdateRequest = PaymentUpdateDBRequest;
    type Response = PaymentDBResponse;
    type Id = PaymentId;
    type Filter = PaymentFilter;

    #[instrument(skip(self, request), fields(student_id = request.student_id, course_id = request.course_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (student_id, course_id, amount, month, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(request.student_id)
        .bind(request.course_id)
        .bind(request.amount)
        .bind(&request.month)
        .bind(&request.status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(PaymentDBResponse::from(payment))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(payment.map(PaymentDBResponse::from))
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        use sqlx::QueryBuilder;

        let mut query = QueryBuilder::new("SELECT * FROM payments WHERE 1=1");

        if let Some(student_id) = filter.student_id {
            query.push(" AND student_id = ");
            query.push_bind(student_id);
        }
        if let Some(course_id) = filter.course_id {
            query.push(" AND course_id = ");
            query.push_bind(course_id);
        }
        if let Some(ref month) = filter.month {
            query.push(" AND month = ");
            query.push_bind(month.clone());
        }

        query.push(" ORDER BY created_at DESC, id DESC");

        let payments = query.build_query_as::<Payment>().fetch_all(&mut *self.db).await?;

        Ok(payments.into_iter().map(PaymentDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Atomic update with conditional field updates
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments SET
                amount = COALESCE($2, amount),
                month = COALESCE($3, month),
                status = COALESCE($4, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.amount)
        .bind(&request.month)
        .bind(&request.status)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(PaymentDBResponse::from(payment))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        add_student_to_group, create_test_course, create_test_group, create_test_payment, create_test_student, create_test_teacher,
    };
    use sqlx::PgPool;

    /// One student in one group of one course, ready for ledger entries
    async fn billed_student(pool: &PgPool, price: i32) -> (StudentId, CourseId) {
        let course = create_test_course(pool, "Ingliz tili", price).await;
        let teacher = create_test_teacher(pool, "Yulduz Raximova").await;
        let group = create_test_group(pool, "IT-1", course.id, teacher.id).await;
        let student = create_test_student(pool, "Ledger Student").await;
        add_student_to_group(pool, group.id, student.id).await;
        (student.id, course.id)
    }

    #[sqlx::test]
    #[test_log::test]
    async fn two_paid_payments_complete_the_month(pool: PgPool) {
        let (student_id, course_id) = billed_student(&pool, 100).await;
        create_test_payment(&pool, student_id, course_id, 40, "2026-02", "paid").await;
        create_test_payment(&pool, student_id, course_id, 60, "2026-02", "paid").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Payments::new(&mut conn);
        let summary = repo.monthly_summary(student_id, "2026-02").await.unwrap();

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total_paid, 100);
        assert_eq!(summary[0].remaining, 0);
        assert!(summary[0].is_complete);
        assert_eq!(summary[0].payments.len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn partial_payment_leaves_a_remainder(pool: PgPool) {
        let (student_id, course_id) = billed_student(&pool, 100).await;
        create_test_payment(&pool, student_id, course_id, 30, "2026-02", "paid").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Payments::new(&mut conn);
        let summary = repo.monthly_summary(student_id, "2026-02").await.unwrap();

        assert_eq!(summary[0].total_paid, 30);
        assert_eq!(summary[0].remaining, 70);
        assert!(!summary[0].is_complete);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn pending_payments_do_not_count(pool: PgPool) {
        let (student_id, course_id) = billed_student(&pool, 100).await;
        create_test_payment(&pool, student_id, course_id, 100, "2026-02", "pending").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Payments::new(&mut conn);
        let summary = repo.monthly_summary(student_id, "2026-02").await.unwrap();

        assert_eq!(summary[0].total_paid, 0);
        assert_eq!(summary[0].remaining, 100);
        assert!(!summary[0].is_complete);
        // The pending row is still visible in the month's history
        assert_eq!(summary[0].payments.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn other_months_are_excluded(pool: PgPool) {
        let (student_id, course_id) = billed_student(&pool, 100).await;
        create_test_payment(&pool, student_id, course_id, 100, "2026-01", "paid").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Payments::new(&mut conn);
        let summary = repo.monthly_summary(student_id, "2026-02").await.unwrap();

        assert_eq!(summary[0].total_paid, 0);
        assert!(summary[0].payments.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn overpayment_clamps_remaining_to_zero(pool: PgPool) {
        let (student_id, course_id) = billed_student(&pool, 100).await;
        create_test_payment(&pool, student_id, course_id, 150, "2026-02", "paid").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Payments::new(&mut conn);
        let summary = repo.monthly_summary(student_id, "2026-02").await.unwrap();

        assert_eq!(summary[0].total_paid, 150);
        assert_eq!(summary[0].remaining, 0);
        assert!(summary[0].is_complete);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn courses_are_deduplicated_across_groups(pool: PgPool) {
        let course = create_test_course(&pool, "Arab tili", 200).await;
        let teacher = create_test_teacher(&pool, "Muslima Karimova").await;
        let group_a = create_test_group(&pool, "A-1", course.id, teacher.id).await;
        let group_b = create_test_group(&pool, "A-2", course.id, teacher.id).await;
        let student = create_test_student(&pool, "Double Grouped").await;
        add_student_to_group(&pool, group_a.id, student.id).await;
        add_student_to_group(&pool, group_b.id, student.id).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Payments::new(&mut conn);

        let courses = repo.courses_with_payments(student.id).await.unwrap();
        assert_eq!(courses.len(), 1, "same course via two groups should appear once");
        assert_eq!(courses[0].course_id, course.id);

        let summary = repo.monthly_summary(student.id, "2026-02").await.unwrap();
        assert_eq!(summary.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn membership_gate_for_payment_creation(pool: PgPool) {
        let (student_id, course_id) = billed_student(&pool, 100).await;
        let other_course = create_test_course(&pool, "Boshqa kurs", 100).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Payments::new(&mut conn);

        assert!(repo.student_billed_for_course(student_id, course_id).await.unwrap());
        assert!(!repo.student_billed_for_course(student_id, other_course.id).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn list_filters_compose(pool: PgPool) {
        let (student_id, course_id) = billed_student(&pool, 100).await;
        create_test_payment(&pool, student_id, course_id, 10, "2026-01", "paid").await;
        create_test_payment(&pool, student_id, course_id, 20, "2026-02", "paid").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Payments::new(&mut conn);

        let all = repo
            .list(&PaymentFilter {
                student_id: Some(student_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let february = repo
            .list(&PaymentFilter {
                student_id: Some(student_id),
                month: Some("2026-02".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(february.len(), 1);
        assert_eq!(february[0].amount, 20);
    }
}
