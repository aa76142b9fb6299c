//! Handlers for the payment ledger, including the two cross-entity read
//! paths: a student's billed courses with payment history, and the
//! per-month settlement summary.

use crate::api::models::payments::{
    CourseMonthlySummary, ListPaymentsQuery, PaymentCreate, PaymentResponse, PaymentUpdate, StudentCourseWithPayments, SummaryQuery,
};
use crate::db::handlers::payments::PaymentFilter;
use crate::db::handlers::{Courses, Payments, Repository, Students};
use crate::db::models::payments::{PAYMENT_STATUSES, PaymentCreateDBRequest, PaymentUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::{
    AppState,
    types::{PaymentId, StudentId},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    summary = "List payments",
    params(ListPaymentsQuery),
    responses(
        (status = 200, description = "Payments, newest first", body = Vec<PaymentResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_payments(State(state): State<AppState>, Query(query): Query<ListPaymentsQuery>) -> Result<Json<Vec<PaymentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Payments::new(&mut conn);

    let filter = PaymentFilter {
        student_id: query.student_id,
        course_id: query.course_id,
        month: query.month,
    };
    let payments = repo.list(&filter).await?;
    Ok(Json(payments.into_iter().map(PaymentResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    summary = "Record payment",
    description = "Records a ledger entry. The student must belong to a group teaching the course.",
    request_body = PaymentCreate,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Student is not billed for this course, or invalid status"),
        (status = 404, description = "Student or course not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(create): Json<PaymentCreate>,
) -> Result<(StatusCode, Json<PaymentResponse>)> {
    if !PAYMENT_STATUSES.contains(&create.status.as_str()) {
        return Err(Error::BadRequest {
            message: format!("Invalid status value: {}", create.status),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    {
        let mut students = Students::new(&mut conn);
        if students.get_by_id(create.student_id).await?.is_none() {
            return Err(Error::NotFound {
                resource: "Student".to_string(),
                id: create.student_id.to_string(),
            });
        }
    }
    {
        let mut courses = Courses::new(&mut conn);
        if courses.get_by_id(create.course_id).await?.is_none() {
            return Err(Error::NotFound {
                resource: "Course".to_string(),
                id: create.course_id.to_string(),
            });
        }
    }

    let mut repo = Payments::new(&mut conn);

    if !repo.student_billed_for_course(create.student_id, create.course_id).await? {
        return Err(Error::BadRequest {
            message: "Student is not in a group for this course".to_string(),
        });
    }

    let payment = repo.create(&PaymentCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

#[utoipa::path(
    get,
    path = "/payments/student/{student_id}/courses",
    tag = "payments",
    summary = "Student's courses with payment history",
    description = "Courses derived from group membership, deduplicated by course, with the full \
                   unfiltered payment history per course.",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Billed courses with payments", body = Vec<StudentCourseWithPayments>),
        (status = 404, description = "Student not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn student_courses_with_payments(
    State(state): State<AppState>,
    Path(student_id): Path<StudentId>,
) -> Result<Json<Vec<StudentCourseWithPayments>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    {
        let mut students = Students::new(&mut conn);
        if students.get_by_id(student_id).await?.is_none() {
            return Err(Error::NotFound {
                resource: "Student".to_string(),
                id: student_id.to_string(),
            });
        }
    }

    let mut repo = Payments::new(&mut conn);
    let courses = repo.courses_with_payments(student_id).await?;
    Ok(Json(courses.into_iter().map(StudentCourseWithPayments::from).collect()))
}

#[utoipa::path(
    get,
    path = "/payments/student/{student_id}/summary",
    tag = "payments",
    summary = "Monthly payment summary",
    description = "Per-course settlement state for one month: paid total, remaining balance \
                   against the course price, and completion flag.",
    params(
        ("student_id" = i32, Path, description = "Student ID"),
        SummaryQuery,
    ),
    responses(
        (status = 200, description = "Per-course summary", body = Vec<CourseMonthlySummary>),
        (status = 404, description = "Student not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn student_payment_summary(
    State(state): State<AppState>,
    Path(student_id): Path<StudentId>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Vec<CourseMonthlySummary>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    {
        let mut students = Students::new(&mut conn);
        if students.get_by_id(student_id).await?.is_none() {
            return Err(Error::NotFound {
                resource: "Student".to_string(),
                id: student_id.to_string(),
            });
        }
    }

    let mut repo = Payments::new(&mut conn);
    let summary = repo.monthly_summary(student_id, &query.month).await?;
    Ok(Json(summary.into_iter().map(CourseMonthlySummary::from).collect()))
}

#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "payments",
    summary = "Get payment",
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = PaymentResponse),
        (status = 404, description = "Payment not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_payment(State(state): State<AppState>, Path(id): Path<PaymentId>) -> Result<Json<PaymentResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Payments::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(payment) => Ok(Json(PaymentResponse::from(payment))),
        None => Err(Error::NotFound {
            resource: "Payment".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/payments/{id}",
    tag = "payments",
    summary = "Update payment",
    request_body = PaymentUpdate,
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment updated", body = PaymentResponse),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Payment not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
    Json(update): Json<PaymentUpdate>,
) -> Result<Json<PaymentResponse>> {
    if let Some(ref status) = update.status
        && !PAYMENT_STATUSES.contains(&status.as_str())
    {
        return Err(Error::BadRequest {
            message: format!("Invalid status value: {status}"),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Payments::new(&mut conn);

    let payment = repo.update(id, &PaymentUpdateDBRequest::from(update)).await?;
    Ok(Json(PaymentResponse::from(payment)))
}

#[utoipa::path(
    delete,
    path = "/payments/{id}",
    tag = "payments",
    summary = "Delete payment",
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 404, description = "Payment not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_payment(State(state): State<AppState>, Path(id): Path<PaymentId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Payments::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Payment".to_string(),
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{
        add_student_to_group, create_test_app, create_test_course, create_test_group, create_test_payment, create_test_student,
        create_test_teacher,
    };
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn summary_reflects_paid_and_pending_rows(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;

        let course = create_test_course(&pool, "English B2", 100).await;
        let teacher = create_test_teacher(&pool, "Shoxista Alimova").await;
        let group = create_test_group(&pool, "E-1", course.id, teacher.id).await;
        let student = create_test_student(&pool, "Summary Student").await;
        add_student_to_group(&pool, group.id, student.id).await;

        create_test_payment(&pool, student.id, course.id, 40, "2026-02", "paid").await;
        create_test_payment(&pool, student.id, course.id, 60, "2026-02", "paid").await;
        create_test_payment(&pool, student.id, course.id, 500, "2026-02", "pending").await;

        let response = server
            .get(&format!("/payments/student/{}/summary", student.id))
            .add_query_param("month", "2026-02")
            .await;
        response.assert_status_ok();

        let summary = response.json::<serde_json::Value>();
        assert_eq!(summary.as_array().unwrap().len(), 1);
        assert_eq!(summary[0]["total_paid"], 100);
        assert_eq!(summary[0]["remaining"], 0);
        assert_eq!(summary[0]["is_complete"], true);
        assert_eq!(summary[0]["payments"].as_array().unwrap().len(), 3);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn partial_month_is_incomplete(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;

        let course = create_test_course(&pool, "English A1", 100).await;
        let teacher = create_test_teacher(&pool, "Oybek Jo'rayev").await;
        let group = create_test_group(&pool, "A-1", course.id, teacher.id).await;
        let student = create_test_student(&pool, "Partial Student").await;
        add_student_to_group(&pool, group.id, student.id).await;

        create_test_payment(&pool, student.id, course.id, 30, "2026-02", "paid").await;

        let response = server
            .get(&format!("/payments/student/{}/summary", student.id))
            .add_query_param("month", "2026-02")
            .await;
        response.assert_status_ok();

        let summary = response.json::<serde_json::Value>();
        assert_eq!(summary[0]["total_paid"], 30);
        assert_eq!(summary[0]["remaining"], 70);
        assert_eq!(summary[0]["is_complete"], false);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn payment_requires_group_membership(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;

        let course = create_test_course(&pool, "Unjoined Course", 100).await;
        let student = create_test_student(&pool, "Outside Student").await;

        let response = server
            .post("/payments")
            .json(&json!({
                "student_id": student.id,
                "course_id": course.id,
                "amount": 100,
                "month": "2026-02",
                "status": "paid",
            }))
            .await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn payment_for_missing_student_is_404(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let course = create_test_course(&pool, "Some Course", 100).await;

        let response = server
            .post("/payments")
            .json(&json!({
                "student_id": 999999,
                "course_id": course.id,
                "amount": 100,
                "month": "2026-02",
            }))
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn courses_endpoint_attaches_history(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;

        let course = create_test_course(&pool, "History Course", 200).await;
        let teacher = create_test_teacher(&pool, "Tarix O'qituvchi").await;
        let group = create_test_group(&pool, "H-1", course.id, teacher.id).await;
        let student = create_test_student(&pool, "History Student").await;
        add_student_to_group(&pool, group.id, student.id).await;

        create_test_payment(&pool, student.id, course.id, 50, "2026-01", "paid").await;
        create_test_payment(&pool, student.id, course.id, 50, "2026-02", "pending").await;

        let response = server.get(&format!("/payments/student/{}/courses", student.id)).await;
        response.assert_status_ok();

        let courses = response.json::<serde_json::Value>();
        assert_eq!(courses.as_array().unwrap().len(), 1);
        assert_eq!(courses[0]["course_name"], "History Course");
        assert_eq!(courses[0]["enrollment_status"], "active");
        assert_eq!(courses[0]["payments"].as_array().unwrap().len(), 2);

        let missing = server.get("/payments/student/999999/courses").await;
        missing.assert_status_not_found();
    }
}
