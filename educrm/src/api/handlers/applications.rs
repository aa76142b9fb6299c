//! Handlers for course-interest applications, including the promotion of an
//! application into a student record.

use crate::api::models::Pagination;
use crate::api::models::applications::{ApplicationCreate, ApplicationResponse, ApplicationStatusUpdate, ApplicationUpdate};
use crate::db::handlers::{Applications, Repository};
use crate::db::models::applications::{APPLICATION_STATUSES, ApplicationCreateDBRequest, ApplicationUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::{AppState, types::ApplicationId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sqlx::Acquire;

#[utoipa::path(
    get,
    path = "/applications",
    tag = "applications",
    summary = "List applications",
    params(Pagination),
    responses(
        (status = 200, description = "Applications, newest first", body = Vec<ApplicationResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_applications(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<ApplicationResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let apps = repo.list(&page.to_filter()).await?;
    Ok(Json(apps.into_iter().map(ApplicationResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/applications",
    tag = "applications",
    summary = "Submit application",
    request_body = ApplicationCreate,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 400, description = "Unknown course"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_application(
    State(state): State<AppState>,
    Json(create): Json<ApplicationCreate>,
) -> Result<(StatusCode, Json<ApplicationResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let app = repo.create(&ApplicationCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(app))))
}

#[utoipa::path(
    get,
    path = "/applications/{id}",
    tag = "applications",
    summary = "Get application",
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application details", body = ApplicationResponse),
        (status = 404, description = "Application not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_application(State(state): State<AppState>, Path(id): Path<ApplicationId>) -> Result<Json<ApplicationResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(app) => Ok(Json(ApplicationResponse::from(app))),
        None => Err(Error::NotFound {
            resource: "Application".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/applications/{id}",
    tag = "applications",
    summary = "Update application fields",
    request_body = ApplicationUpdate,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 404, description = "Application not found"),
    ),
    params(("id" = i32, Path, description = "Application ID"))
)]
#[tracing::instrument(skip_all)]
pub async fn put_application(
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
    Json(update): Json<ApplicationUpdate>,
) -> Result<Json<ApplicationResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    // Plain field update; status transitions through PUT never provision a
    // student. Use PATCH or the /status endpoint for promotions.
    let app = repo.update(id, &ApplicationUpdateDBRequest::from(update)).await?;
    Ok(Json(ApplicationResponse::from(app)))
}

/// Apply an update and, when the status transitions into "active",
/// provision a student. One transaction covers the status write and the
/// student upsert so a promotion can never half-land.
async fn update_and_promote(state: &AppState, id: ApplicationId, request: ApplicationUpdateDBRequest) -> Result<ApplicationResponse> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let response;
    {
        let conn = tx.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let mut repo = Applications::new(conn);

        let previous = repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
            resource: "Application".to_string(),
            id: id.to_string(),
        })?;

        let updated = repo.update(id, &request).await?;

        if updated.status == "active" && previous.status != "active" {
            repo.promote_to_student(&updated).await?;
        }

        response = ApplicationResponse::from(updated);
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    Ok(response)
}

#[utoipa::path(
    patch,
    path = "/applications/{id}",
    tag = "applications",
    summary = "Update application",
    description = "Partial update. A status transition into \"active\" provisions a student \
                   record keyed by phone number (existing students are never modified).",
    request_body = ApplicationUpdate,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Application not found"),
    ),
    params(("id" = i32, Path, description = "Application ID"))
)]
#[tracing::instrument(skip_all)]
pub async fn patch_application(
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
    Json(update): Json<ApplicationUpdate>,
) -> Result<Json<ApplicationResponse>> {
    let app = update_and_promote(&state, id, ApplicationUpdateDBRequest::from(update)).await?;
    Ok(Json(app))
}

#[utoipa::path(
    patch,
    path = "/applications/{id}/status",
    tag = "applications",
    summary = "Transition application status",
    request_body = ApplicationStatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = ApplicationResponse),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Application not found"),
    ),
    params(("id" = i32, Path, description = "Application ID"))
)]
#[tracing::instrument(skip_all)]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
    Json(update): Json<ApplicationStatusUpdate>,
) -> Result<Json<ApplicationResponse>> {
    if !APPLICATION_STATUSES.contains(&update.status.as_str()) {
        return Err(Error::BadRequest {
            message: format!("Invalid status value: {}", update.status),
        });
    }

    let request = ApplicationUpdateDBRequest {
        status: Some(update.status),
        ..Default::default()
    };
    let app = update_and_promote(&state, id, request).await?;
    Ok(Json(app))
}

#[utoipa::path(
    delete,
    path = "/applications/{id}",
    tag = "applications",
    summary = "Delete application",
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_application(State(state): State<AppState>, Path(id): Path<ApplicationId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Application".to_string(),
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, create_test_application, unique_phone};
    use serde_json::json;
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
    async fn activating_an_application_provisions_a_student(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let phone = unique_phone();
        let app = create_test_application(&pool, "Nilufar Azimova", &phone).await;

        let response = server
            .patch(&format!("/applications/{}", app.id))
            .json(&json!({"status": "active"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>()["status"], "active");

        assert_eq!(count_students_with_phone(&pool, &phone).await, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn re_activating_does_not_duplicate_the_student(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let phone = unique_phone();
        let app = create_test_application(&pool, "Husniddin Olimov", &phone).await;

        for _ in 0..2 {
            let response = server
                .patch(&format!("/applications/{}/status", app.id))
                .json(&json!({"status": "active"}))
                .await;
            response.assert_status_ok();
        }

        assert_eq!(count_students_with_phone(&pool, &phone).await, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn two_applications_one_phone_one_student(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let phone = unique_phone();
        let first = create_test_application(&pool, "Birinchi Ariza", &phone).await;
        let second = create_test_application(&pool, "Ikkinchi Ariza", &phone).await;

        for id in [first.id, second.id] {
            let response = server
                .patch(&format!("/applications/{id}/status"))
                .json(&json!({"status": "active"}))
                .await;
            response.assert_status_ok();
        }

        assert_eq!(count_students_with_phone(&pool, &phone).await, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn rejecting_does_not_provision(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let phone = unique_phone();
        let app = create_test_application(&pool, "Rad Etilgan", &phone).await;

        let response = server
            .patch(&format!("/applications/{}/status", app.id))
            .json(&json!({"status": "rejected"}))
            .await;
        response.assert_status_ok();

        assert_eq!(count_students_with_phone(&pool, &phone).await, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn invalid_status_is_rejected(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let app = create_test_application(&pool, "Test Person", &unique_phone()).await;

        let response = server
            .patch(&format!("/applications/{}/status", app.id))
            .json(&json!({"status": "archived"}))
            .await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn submission_returns_201_and_listing_is_public(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;

        let response = server
            .post("/applications")
            .json(&json!({
                "full_name": "Yangi Arizachi",
                "phone": unique_phone(),
                "school": "12-maktab",
                "grade": "10",
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        assert_eq!(response.json::<serde_json::Value>()["status"], "pending");

        let missing = server.get("/applications/999999").await;
        missing.assert_status_not_found();
    }
}
