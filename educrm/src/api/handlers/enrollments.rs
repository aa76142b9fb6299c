//! Handlers for the legacy enrollment resource.

use crate::api::models::enrollments::{EnrollmentCreate, EnrollmentResponse};
use crate::db::handlers::{Enrollments, PageFilter, Repository};
use crate::db::models::enrollments::EnrollmentCreateDBRequest;
use crate::errors::{Error, Result};
use crate::{
    AppState,
    types::{EnrollmentId, StudentId},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing enrollments
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListEnrollmentsQuery {
    pub student_id: Option<StudentId>,
}

#[utoipa::path(
    get,
    path = "/enrollments",
    tag = "enrollments",
    summary = "List enrollments",
    params(ListEnrollmentsQuery),
    responses(
        (status = 200, description = "List of enrollments", body = Vec<EnrollmentResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    Query(query): Query<ListEnrollmentsQuery>,
) -> Result<Json<Vec<EnrollmentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Enrollments::new(&mut conn);

    let rows = match query.student_id {
        Some(student_id) => repo.list_by_student(student_id).await?,
        None => repo.list(&PageFilter::default()).await?,
    };
    Ok(Json(rows.into_iter().map(EnrollmentResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/enrollments",
    tag = "enrollments",
    summary = "Create enrollment",
    request_body = EnrollmentCreate,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 400, description = "Duplicate enrollment or unknown student/course"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    Json(create): Json<EnrollmentCreate>,
) -> Result<(StatusCode, Json<EnrollmentResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Enrollments::new(&mut conn);

    let row = repo.create(&EnrollmentCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(EnrollmentResponse::from(row))))
}

#[utoipa::path(
    get,
    path = "/enrollments/{id}",
    tag = "enrollments",
    summary = "Get enrollment",
    params(("id" = i32, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment details", body = EnrollmentResponse),
        (status = 404, description = "Enrollment not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_enrollment(State(state): State<AppState>, Path(id): Path<EnrollmentId>) -> Result<Json<EnrollmentResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Enrollments::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(row) => Ok(Json(EnrollmentResponse::from(row))),
        None => Err(Error::NotFound {
            resource: "Enrollment".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    delete,
    path = "/enrollments/{id}",
    tag = "enrollments",
    summary = "Delete enrollment",
    params(("id" = i32, Path, description = "Enrollment ID")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 404, description = "Enrollment not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_enrollment(State(state): State<AppState>, Path(id): Path<EnrollmentId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Enrollments::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Enrollment".to_string(),
            id: id.to_string(),
        })
    }
}
