use crate::api::models::Pagination;
use crate::api::models::students::{StudentCreate, StudentResponse};
use crate::db::handlers::{Repository, Students};
use crate::db::models::students::StudentCreateDBRequest;
use crate::errors::{Error, Result};
use crate::{AppState, types::StudentId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    summary = "List students",
    params(Pagination),
    responses(
        (status = 200, description = "List of students", body = Vec<StudentResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_students(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<StudentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    let students = repo.list(&page.to_filter()).await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    summary = "Create student",
    request_body = StudentCreate,
    responses(
        (status = 201, description = "Student created successfully", body = StudentResponse),
        (status = 400, description = "Duplicate phone or email"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(create): Json<StudentCreate>,
) -> Result<(StatusCode, Json<StudentResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    let student = repo.create(&StudentCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    summary = "Get student",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = StudentResponse),
        (status = 404, description = "Student not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_student(State(state): State<AppState>, Path(id): Path<StudentId>) -> Result<Json<StudentResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(student) => Ok(Json(StudentResponse::from(student))),
        None => Err(Error::NotFound {
            resource: "Student".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    summary = "Replace student",
    request_body = StudentCreate,
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student updated successfully", body = StudentResponse),
        (status = 400, description = "Duplicate phone or email"),
        (status = 404, description = "Student not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    Json(update): Json<StudentCreate>,
) -> Result<Json<StudentResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    let student = repo.update(id, &StudentCreateDBRequest::from(update)).await?;
    Ok(Json(StudentResponse::from(student)))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    summary = "Delete student",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted successfully"),
        (status = 404, description = "Student not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_student(State(state): State<AppState>, Path(id): Path<StudentId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Student".to_string(),
            id: id.to_string(),
        })
    }
}
