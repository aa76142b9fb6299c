use crate::api::models::Pagination;
use crate::api::models::teachers::{TeacherCreate, TeacherResponse};
use crate::db::handlers::{Repository, Teachers};
use crate::db::models::teachers::TeacherCreateDBRequest;
use crate::errors::{Error, Result};
use crate::{AppState, types::TeacherId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/teachers",
    tag = "teachers",
    summary = "List teachers",
    params(Pagination),
    responses(
        (status = 200, description = "List of teachers", body = Vec<TeacherResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_teachers(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<TeacherResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Teachers::new(&mut conn);

    let teachers = repo.list(&page.to_filter()).await?;
    Ok(Json(teachers.into_iter().map(TeacherResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/teachers",
    tag = "teachers",
    summary = "Create teacher",
    request_body = TeacherCreate,
    responses(
        (status = 201, description = "Teacher created successfully", body = TeacherResponse),
        (status = 400, description = "Duplicate phone"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(create): Json<TeacherCreate>,
) -> Result<(StatusCode, Json<TeacherResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Teachers::new(&mut conn);

    let teacher = repo.create(&TeacherCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(TeacherResponse::from(teacher))))
}

#[utoipa::path(
    get,
    path = "/teachers/{id}",
    tag = "teachers",
    summary = "Get teacher",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher details", body = TeacherResponse),
        (status = 404, description = "Teacher not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_teacher(State(state): State<AppState>, Path(id): Path<TeacherId>) -> Result<Json<TeacherResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Teachers::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(teacher) => Ok(Json(TeacherResponse::from(teacher))),
        None => Err(Error::NotFound {
            resource: "Teacher".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/teachers/{id}",
    tag = "teachers",
    summary = "Replace teacher",
    request_body = TeacherCreate,
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher updated successfully", body = TeacherResponse),
        (status = 404, description = "Teacher not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<TeacherId>,
    Json(update): Json<TeacherCreate>,
) -> Result<Json<TeacherResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Teachers::new(&mut conn);

    let teacher = repo.update(id, &TeacherCreateDBRequest::from(update)).await?;
    Ok(Json(TeacherResponse::from(teacher)))
}

#[utoipa::path(
    delete,
    path = "/teachers/{id}",
    tag = "teachers",
    summary = "Delete teacher",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 204, description = "Teacher deleted successfully"),
        (status = 400, description = "Teacher still leads groups"),
        (status = 404, description = "Teacher not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_teacher(State(state): State<AppState>, Path(id): Path<TeacherId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Teachers::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Teacher".to_string(),
            id: id.to_string(),
        })
    }
}
