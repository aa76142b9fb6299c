use crate::api::models::Pagination;
use crate::api::models::courses::{CourseCreate, CourseResponse};
use crate::db::handlers::{Courses, Repository};
use crate::db::models::courses::CourseCreateDBRequest;
use crate::errors::{Error, Result};
use crate::{AppState, types::CourseId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/courses",
    tag = "courses",
    summary = "List courses",
    params(Pagination),
    responses(
        (status = 200, description = "List of courses", body = Vec<CourseResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_courses(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<CourseResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    let courses = repo.list(&page.to_filter()).await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/courses",
    tag = "courses",
    summary = "Create course",
    request_body = CourseCreate,
    responses(
        (status = 201, description = "Course created successfully", body = CourseResponse),
        (status = 400, description = "Invalid request"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_course(State(state): State<AppState>, Json(create): Json<CourseCreate>) -> Result<(StatusCode, Json<CourseResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    let course = repo.create(&CourseCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "courses",
    summary = "Get course",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseResponse),
        (status = 404, description = "Course not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_course(State(state): State<AppState>, Path(id): Path<CourseId>) -> Result<Json<CourseResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(course) => Ok(Json(CourseResponse::from(course))),
        None => Err(Error::NotFound {
            resource: "Course".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/courses/{id}",
    tag = "courses",
    summary = "Replace course",
    request_body = CourseCreate,
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course updated successfully", body = CourseResponse),
        (status = 404, description = "Course not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
    Json(update): Json<CourseCreate>,
) -> Result<Json<CourseResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    let course = repo.update(id, &CourseCreateDBRequest::from(update)).await?;
    Ok(Json(CourseResponse::from(course)))
}

#[utoipa::path(
    delete,
    path = "/courses/{id}",
    tag = "courses",
    summary = "Delete course",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted successfully"),
        (status = 400, description = "Course is still referenced"),
        (status = 404, description = "Course not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_course(State(state): State<AppState>, Path(id): Path<CourseId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Course".to_string(),
            id: id.to_string(),
        })
    }
}
