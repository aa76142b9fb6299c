use crate::api::models::Pagination;
use crate::api::models::vacancies::{VacancyCreate, VacancyResponse, VacancyUpdate};
use crate::db::handlers::{Repository, Vacancies};
use crate::db::models::vacancies::{VacancyCreateDBRequest, VacancyUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::{AppState, types::VacancyId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/vacancies",
    tag = "vacancies",
    summary = "List vacancies",
    params(Pagination),
    responses(
        (status = 200, description = "List of vacancies", body = Vec<VacancyResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_vacancies(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<VacancyResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Vacancies::new(&mut conn);

    let vacancies = repo.list(&page.to_filter()).await?;
    Ok(Json(vacancies.into_iter().map(VacancyResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/vacancies",
    tag = "vacancies",
    summary = "Create vacancy",
    request_body = VacancyCreate,
    responses(
        (status = 201, description = "Vacancy created successfully", body = VacancyResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_vacancy(
    State(state): State<AppState>,
    Json(create): Json<VacancyCreate>,
) -> Result<(StatusCode, Json<VacancyResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Vacancies::new(&mut conn);

    let vacancy = repo.create(&VacancyCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(vacancy))))
}

#[utoipa::path(
    get,
    path = "/vacancies/{id}",
    tag = "vacancies",
    summary = "Get vacancy",
    params(("id" = i32, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Vacancy details", body = VacancyResponse),
        (status = 404, description = "Vacancy not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_vacancy(State(state): State<AppState>, Path(id): Path<VacancyId>) -> Result<Json<VacancyResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Vacancies::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(vacancy) => Ok(Json(VacancyResponse::from(vacancy))),
        None => Err(Error::NotFound {
            resource: "Vacancy".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/vacancies/{id}",
    tag = "vacancies",
    summary = "Update vacancy",
    request_body = VacancyUpdate,
    params(("id" = i32, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Vacancy updated successfully", body = VacancyResponse),
        (status = 404, description = "Vacancy not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Path(id): Path<VacancyId>,
    Json(update): Json<VacancyUpdate>,
) -> Result<Json<VacancyResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Vacancies::new(&mut conn);

    let vacancy = repo.update(id, &VacancyUpdateDBRequest::from(update)).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    delete,
    path = "/vacancies/{id}",
    tag = "vacancies",
    summary = "Delete vacancy",
    params(("id" = i32, Path, description = "Vacancy ID")),
    responses(
        (status = 204, description = "Vacancy deleted successfully"),
        (status = 404, description = "Vacancy not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_vacancy(State(state): State<AppState>, Path(id): Path<VacancyId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Vacancies::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Vacancy".to_string(),
            id: id.to_string(),
        })
    }
}
