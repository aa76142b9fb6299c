//! Handlers for vacancy applications.

use crate::api::models::Pagination;
use crate::api::models::vacancy_applications::{VacancyApplicationCreate, VacancyApplicationResponse, VacancyApplicationUpdate};
use crate::db::handlers::{Repository, Vacancies, VacancyApplications};
use crate::db::models::vacancy_applications::{VacancyApplicationCreateDBRequest, VacancyApplicationUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::{AppState, types::VacancyApplicationId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/vacancy-applications",
    tag = "vacancy-applications",
    summary = "List vacancy applications",
    params(Pagination),
    responses(
        (status = 200, description = "Applications, newest first", body = Vec<VacancyApplicationResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_vacancy_applications(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<VacancyApplicationResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = VacancyApplications::new(&mut conn);

    let rows = repo.list(&page.to_filter()).await?;
    Ok(Json(rows.into_iter().map(VacancyApplicationResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/vacancy-applications",
    tag = "vacancy-applications",
    summary = "Submit vacancy application",
    request_body = VacancyApplicationCreate,
    responses(
        (status = 201, description = "Application submitted", body = VacancyApplicationResponse),
        (status = 404, description = "Vacancy not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_vacancy_application(
    State(state): State<AppState>,
    Json(create): Json<VacancyApplicationCreate>,
) -> Result<(StatusCode, Json<VacancyApplicationResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    // The referenced vacancy must exist
    {
        let mut vacancies = Vacancies::new(&mut conn);
        if vacancies.get_by_id(create.vacancy_id).await?.is_none() {
            return Err(Error::NotFound {
                resource: "Vacancy".to_string(),
                id: create.vacancy_id.to_string(),
            });
        }
    }

    let mut repo = VacancyApplications::new(&mut conn);
    let row = repo.create(&VacancyApplicationCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(VacancyApplicationResponse::from(row))))
}

#[utoipa::path(
    get,
    path = "/vacancy-applications/{id}",
    tag = "vacancy-applications",
    summary = "Get vacancy application",
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application details", body = VacancyApplicationResponse),
        (status = 404, description = "Application not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_vacancy_application(
    State(state): State<AppState>,
    Path(id): Path<VacancyApplicationId>,
) -> Result<Json<VacancyApplicationResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = VacancyApplications::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(row) => Ok(Json(VacancyApplicationResponse::from(row))),
        None => Err(Error::NotFound {
            resource: "Vacancy application".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/vacancy-applications/{id}",
    tag = "vacancy-applications",
    summary = "Update vacancy application",
    request_body = VacancyApplicationUpdate,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application updated", body = VacancyApplicationResponse),
        (status = 404, description = "Application not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_vacancy_application(
    State(state): State<AppState>,
    Path(id): Path<VacancyApplicationId>,
    Json(update): Json<VacancyApplicationUpdate>,
) -> Result<Json<VacancyApplicationResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = VacancyApplications::new(&mut conn);

    let row = repo.update(id, &VacancyApplicationUpdateDBRequest::from(update)).await?;
    Ok(Json(VacancyApplicationResponse::from(row)))
}

#[utoipa::path(
    delete,
    path = "/vacancy-applications/{id}",
    tag = "vacancy-applications",
    summary = "Delete vacancy application",
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_vacancy_application(State(state): State<AppState>, Path(id): Path<VacancyApplicationId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = VacancyApplications::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Vacancy application".to_string(),
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, unique_phone};
    use serde_json::json;
    use sqlx::PgPool;

    async fn create_test_vacancy(server: &axum_test::TestServer) -> i64 {
        let response = server
            .post("/vacancies")
            .json(&json!({
                "title": "Matematika o'qituvchisi",
                "type": "Full-time",
                "salary": "5 mln so'm",
                "location": "Shovot",
                "requirements": ["Oliy ma'lumot", "3 yil tajriba"],
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<serde_json::Value>()["id"].as_i64().unwrap()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn certificates_roundtrip_as_an_array(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let vacancy_id = create_test_vacancy(&server).await;

        let response = server
            .post("/vacancy-applications")
            .json(&json!({
                "full_name": "Nodir Safarov",
                "phone": unique_phone(),
                "education": "TDPU",
                "certificates": ["IELTS 7.5", "CELTA"],
                "vacancy_id": vacancy_id,
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["certificates"], json!(["IELTS 7.5", "CELTA"]));
        assert_eq!(body["vacancy_title"], "Matematika o'qituvchisi");
        assert_eq!(body["status"], "new");

        // The stored column is a serialized text blob, not an array
        let raw: Option<String> = sqlx::query_scalar("SELECT certificates FROM vacancy_applications WHERE id = $1")
            .bind(body["id"].as_i64().unwrap() as i32)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(raw.as_deref(), Some(r#"["IELTS 7.5","CELTA"]"#));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn submission_for_missing_vacancy_is_404(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;

        let response = server
            .post("/vacancy-applications")
            .json(&json!({
                "full_name": "Kimdir",
                "phone": unique_phone(),
                "vacancy_id": 999999,
            }))
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn requirements_roundtrip_on_vacancies(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let vacancy_id = create_test_vacancy(&server).await;

        let fetched = server.get(&format!("/vacancies/{vacancy_id}")).await;
        fetched.assert_status_ok();
        assert_eq!(
            fetched.json::<serde_json::Value>()["requirements"],
            json!(["Oliy ma'lumot", "3 yil tajriba"])
        );

        // PATCH with an explicit empty list clears the requirements
        let cleared = server
            .patch(&format!("/vacancies/{vacancy_id}"))
            .json(&json!({"requirements": []}))
            .await;
        cleared.assert_status_ok();
        assert_eq!(cleared.json::<serde_json::Value>()["requirements"], json!([]));
    }
}
