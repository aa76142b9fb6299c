use crate::api::models::Pagination;
use crate::api::models::groups::{GroupCreate, GroupResponse};
use crate::db::handlers::{Groups, Repository};
use crate::db::models::groups::GroupCreateDBRequest;
use crate::errors::{Error, Result};
use crate::{AppState, types::GroupId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/groups",
    tag = "groups",
    summary = "List groups",
    params(Pagination),
    responses(
        (status = 200, description = "List of groups", body = Vec<GroupResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_groups(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<GroupResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Groups::new(&mut conn);

    let groups = repo.list(&page.to_filter()).await?;
    Ok(Json(groups.into_iter().map(GroupResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/groups",
    tag = "groups",
    summary = "Create group",
    request_body = GroupCreate,
    responses(
        (status = 201, description = "Group created successfully", body = GroupResponse),
        (status = 400, description = "Unknown course or teacher"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_group(State(state): State<AppState>, Json(create): Json<GroupCreate>) -> Result<(StatusCode, Json<GroupResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Groups::new(&mut conn);

    let group = repo.create(&GroupCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(GroupResponse::from(group))))
}

#[utoipa::path(
    get,
    path = "/groups/{id}",
    tag = "groups",
    summary = "Get group",
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group details", body = GroupResponse),
        (status = 404, description = "Group not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_group(State(state): State<AppState>, Path(id): Path<GroupId>) -> Result<Json<GroupResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Groups::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(group) => Ok(Json(GroupResponse::from(group))),
        None => Err(Error::NotFound {
            resource: "Group".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/groups/{id}",
    tag = "groups",
    summary = "Replace group",
    request_body = GroupCreate,
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group updated successfully", body = GroupResponse),
        (status = 404, description = "Group not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<GroupId>,
    Json(update): Json<GroupCreate>,
) -> Result<Json<GroupResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Groups::new(&mut conn);

    let group = repo.update(id, &GroupCreateDBRequest::from(update)).await?;
    Ok(Json(GroupResponse::from(group)))
}

#[utoipa::path(
    delete,
    path = "/groups/{id}",
    tag = "groups",
    summary = "Delete group",
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 204, description = "Group deleted successfully"),
        (status = 404, description = "Group not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_group(State(state): State<AppState>, Path(id): Path<GroupId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Groups::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Group".to_string(),
            id: id.to_string(),
        })
    }
}
