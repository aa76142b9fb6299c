use crate::api::models::Pagination;
use crate::api::models::blogs::{BlogCreate, BlogResponse, BlogUpdate};
use crate::db::handlers::{Blogs, Repository};
use crate::db::models::blogs::{BlogCreateDBRequest, BlogUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::{AppState, types::BlogId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/blogs",
    tag = "blogs",
    summary = "List blog posts",
    params(Pagination),
    responses(
        (status = 200, description = "Blog posts, newest first", body = Vec<BlogResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_blogs(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<BlogResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    let blogs = repo.list(&page.to_filter()).await?;
    Ok(Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/blogs",
    tag = "blogs",
    summary = "Create blog post",
    request_body = BlogCreate,
    responses(
        (status = 201, description = "Blog post created", body = BlogResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_blog(State(state): State<AppState>, Json(create): Json<BlogCreate>) -> Result<(StatusCode, Json<BlogResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    let blog = repo.create(&BlogCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(BlogResponse::from(blog))))
}

#[utoipa::path(
    get,
    path = "/blogs/{id}",
    tag = "blogs",
    summary = "Get blog post",
    params(("id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Blog post details", body = BlogResponse),
        (status = 404, description = "Blog post not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_blog(State(state): State<AppState>, Path(id): Path<BlogId>) -> Result<Json<BlogResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(blog) => Ok(Json(BlogResponse::from(blog))),
        None => Err(Error::NotFound {
            resource: "Blog".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/blogs/{id}",
    tag = "blogs",
    summary = "Update blog post",
    request_body = BlogUpdate,
    params(("id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Blog post updated", body = BlogResponse),
        (status = 404, description = "Blog post not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<BlogId>,
    Json(update): Json<BlogUpdate>,
) -> Result<Json<BlogResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    let blog = repo.update(id, &BlogUpdateDBRequest::from(update)).await?;
    Ok(Json(BlogResponse::from(blog)))
}

#[utoipa::path(
    delete,
    path = "/blogs/{id}",
    tag = "blogs",
    summary = "Delete blog post",
    params(("id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 204, description = "Blog post deleted"),
        (status = 404, description = "Blog post not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_blog(State(state): State<AppState>, Path(id): Path<BlogId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Blog".to_string(),
            id: id.to_string(),
        })
    }
}
