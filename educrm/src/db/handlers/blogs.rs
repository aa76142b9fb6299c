//! Database repository for blog posts.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{PageFilter, Repository},
    models::blogs::{BlogCreateDBRequest, BlogDBResponse, BlogUpdateDBRequest},
};
use crate::types::BlogId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Blog {
    id: BlogId,
    title: String,
    image: Option<String>,
    youtube_link: Option<String>,
    short_text: String,
    content: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Blog> for BlogDBResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            image: blog.image,
            youtube_link: blog.youtube_link,
            short_text: blog.short_text,
            content: blog.content,
            status: blog.status,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

pub struct Blogs<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Blogs<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Blogs<'c> {
    type CreateRequest = BlogCreateDBRequest;
    type UpdateRequest = BlogUpdateDBRequest;
    type Response = BlogDBResponse;
    type Id = BlogId;
    type Filter = PageFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (title, image, youtube_link, short_text, content, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.title)
        .bind(&request.image)
        .bind(&request.youtube_link)
        .bind(&request.short_text)
        .bind(&request.content)
        .bind(&request.status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(BlogDBResponse::from(blog))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let blog = sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(blog.map(BlogDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let blogs = sqlx::query_as::<_, Blog>("SELECT * FROM blogs ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(blogs.into_iter().map(BlogDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Atomic update with conditional field updates
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs SET
                title = COALESCE($2, title),
                image = COALESCE($3, image),
                youtube_link = COALESCE($4, youtube_link),
                short_text = COALESCE($5, short_text),
                content = COALESCE($6, content),
                status = COALESCE($7, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.image)
        .bind(&request.youtube_link)
        .bind(&request.short_text)
        .bind(&request.content)
        .bind(&request.status)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(BlogDBResponse::from(blog))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
