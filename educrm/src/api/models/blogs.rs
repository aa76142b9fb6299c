//! API request/response models for blog posts.

use crate::db::models::blogs::BlogDBResponse;
use crate::types::BlogId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_status() -> String {
    "draft".to_string()
}

/// Request body for creating a blog post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogCreate {
    pub title: String,
    pub image: Option<String>,
    pub youtube_link: Option<String>,
    pub short_text: String,
    pub content: String,
    /// "draft" or "published"
    #[serde(default = "default_status")]
    pub status: String,
}

/// Request body for updating a blog post. All fields are optional; only
/// provided fields will be updated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub image: Option<String>,
    pub youtube_link: Option<String>,
    pub short_text: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
}

/// Full blog post details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogResponse {
    pub id: BlogId,
    pub title: String,
    pub image: Option<String>,
    pub youtube_link: Option<String>,
    pub short_text: String,
    pub content: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogDBResponse> for BlogResponse {
    fn from(db: BlogDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            image: db.image,
            youtube_link: db.youtube_link,
            short_text: db.short_text,
            content: db.content,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
