//! Database models for blog posts.

use crate::api::models::blogs::{BlogCreate, BlogUpdate};
use crate::types::BlogId;
use chrono::{DateTime, Utc};

/// Database request for creating a blog post
#[derive(Debug, Clone)]
pub struct BlogCreateDBRequest {
    pub title: String,
    pub image: Option<String>,
    pub youtube_link: Option<String>,
    pub short_text: String,
    pub content: String,
    pub status: String,
}

impl From<BlogCreate> for BlogCreateDBRequest {
    fn from(api: BlogCreate) -> Self {
        Self {
            title: api.title,
            image: api.image,
            youtube_link: api.youtube_link,
            short_text: api.short_text,
            content: api.content,
            status: api.status,
        }
    }
}

/// Database request for a partial blog update (PATCH)
#[derive(Debug, Clone, Default)]
pub struct BlogUpdateDBRequest {
    pub title: Option<String>,
    pub image: Option<String>,
    pub youtube_link: Option<String>,
    pub short_text: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
}

impl From<BlogUpdate> for BlogUpdateDBRequest {
    fn from(api: BlogUpdate) -> Self {
        Self {
            title: api.title,
            image: api.image,
            youtube_link: api.youtube_link,
            short_text: api.short_text,
            content: api.content,
            status: api.status,
        }
    }
}

/// Database response for a blog post
#[derive(Debug, Clone)]
pub struct BlogDBResponse {
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
