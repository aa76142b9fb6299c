//! API request/response models for courses.

use crate::db::models::courses::CourseDBResponse;
use crate::types::CourseId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a course. Also the PUT body: courses are
/// replaced wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseCreate {
    /// Display name for the course
    #[schema(example = "English B2")]
    pub name: String,
    /// Monthly price in whole currency units
    #[schema(example = 450000)]
    pub price: i32,
    /// Human-readable duration (e.g. "6 oy")
    pub duration: String,
    /// Target audience description
    pub audience: String,
    pub description: Option<String>,
}

/// Full course details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: CourseId,
    pub name: String,
    pub price: i32,
    pub duration: String,
    pub audience: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseDBResponse> for CourseResponse {
    fn from(db: CourseDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            price: db.price,
            duration: db.duration,
            audience: db.audience,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
