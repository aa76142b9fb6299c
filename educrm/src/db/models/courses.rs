//! Database models for courses.

use crate::api::models::courses::CourseCreate;
use crate::types::CourseId;
use chrono::{DateTime, Utc};

/// Database request for creating a course. Also used for the full-replace
/// update (PUT) surface.
#[derive(Debug, Clone)]
pub struct CourseCreateDBRequest {
    pub name: String,
    pub price: i32,
    pub duration: String,
    pub audience: String,
    pub description: Option<String>,
}

impl From<CourseCreate> for CourseCreateDBRequest {
    fn from(api: CourseCreate) -> Self {
        Self {
            name: api.name,
            price: api.price,
            duration: api.duration,
            audience: api.audience,
            description: api.description,
        }
    }
}

/// Database response for a course
#[derive(Debug, Clone)]
pub struct CourseDBResponse {
    pub id: CourseId,
    pub name: String,
    pub price: i32,
    pub duration: String,
    pub audience: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
