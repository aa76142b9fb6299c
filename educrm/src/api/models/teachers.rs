//! API request/response models for teachers.

use crate::db::models::teachers::TeacherDBResponse;
use crate::types::TeacherId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a teacher. Also the PUT body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeacherCreate {
    pub full_name: String,
    pub specialty: String,
    pub experience: String,
    pub phone: String,
    pub image: Option<String>,
    /// Comma-separated display tags
    pub tags: Option<String>,
    pub quote: Option<String>,
}

/// Full teacher details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeacherResponse {
    pub id: TeacherId,
    pub full_name: String,
    pub specialty: String,
    pub experience: String,
    pub phone: String,
    pub image: Option<String>,
    pub tags: Option<String>,
    pub quote: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeacherDBResponse> for TeacherResponse {
    fn from(db: TeacherDBResponse) -> Self {
        Self {
            id: db.id,
            full_name: db.full_name,
            specialty: db.specialty,
            experience: db.experience,
            phone: db.phone,
            image: db.image,
            tags: db.tags,
            quote: db.quote,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
