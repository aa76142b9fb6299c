//! Database models for teachers.

use crate::api::models::teachers::TeacherCreate;
use crate::types::TeacherId;
use chrono::{DateTime, Utc};

/// Database request for creating a teacher. Also used for the full-replace
/// update (PUT) surface.
#[derive(Debug, Clone)]
pub struct TeacherCreateDBRequest {
    pub full_name: String,
    pub specialty: String,
    pub experience: String,
    pub phone: String,
    pub image: Option<String>,
    pub tags: Option<String>,
    pub quote: Option<String>,
}

impl From<TeacherCreate> for TeacherCreateDBRequest {
    fn from(api: TeacherCreate) -> Self {
        Self {
            full_name: api.full_name,
            specialty: api.specialty,
            experience: api.experience,
            phone: api.phone,
            image: api.image,
            tags: api.tags,
            quote: api.quote,
        }
    }
}

/// Database response for a teacher
#[derive(Debug, Clone)]
pub struct TeacherDBResponse {
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
