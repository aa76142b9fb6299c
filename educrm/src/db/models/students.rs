//! Database models for students.

use crate::api::models::students::StudentCreate;
use crate::types::StudentId;
use chrono::{DateTime, Utc};

/// Database request for creating a student. Also used for the full-replace
/// update (PUT) surface.
#[derive(Debug, Clone)]
pub struct StudentCreateDBRequest {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub school: String,
    pub grade: String,
    pub address: Option<String>,
}

impl From<StudentCreate> for StudentCreateDBRequest {
    fn from(api: StudentCreate) -> Self {
        Self {
            full_name: api.full_name,
            phone: api.phone,
            email: api.email,
            school: api.school,
            grade: api.grade,
            address: api.address,
        }
    }
}

/// Database response for a student
#[derive(Debug, Clone)]
pub struct StudentDBResponse {
    pub id: StudentId,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub school: String,
    pub grade: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
