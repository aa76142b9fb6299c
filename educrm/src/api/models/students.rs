//! API request/response models for students.

use crate::db::models::students::StudentDBResponse;
use crate::types::StudentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a student. Also the PUT body: students are
/// replaced wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentCreate {
    pub full_name: String,
    /// Phone number; unique across all students
    #[schema(example = "+998901234567")]
    pub phone: String,
    pub email: Option<String>,
    pub school: String,
    pub grade: String,
    pub address: Option<String>,
}

/// Full student details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
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

impl From<StudentDBResponse> for StudentResponse {
    fn from(db: StudentDBResponse) -> Self {
        Self {
            id: db.id,
            full_name: db.full_name,
            phone: db.phone,
            email: db.email,
            school: db.school,
            grade: db.grade,
            address: db.address,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
