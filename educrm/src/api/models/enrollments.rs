//! API request/response models for the legacy enrollment table.

use crate::db::models::enrollments::EnrollmentDBResponse;
use crate::types::{CourseId, EnrollmentId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_status() -> String {
    "active".to_string()
}

/// Request body for creating an enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentCreate {
    pub student_id: StudentId,
    pub course_id: CourseId,
    #[serde(default = "default_status")]
    pub status: String,
}

/// A single enrollment row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EnrollmentDBResponse> for EnrollmentResponse {
    fn from(db: EnrollmentDBResponse) -> Self {
        Self {
            id: db.id,
            student_id: db.student_id,
            course_id: db.course_id,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
