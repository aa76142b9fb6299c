//! Database models for the legacy enrollment link table.

use crate::api::models::enrollments::EnrollmentCreate;
use crate::types::{CourseId, EnrollmentId, StudentId};
use chrono::{DateTime, Utc};

/// Database request for creating an enrollment
#[derive(Debug, Clone)]
pub struct EnrollmentCreateDBRequest {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub status: String,
}

impl From<EnrollmentCreate> for EnrollmentCreateDBRequest {
    fn from(api: EnrollmentCreate) -> Self {
        Self {
            student_id: api.student_id,
            course_id: api.course_id,
            status: api.status,
        }
    }
}

/// Database response for an enrollment
#[derive(Debug, Clone)]
pub struct EnrollmentDBResponse {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
