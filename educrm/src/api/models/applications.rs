//! API request/response models for course-interest applications.

use crate::db::models::applications::ApplicationDBResponse;
use crate::types::{ApplicationId, CourseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for a public application submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationCreate {
    pub full_name: String,
    #[schema(example = "+998901234567")]
    pub phone: String,
    pub school: Option<String>,
    pub grade: Option<String>,
    pub address: Option<String>,
    /// Course the applicant is interested in
    pub course_id: Option<CourseId>,
}

/// Request body for updating an application. All fields are optional; only
/// provided fields will be updated. Setting `status` to "active" via PATCH
/// provisions a student record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub grade: Option<String>,
    pub address: Option<String>,
    pub course_id: Option<CourseId>,
    /// One of "pending", "active", "rejected"
    pub status: Option<String>,
}

/// Request body for the dedicated status-transition endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationStatusUpdate {
    /// One of "pending", "active", "rejected"
    #[schema(example = "active")]
    pub status: String,
}

/// Full application details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: ApplicationId,
    pub full_name: String,
    pub phone: String,
    pub school: Option<String>,
    pub grade: Option<String>,
    pub address: Option<String>,
    pub course_id: Option<CourseId>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationDBResponse> for ApplicationResponse {
    fn from(db: ApplicationDBResponse) -> Self {
        Self {
            id: db.id,
            full_name: db.full_name,
            phone: db.phone,
            school: db.school,
            grade: db.grade,
            address: db.address,
            course_id: db.course_id,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
