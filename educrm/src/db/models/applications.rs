//! Database models for inbound course-interest applications.

use crate::api::models::applications::{ApplicationCreate, ApplicationUpdate};
use crate::types::{ApplicationId, CourseId};
use chrono::{DateTime, Utc};

/// Allowed application status values.
pub const APPLICATION_STATUSES: [&str; 3] = ["pending", "active", "rejected"];

/// Database request for creating an application (public submission)
#[derive(Debug, Clone)]
pub struct ApplicationCreateDBRequest {
    pub full_name: String,
    pub phone: String,
    pub school: Option<String>,
    pub grade: Option<String>,
    pub address: Option<String>,
    pub course_id: Option<CourseId>,
}

impl From<ApplicationCreate> for ApplicationCreateDBRequest {
    fn from(api: ApplicationCreate) -> Self {
        Self {
            full_name: api.full_name,
            phone: api.phone,
            school: api.school,
            grade: api.grade,
            address: api.address,
            course_id: api.course_id,
        }
    }
}

/// Database request for a partial application update (PUT/PATCH)
#[derive(Debug, Clone, Default)]
pub struct ApplicationUpdateDBRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub grade: Option<String>,
    pub address: Option<String>,
    pub course_id: Option<CourseId>,
    pub status: Option<String>,
}

impl From<ApplicationUpdate> for ApplicationUpdateDBRequest {
    fn from(api: ApplicationUpdate) -> Self {
        Self {
            full_name: api.full_name,
            phone: api.phone,
            school: api.school,
            grade: api.grade,
            address: api.address,
            course_id: api.course_id,
            status: api.status,
        }
    }
}

/// Database response for an application
#[derive(Debug, Clone)]
pub struct ApplicationDBResponse {
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
