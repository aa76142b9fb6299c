//! Database models for teaching groups.

use crate::api::models::groups::GroupCreate;
use crate::types::{CourseId, GroupId, TeacherId};
use chrono::{DateTime, Utc};

/// Database request for creating a group. Also used for the full-replace
/// update (PUT) surface.
#[derive(Debug, Clone)]
pub struct GroupCreateDBRequest {
    pub name: String,
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
}

impl From<GroupCreate> for GroupCreateDBRequest {
    fn from(api: GroupCreate) -> Self {
        Self {
            name: api.name,
            course_id: api.course_id,
            teacher_id: api.teacher_id,
        }
    }
}

/// Database response for a group
#[derive(Debug, Clone)]
pub struct GroupDBResponse {
    pub id: GroupId,
    pub name: String,
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
