//! API request/response models for teaching groups.

use crate::db::models::groups::GroupDBResponse;
use crate::types::{CourseId, GroupId, TeacherId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a group. Also the PUT body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupCreate {
    #[schema(example = "English B2 - ertalab")]
    pub name: String,
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
}

/// Full group details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupResponse {
    pub id: GroupId,
    pub name: String,
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupDBResponse> for GroupResponse {
    fn from(db: GroupDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            course_id: db.course_id,
            teacher_id: db.teacher_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
