//! API request/response models for group roster memberships.

use crate::db::models::group_students::GroupStudentDBResponse;
use crate::types::{GroupId, GroupStudentId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for adding a student to a group.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupStudentCreate {
    pub group_id: GroupId,
    pub student_id: StudentId,
}

/// A single roster membership row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupStudentResponse {
    pub id: GroupStudentId,
    pub group_id: GroupId,
    pub student_id: StudentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupStudentDBResponse> for GroupStudentResponse {
    fn from(db: GroupStudentDBResponse) -> Self {
        Self {
            id: db.id,
            group_id: db.group_id,
            student_id: db.student_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
