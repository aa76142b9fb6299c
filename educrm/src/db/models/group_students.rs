//! Database models for group membership rows.

use crate::api::models::group_students::GroupStudentCreate;
use crate::types::{GroupId, GroupStudentId, StudentId};
use chrono::{DateTime, Utc};

/// Database request for adding a student to a group
#[derive(Debug, Clone)]
pub struct GroupStudentCreateDBRequest {
    pub group_id: GroupId,
    pub student_id: StudentId,
}

impl From<GroupStudentCreate> for GroupStudentCreateDBRequest {
    fn from(api: GroupStudentCreate) -> Self {
        Self {
            group_id: api.group_id,
            student_id: api.student_id,
        }
    }
}

/// Database response for a group membership row
#[derive(Debug, Clone)]
pub struct GroupStudentDBResponse {
    pub id: GroupStudentId,
    pub group_id: GroupId,
    pub student_id: StudentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
