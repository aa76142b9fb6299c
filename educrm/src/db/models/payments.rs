//! Database models for payment ledger entries and the derived read models.

use crate::api::models::payments::{PaymentCreate, PaymentUpdate};
use crate::types::{CourseId, GroupStudentId, PaymentId, StudentId};
use chrono::{DateTime, Utc};

/// Allowed payment status values.
pub const PAYMENT_STATUSES: [&str; 2] = ["pending", "paid"];

/// Database request for creating a payment
#[derive(Debug, Clone)]
pub struct PaymentCreateDBRequest {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub amount: i32,
    pub month: String,
    pub status: String,
}

impl From<PaymentCreate> for PaymentCreateDBRequest {
    fn from(api: PaymentCreate) -> Self {
        Self {
            student_id: api.student_id,
            course_id: api.course_id,
            amount: api.amount,
            month: api.month,
            status: api.status,
        }
    }
}

/// Database request for a partial payment update (PATCH)
#[derive(Debug, Clone, Default)]
pub struct PaymentUpdateDBRequest {
    pub amount: Option<i32>,
    pub month: Option<String>,
    pub status: Option<String>,
}

impl From<PaymentUpdate> for PaymentUpdateDBRequest {
    fn from(api: PaymentUpdate) -> Self {
        Self {
            amount: api.amount,
            month: api.month,
            status: api.status,
        }
    }
}

/// Database response for a single payment row
#[derive(Debug, Clone)]
pub struct PaymentDBResponse {
    pub id: PaymentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub amount: i32,
    pub month: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One course a student belongs to (via group membership), with its payment
/// history attached. Derived read model, never stored.
#[derive(Debug, Clone)]
pub struct CourseLedgerDBResponse {
    pub course_id: CourseId,
    pub course_name: String,
    pub course_price: i32,
    pub membership_id: GroupStudentId,
    pub payments: Vec<PaymentDBResponse>,
}

/// Per-course settlement state for one month. Derived read model.
///
/// Sums are `i64`: amounts are `i32` but a month can hold arbitrarily many
/// ledger entries.
#[derive(Debug, Clone)]
pub struct MonthlySummaryDBResponse {
    pub course_id: CourseId,
    pub course_name: String,
    pub course_price: i32,
    pub total_paid: i64,
    pub remaining: i64,
    pub is_complete: bool,
    pub payments: Vec<PaymentDBResponse>,
}
