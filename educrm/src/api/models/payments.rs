//! API request/response models for the payment ledger.

use crate::db::models::payments::{CourseLedgerDBResponse, MonthlySummaryDBResponse, PaymentDBResponse};
use crate::types::{CourseId, GroupStudentId, PaymentId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

fn default_status() -> String {
    "pending".to_string()
}

/// Query parameters for listing payments.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListPaymentsQuery {
    pub student_id: Option<StudentId>,
    pub course_id: Option<CourseId>,
    /// Literal "YYYY-MM" month string
    pub month: Option<String>,
}

/// Query parameters for the monthly summary endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// Literal "YYYY-MM" month string
    pub month: String,
}

/// Request body for recording a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentCreate {
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// Whole currency units
    #[schema(example = 450000)]
    pub amount: i32,
    /// Literal "YYYY-MM" month string
    #[schema(example = "2026-02")]
    pub month: String,
    /// "pending" or "paid"
    #[serde(default = "default_status")]
    pub status: String,
}

/// Request body for updating a payment. All fields are optional; only
/// provided fields will be updated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentUpdate {
    pub amount: Option<i32>,
    pub month: Option<String>,
    pub status: Option<String>,
}

/// A single ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub amount: i32,
    pub month: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentDBResponse> for PaymentResponse {
    fn from(db: PaymentDBResponse) -> Self {
        Self {
            id: db.id,
            student_id: db.student_id,
            course_id: db.course_id,
            amount: db.amount,
            month: db.month,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// One course a student is billed for, with its payment history.
///
/// `enrollment_id`/`enrollment_status` preserve the field names older
/// clients expect; the id is the roster membership row, and membership has
/// no lifecycle of its own, so the status is always "active".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentCourseWithPayments {
    pub course_id: CourseId,
    pub course_name: String,
    pub course_price: i32,
    pub enrollment_id: GroupStudentId,
    pub enrollment_status: String,
    pub payments: Vec<PaymentResponse>,
}

impl From<CourseLedgerDBResponse> for StudentCourseWithPayments {
    fn from(db: CourseLedgerDBResponse) -> Self {
        Self {
            course_id: db.course_id,
            course_name: db.course_name,
            course_price: db.course_price,
            enrollment_id: db.membership_id,
            enrollment_status: "active".to_string(),
            payments: db.payments.into_iter().map(PaymentResponse::from).collect(),
        }
    }
}

/// Per-course settlement state for one month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseMonthlySummary {
    pub course_id: CourseId,
    pub course_name: String,
    pub course_price: i32,
    pub total_paid: i64,
    pub remaining: i64,
    pub is_complete: bool,
    pub payments: Vec<PaymentResponse>,
}

impl From<MonthlySummaryDBResponse> for CourseMonthlySummary {
    fn from(db: MonthlySummaryDBResponse) -> Self {
        Self {
            course_id: db.course_id,
            course_name: db.course_name,
            course_price: db.course_price,
            total_paid: db.total_paid,
            remaining: db.remaining,
            is_complete: db.is_complete,
            payments: db.payments.into_iter().map(PaymentResponse::from).collect(),
        }
    }
}
