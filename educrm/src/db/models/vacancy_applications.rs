//! Database models for vacancy applications.
//!
//! `certificates` is stored as a text column holding a JSON array; the API
//! layer owns the encode/decode.

use crate::types::{VacancyApplicationId, VacancyId};
use chrono::{DateTime, Utc};

/// Database request for creating a vacancy application
#[derive(Debug, Clone)]
pub struct VacancyApplicationCreateDBRequest {
    pub full_name: String,
    pub phone: String,
    pub education: Option<String>,
    pub certificates: Option<String>,
    pub certificate_level: Option<String>,
    pub vacancy_id: VacancyId,
    pub status: String,
    pub notes: Option<String>,
}

/// Database request for a partial vacancy application update (PATCH)
#[derive(Debug, Clone, Default)]
pub struct VacancyApplicationUpdateDBRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub certificates: Option<String>,
    pub certificate_level: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Database response for a vacancy application, including the joined
/// vacancy title for list/detail views.
#[derive(Debug, Clone)]
pub struct VacancyApplicationDBResponse {
    pub id: VacancyApplicationId,
    pub full_name: String,
    pub phone: String,
    pub education: Option<String>,
    pub certificates: Option<String>,
    pub certificate_level: Option<String>,
    pub vacancy_id: VacancyId,
    pub status: String,
    pub notes: Option<String>,
    pub vacancy_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
