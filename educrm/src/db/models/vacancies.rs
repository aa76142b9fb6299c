//! Database models for job vacancies.
//!
//! `requirements` is stored as a text column holding a JSON array; the API
//! layer owns the encode/decode.

use crate::types::VacancyId;
use chrono::{DateTime, Utc};

/// Database request for creating a vacancy
#[derive(Debug, Clone)]
pub struct VacancyCreateDBRequest {
    pub title: String,
    pub kind: String,
    pub salary: String,
    pub location: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub status: String,
}

/// Database request for a partial vacancy update (PATCH)
#[derive(Debug, Clone, Default)]
pub struct VacancyUpdateDBRequest {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub salary: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub status: Option<String>,
}

/// Database response for a vacancy
#[derive(Debug, Clone)]
pub struct VacancyDBResponse {
    pub id: VacancyId,
    pub kind: String,
    pub title: String,
    pub salary: String,
    pub location: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
