//! API request/response models for job vacancies.
//!
//! `requirements` is a JSON array on the wire but a serialized text blob in
//! the database; the conversions below own that boundary.

use crate::api::models::{decode_string_list, encode_string_list};
use crate::db::models::vacancies::{VacancyCreateDBRequest, VacancyDBResponse, VacancyUpdateDBRequest};
use crate::types::VacancyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_status() -> String {
    "active".to_string()
}

/// Request body for creating a vacancy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyCreate {
    #[schema(example = "Ingliz tili o'qituvchisi")]
    pub title: String,
    /// Employment type (e.g. "Full-time")
    #[serde(rename = "type")]
    pub kind: String,
    pub salary: String,
    pub location: String,
    pub description: Option<String>,
    /// Requirement bullet points
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

impl From<VacancyCreate> for VacancyCreateDBRequest {
    fn from(api: VacancyCreate) -> Self {
        Self {
            title: api.title,
            kind: api.kind,
            salary: api.salary,
            location: api.location,
            description: api.description,
            requirements: encode_string_list(&api.requirements),
            status: api.status,
        }
    }
}

/// Request body for updating a vacancy. All fields are optional; only
/// provided fields will be updated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyUpdate {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub salary: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub status: Option<String>,
}

impl From<VacancyUpdate> for VacancyUpdateDBRequest {
    fn from(api: VacancyUpdate) -> Self {
        Self {
            title: api.title,
            kind: api.kind,
            salary: api.salary,
            location: api.location,
            description: api.description,
            // An explicit empty list clears the stored value, so encode it
            // as "[]" rather than NULL (NULL would COALESCE to the old one)
            requirements: api
                .requirements
                .map(|r| serde_json::to_string(&r).expect("string list serializes")),
            status: api.status,
        }
    }
}

/// Full vacancy details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyResponse {
    pub id: VacancyId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub salary: String,
    pub location: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VacancyDBResponse> for VacancyResponse {
    fn from(db: VacancyDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            kind: db.kind,
            salary: db.salary,
            location: db.location,
            description: db.description,
            requirements: decode_string_list(db.requirements.as_deref()),
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
