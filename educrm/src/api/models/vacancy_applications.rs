//! API request/response models for vacancy applications.
//!
//! `certificates` is a JSON array on the wire but a serialized text blob in
//! the database, mirroring the vacancy `requirements` field.

use crate::api::models::{decode_string_list, encode_string_list};
use crate::db::models::vacancy_applications::{
    VacancyApplicationCreateDBRequest, VacancyApplicationDBResponse, VacancyApplicationUpdateDBRequest,
};
use crate::types::{VacancyApplicationId, VacancyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_status() -> String {
    "new".to_string()
}

/// Request body for submitting a vacancy application (public form).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyApplicationCreate {
    pub full_name: String,
    pub phone: String,
    pub education: Option<String>,
    /// Certificate names held by the applicant
    #[serde(default)]
    pub certificates: Vec<String>,
    pub certificate_level: Option<String>,
    pub vacancy_id: VacancyId,
    #[serde(default = "default_status")]
    pub status: String,
    pub notes: Option<String>,
}

impl From<VacancyApplicationCreate> for VacancyApplicationCreateDBRequest {
    fn from(api: VacancyApplicationCreate) -> Self {
        Self {
            full_name: api.full_name,
            phone: api.phone,
            education: api.education,
            certificates: encode_string_list(&api.certificates),
            certificate_level: api.certificate_level,
            vacancy_id: api.vacancy_id,
            status: api.status,
            notes: api.notes,
        }
    }
}

/// Request body for updating a vacancy application (staff triage). All
/// fields are optional; only provided fields will be updated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyApplicationUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub certificates: Option<Vec<String>>,
    pub certificate_level: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl From<VacancyApplicationUpdate> for VacancyApplicationUpdateDBRequest {
    fn from(api: VacancyApplicationUpdate) -> Self {
        Self {
            full_name: api.full_name,
            phone: api.phone,
            education: api.education,
            // An explicit empty list clears the stored value
            certificates: api
                .certificates
                .map(|c| serde_json::to_string(&c).expect("string list serializes")),
            certificate_level: api.certificate_level,
            status: api.status,
            notes: api.notes,
        }
    }
}

/// Full vacancy application details, with the vacancy title resolved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyApplicationResponse {
    pub id: VacancyApplicationId,
    pub full_name: String,
    pub phone: String,
    pub education: Option<String>,
    pub certificates: Vec<String>,
    pub certificate_level: Option<String>,
    pub vacancy_id: VacancyId,
    pub status: String,
    pub notes: Option<String>,
    pub vacancy_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VacancyApplicationDBResponse> for VacancyApplicationResponse {
    fn from(db: VacancyApplicationDBResponse) -> Self {
        Self {
            id: db.id,
            full_name: db.full_name,
            phone: db.phone,
            education: db.education,
            certificates: decode_string_list(db.certificates.as_deref()),
            certificate_level: db.certificate_level,
            vacancy_id: db.vacancy_id,
            status: db.status,
            notes: db.notes,
            vacancy_title: db.vacancy_title,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
