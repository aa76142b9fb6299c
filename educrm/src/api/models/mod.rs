//! API request/response models.
//!
//! These structs define the JSON wire format. They convert from the
//! database DTOs in [`crate::db::models`]; the two layers are kept separate
//! so storage details (like text-encoded JSON arrays) never leak into the
//! API shape.

pub mod applications;
pub mod blogs;
pub mod courses;
pub mod enrollments;
pub mod group_students;
pub mod groups;
pub mod payments;
pub mod students;
pub mod teachers;
pub mod users;
pub mod vacancies;
pub mod vacancy_applications;

use serde::Deserialize;
use utoipa::IntoParams;

/// Skip/limit pagination query parameters shared by list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct Pagination {
    /// Number of rows to skip
    pub skip: Option<i64>,
    /// Maximum number of rows to return
    pub limit: Option<i64>,
}

impl Pagination {
    /// Clamp to sane bounds: default page of 100, hard cap of 1000.
    pub fn to_filter(&self) -> crate::db::handlers::PageFilter {
        crate::db::handlers::PageFilter::new(self.skip.unwrap_or(0).max(0), self.limit.unwrap_or(100).clamp(1, 1000))
    }
}

/// Encode a string list for storage in a text column.
///
/// Empty lists are stored as NULL, matching rows created before the field
/// existed.
pub(crate) fn encode_string_list(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        // Serializing Vec<String> cannot fail
        Some(serde_json::to_string(items).expect("string list serializes"))
    }
}

/// Decode a text column holding a JSON array of strings. NULL or unparsable
/// content decodes as the empty list.
pub(crate) fn decode_string_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_list_roundtrip() {
        let items = vec!["IELTS 7.0".to_string(), "CEFR C1".to_string()];
        let encoded = encode_string_list(&items).expect("non-empty list encodes");
        assert_eq!(decode_string_list(Some(&encoded)), items);
    }

    #[test]
    fn empty_list_is_null() {
        assert_eq!(encode_string_list(&[]), None);
        assert!(decode_string_list(None).is_empty());
    }

    #[test]
    fn garbage_decodes_as_empty() {
        assert!(decode_string_list(Some("not json")).is_empty());
        assert!(decode_string_list(Some("{\"a\":1}")).is_empty());
    }

    #[test]
    fn pagination_clamps() {
        let page = Pagination {
            skip: Some(-5),
            limit: Some(10_000),
        };
        let filter = page.to_filter();
        assert_eq!(filter.skip, 0);
        assert_eq!(filter.limit, 1000);
    }
}
