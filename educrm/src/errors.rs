use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Authentication required but not provided or invalid
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                // Constraint violations surface as 400s: a duplicate unique
                // key or a dangling foreign key is always bad client input
                // in this API.
                DbError::UniqueViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message.clone().unwrap_or_else(|| "Authentication required".to_string()),
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, id } => {
                format!("{resource} with ID {id} not found")
            }
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { constraint, table, .. } => {
                    // Provide user-friendly messages for common unique constraint violations
                    match (table.as_deref(), constraint.as_deref()) {
                        (Some("students"), Some(c)) if c.contains("phone") => {
                            "A student with this phone number already exists".to_string()
                        }
                        (Some("students"), Some(c)) if c.contains("email") => {
                            "A student with this email address already exists".to_string()
                        }
                        (Some("teachers"), Some(c)) if c.contains("phone") => {
                            "A teacher with this phone number already exists".to_string()
                        }
                        (Some("group_students"), _) => "Student already in this group".to_string(),
                        (Some("enrollments"), _) => "Student is already enrolled in this course".to_string(),
                        (Some("users"), Some(c)) if c.contains("username") => "This username is already taken".to_string(),
                        _ => "Resource already exists".to_string(),
                    }
                }
                DbError::ForeignKeyViolation { .. } => "Invalid reference to related resource".to_string(),
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::Unauthenticated { .. } => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();

        match &self {
            // Unique violations get a minimal structured JSON body so the
            // admin UI can highlight the offending resource
            Error::Database(DbError::UniqueViolation { constraint, table, .. }) => {
                use serde_json::json;

                let resource = match (table.as_deref(), constraint.as_deref()) {
                    (Some("students"), _) => "student",
                    (Some("teachers"), _) => "teacher",
                    (Some("group_students"), _) => "group-student",
                    (Some("enrollments"), _) => "enrollment",
                    (Some("users"), _) => "user",
                    _ => "unknown",
                };

                let body = json!({
                    "message": self.user_message(),
                    "resource": resource
                });

                (status, axum::response::Json(body)).into_response()
            }
            // For all other errors, return a simple text message
            _ => (status, self.user_message()).into_response(),
        }
    }
}

/// Convert from String errors (e.g., from external functions)
impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Internal { operation: msg }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violations_map_to_bad_request() {
        let unique = Error::Database(DbError::UniqueViolation {
            constraint: Some("students_phone_key".to_string()),
            table: Some("students".to_string()),
            message: "duplicate key value".to_string(),
        });
        assert_eq!(unique.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(unique.user_message(), "A student with this phone number already exists");

        let fk = Error::Database(DbError::ForeignKeyViolation {
            constraint: Some("payments_course_id_fkey".to_string()),
            table: Some("payments".to_string()),
            message: "violates foreign key".to_string(),
        });
        assert_eq!(fk.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = Error::NotFound {
            resource: "Course".to_string(),
            id: "7".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "Course with ID 7 not found");

        assert_eq!(Error::Database(DbError::NotFound).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = Error::Internal {
            operation: "connect to database at 10.0.0.3".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "Internal server error");
    }
}
