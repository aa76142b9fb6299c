//! Axum extractor for the authenticated admin user.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
};

/// Extract the bearer token from the Authorization header, if present.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = bearer_token(parts).ok_or(Error::Unauthenticated {
            message: Some("Missing bearer token".to_string()),
        })?;

        session::verify_session_token(token, &state.config)
    }
}
