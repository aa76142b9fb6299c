//! JWT session token creation and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{api::models::users::CurrentUser, config::Config, errors::Error, types::UserId};

/// JWT session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,      // Subject (user ID)
    pub username: String, // Username
    pub role: String,     // Role (e.g., "admin")
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
}

impl SessionClaims {
    /// Create new session claims for a user
    pub fn new(user: &CurrentUser, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.auth.jwt_expiry;

        Self {
            sub: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

impl From<SessionClaims> for CurrentUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Create a JWT token for a user session
pub fn create_session_token(user: &CurrentUser, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(user, config);
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "JWT sessions: secret_key is required".to_string(),
    })?;

    let key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify and decode a JWT session token
pub fn verify_session_token(token: &str, config: &Config) -> Result<CurrentUser, Error> {
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "JWT sessions: secret_key is required".to_string(),
    })?;

    let key = DecodingKey::from_secret(secret_key.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Client errors (401) - malformed tokens, invalid claims, expired tokens
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::ExpiredSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => Error::Unauthenticated { message: None },

        // Everything else is a server-side problem (key issues, internal failures)
        _ => Error::Internal {
            operation: format!("JWT verification: {e}"),
        },
    })?;

    Ok(token_data.claims.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            secret_key: Some("test-secret-key-for-testing-only".to_string()),
            ..Config::default()
        }
    }

    fn test_user() -> CurrentUser {
        CurrentUser {
            id: 1,
            username: "admin".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn token_roundtrip() {
        let config = test_config();
        let token = create_session_token(&test_user(), &config).unwrap();
        let user = verify_session_token(&token, &config).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "admin");
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn tampered_token_is_unauthenticated() {
        let config = test_config();
        let token = create_session_token(&test_user(), &config).unwrap();

        let mut other = test_config();
        other.secret_key = Some("a-different-secret".to_string());
        match verify_session_token(&token, &other) {
            Err(Error::Unauthenticated { .. }) => {}
            other => panic!("expected Unauthenticated, got {other:?}"),
        }
    }

    #[test]
    fn missing_secret_key_is_internal_error() {
        let config = Config::default();
        match create_session_token(&test_user(), &config) {
            Err(Error::Internal { .. }) => {}
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
