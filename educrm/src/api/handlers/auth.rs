//! Authentication handlers: login, current user, logout.

use crate::api::models::users::{CurrentUser, LoginRequest, LoginResponse, UserResponse};
use crate::auth::{password, session};
use crate::db::handlers::Users;
use crate::AppState;
use crate::errors::{Error, Result};
use axum::{Json, extract::State, http::StatusCode};

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    summary = "Log in",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 401, description = "Invalid username or password"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut conn);

    // Same error for unknown user and wrong password
    let invalid = || Error::Unauthenticated {
        message: Some("Invalid username or password".to_string()),
    };

    let user = users.get_by_username(&request.username).await?.ok_or_else(invalid)?;

    if !password::verify_string(&request.password, &user.hashed_password)? {
        return Err(invalid());
    }

    let current = CurrentUser {
        id: user.id,
        username: user.username.clone(),
        role: user.role.clone(),
    };
    let token = session::create_session_token(&current, &state.config)?;

    tracing::info!(username = %user.username, "admin logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    summary = "Current user",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn me(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut conn);

    // The token is self-contained, but the row read catches deleted users
    let user = users
        .get_by_id(current_user.id)
        .await?
        .ok_or(Error::Unauthenticated { message: None })?;

    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    summary = "Log out",
    responses(
        (status = 204, description = "Logged out"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout() -> StatusCode {
    // Tokens are stateless; the client discards its copy
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_admin, create_test_app};
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn login_then_me_roundtrip(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        create_test_admin(&pool, "director", "juda-maxfiy").await;

        let response = server
            .post("/auth/login")
            .json(&json!({"username": "director", "password": "juda-maxfiy"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<serde_json::Value>();
        let token = body["token"].as_str().expect("token in response");
        assert_eq!(body["user"]["username"], "director");
        assert!(body["user"].get("hashed_password").is_none());

        let me = server
            .get("/auth/me")
            .add_header("authorization", format!("Bearer {token}"))
            .await;
        me.assert_status_ok();
        assert_eq!(me.json::<serde_json::Value>()["username"], "director");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn wrong_password_is_unauthorized(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        create_test_admin(&pool, "director", "juda-maxfiy").await;

        let response = server
            .post("/auth/login")
            .json(&json!({"username": "director", "password": "notogri"}))
            .await;
        response.assert_status_unauthorized();

        let unknown = server
            .post("/auth/login")
            .json(&json!({"username": "ghost", "password": "juda-maxfiy"}))
            .await;
        unknown.assert_status_unauthorized();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn me_without_token_is_unauthorized(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;

        let response = server.get("/auth/me").await;
        response.assert_status_unauthorized();

        let garbage = server.get("/auth/me").add_header("authorization", "Bearer not-a-jwt").await;
        garbage.assert_status_unauthorized();
    }
}
