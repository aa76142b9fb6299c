//! # educrm: education-center administrative backend
//!
//! `educrm` is the CRUD backend behind a small education center's admin
//! dashboard and public site: course catalog, student/teacher/group rosters,
//! enrollments, job vacancies, blog content, payments, and inbound
//! applications.
//!
//! ## Overview
//!
//! Every route follows the same shape: validate the input, look up related
//! rows by primary key, write or delete a row, and return it. Two workflows
//! cross entity boundaries:
//!
//! - **Application promotion** — when an application's status transitions to
//!   `"active"`, a student record is provisioned from it, keyed by phone
//!   number. The provisioning is an atomic insert-if-absent, so repeated or
//!   concurrent promotions of the same phone never create duplicates.
//! - **Payment ledger** — a student's billed courses are derived from group
//!   membership (`group_students → groups → courses`), and per-month
//!   settlement is computed on read by summing paid ledger entries against
//!   the course price.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL for all persistence.
//!
//! The **API layer** ([`api`]) exposes one resource path per entity with
//! standard verbs, documented via OpenAPI and rendered at `/docs`. The
//! **database layer** ([`db`]) uses the repository pattern: each table has
//! a repository wrapping a connection, and multi-step operations run on one
//! transaction acquired in the handler. The **authentication layer**
//! ([`auth`]) issues JWT bearer tokens for the admin dashboard; the public
//! endpoints (application and vacancy-application submission, blog and
//! vacancy reads) require none.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use educrm::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = educrm::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     educrm::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{
    api::handlers,
    auth::password,
    db::handlers::Users,
    db::models::users::UserCreateDBRequest,
    openapi::ApiDoc,
    types::UserId,
};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, patch, post},
};
pub use config::Config;
use config::CorsOrigin;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the educrm database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// Idempotent: creates the user on first startup, updates the password on
/// subsequent startups when one is configured. Without a configured
/// password no user is created (and login stays unusable until one is).
#[instrument(skip_all)]
pub async fn create_initial_admin_user(username: &str, password: Option<&str>, db: &PgPool) -> anyhow::Result<Option<UserId>> {
    let Some(password) = password else {
        info!("No admin password configured; skipping initial admin user");
        return Ok(None);
    };

    let hashed = password::hash_string(password).map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?;

    // Transaction so a concurrent startup cannot race the existence check
    let mut tx = db.begin().await?;
    let mut users = Users::new(&mut tx);

    let id = match users.get_by_username(username).await? {
        Some(existing) => {
            users.set_password(existing.id, &hashed).await?;
            existing.id
        }
        None => {
            let created = users
                .create(&UserCreateDBRequest {
                    username: username.to_string(),
                    hashed_password: hashed,
                    role: "admin".to_string(),
                })
                .await?;
            info!(username, "Created initial admin user");
            created.id
        }
    };

    tx.commit().await?;
    Ok(Some(id))
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.auth.cors;
    let wildcard = cors_config.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard));

    // Explicit method/header lists: the wildcard forms cannot be combined
    // with credentials
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if wildcard {
        cors = cors.allow_origin(Any);
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        cors = cors.allow_origin(origins);
        if cors_config.allow_credentials {
            cors = cors.allow_credentials(true);
        }
    }

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        // Admin authentication
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/logout", post(handlers::auth::logout))
        // Course catalog
        .route("/courses", get(handlers::courses::list_courses).post(handlers::courses::create_course))
        .route(
            "/courses/{id}",
            get(handlers::courses::get_course)
                .put(handlers::courses::update_course)
                .delete(handlers::courses::delete_course),
        )
        // Students
        .route(
            "/students",
            get(handlers::students::list_students).post(handlers::students::create_student),
        )
        .route(
            "/students/{id}",
            get(handlers::students::get_student)
                .put(handlers::students::update_student)
                .delete(handlers::students::delete_student),
        )
        // Teachers
        .route(
            "/teachers",
            get(handlers::teachers::list_teachers).post(handlers::teachers::create_teacher),
        )
        .route(
            "/teachers/{id}",
            get(handlers::teachers::get_teacher)
                .put(handlers::teachers::update_teacher)
                .delete(handlers::teachers::delete_teacher),
        )
        // Teaching groups
        .route("/groups", get(handlers::groups::list_groups).post(handlers::groups::create_group))
        .route(
            "/groups/{id}",
            get(handlers::groups::get_group)
                .put(handlers::groups::update_group)
                .delete(handlers::groups::delete_group),
        )
        // Roster memberships
        .route(
            "/group-students",
            get(handlers::group_students::list_group_students).post(handlers::group_students::add_student_to_group),
        )
        .route("/group-students/{id}", delete(handlers::group_students::remove_group_student))
        .route("/group-students/group/{group_id}", get(handlers::group_students::list_by_group))
        .route("/group-students/student/{student_id}", get(handlers::group_students::list_by_student))
        .route(
            "/group-students/group/{group_id}/student/{student_id}",
            delete(handlers::group_students::remove_student_from_group),
        )
        // Enrollments (legacy student-course link)
        .route(
            "/enrollments",
            get(handlers::enrollments::list_enrollments).post(handlers::enrollments::create_enrollment),
        )
        .route(
            "/enrollments/{id}",
            get(handlers::enrollments::get_enrollment).delete(handlers::enrollments::delete_enrollment),
        )
        // Vacancies
        .route(
            "/vacancies",
            get(handlers::vacancies::list_vacancies).post(handlers::vacancies::create_vacancy),
        )
        .route(
            "/vacancies/{id}",
            get(handlers::vacancies::get_vacancy)
                .patch(handlers::vacancies::update_vacancy)
                .delete(handlers::vacancies::delete_vacancy),
        )
        // Vacancy applications
        .route(
            "/vacancy-applications",
            get(handlers::vacancy_applications::list_vacancy_applications).post(handlers::vacancy_applications::create_vacancy_application),
        )
        .route(
            "/vacancy-applications/{id}",
            get(handlers::vacancy_applications::get_vacancy_application)
                .patch(handlers::vacancy_applications::update_vacancy_application)
                .delete(handlers::vacancy_applications::delete_vacancy_application),
        )
        // Blog content
        .route("/blogs", get(handlers::blogs::list_blogs).post(handlers::blogs::create_blog))
        .route(
            "/blogs/{id}",
            get(handlers::blogs::get_blog)
                .patch(handlers::blogs::update_blog)
                .delete(handlers::blogs::delete_blog),
        )
        // Inbound applications (public submission, staff triage)
        .route(
            "/applications",
            get(handlers::applications::list_applications).post(handlers::applications::create_application),
        )
        .route(
            "/applications/{id}",
            get(handlers::applications::get_application)
                .put(handlers::applications::put_application)
                .patch(handlers::applications::patch_application)
                .delete(handlers::applications::delete_application),
        )
        .route("/applications/{id}/status", patch(handlers::applications::update_application_status))
        // Payment ledger
        .route(
            "/payments",
            get(handlers::payments::list_payments).post(handlers::payments::create_payment),
        )
        .route(
            "/payments/student/{student_id}/courses",
            get(handlers::payments::student_courses_with_payments),
        )
        .route(
            "/payments/student/{student_id}/summary",
            get(handlers::payments::student_payment_summary),
        )
        .route(
            "/payments/{id}",
            get(handlers::payments::get_payment)
                .patch(handlers::payments::update_payment)
                .delete(handlers::payments::delete_payment),
        );

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(api_routes)
        .with_state(state.clone())
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects the pool, runs migrations,
///    and seeds the initial admin user
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool_settings = &config.database.pool;
        // idle_timeout_secs of 0 means connections are never reaped
        let idle_timeout = (pool_settings.idle_timeout_secs > 0).then(|| Duration::from_secs(pool_settings.idle_timeout_secs));
        let pool = PgPoolOptions::new()
            .max_connections(pool_settings.max_connections)
            .min_connections(pool_settings.min_connections)
            .acquire_timeout(Duration::from_secs(pool_settings.acquire_timeout_secs))
            .idle_timeout(idle_timeout)
            .connect(&config.database.url)
            .await?;

        Self::new_with_pool(config, pool).await
    }

    /// Create an application on an existing pool (used by tests, where the
    /// test harness owns the database)
    pub async fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        migrator().run(&pool).await?;

        create_initial_admin_user(&config.admin_username, config.admin_password.as_deref(), &pool).await?;

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("educrm listening on http://{bind_addr}");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::test_utils::create_test_app;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn healthz_responds(pool: PgPool) {
        let server = create_test_app(pool).await;
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn admin_user_is_seeded_once(pool: PgPool) {
        let id_first = super::create_initial_admin_user("admin", Some("parol123"), &pool)
            .await
            .unwrap()
            .expect("admin should be created");
        let id_second = super::create_initial_admin_user("admin", Some("yangi-parol"), &pool)
            .await
            .unwrap()
            .expect("admin should still exist");
        assert_eq!(id_first, id_second);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = 'admin'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn no_admin_without_password(pool: PgPool) {
        let id = super::create_initial_admin_user("admin", None, &pool).await.unwrap();
        assert!(id.is_none());
    }
}
