//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! One resource path per entity (`/courses`, `/students`, `/teachers`,
//! `/groups`, `/group-students`, `/enrollments`, `/vacancies`,
//! `/vacancy-applications`, `/blogs`, `/applications`, `/payments`), with
//! standard verbs mapped to list/get/create/update/delete. The cross-entity
//! reads live under `/payments/student/{id}/...`, and admin login under
//! `/auth/*`.
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`;
//! the rendered documentation is served at `/docs`.

pub mod handlers;
pub mod models;
