//! Axum route handlers.
//!
//! Handlers follow one pattern: validate input shape, acquire a pool
//! connection (or a transaction when more than one write is involved), call
//! the repository, and map the result into an API response. 404 on missing
//! id, 400 on constraint violation, 201 on creation, 204 on deletion.

pub mod applications;
pub mod auth;
pub mod blogs;
pub mod courses;
pub mod enrollments;
pub mod group_students;
pub mod groups;
pub mod payments;
pub mod students;
pub mod teachers;
pub mod vacancies;
pub mod vacancy_applications;
