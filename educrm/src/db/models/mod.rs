//! Database record models matching table schemas.
//!
//! This module contains the `*CreateDBRequest` / `*UpdateDBRequest` /
//! `*DBResponse` structs used by repositories. Database models are distinct
//! from API models so the storage and API representations can evolve
//! independently (e.g. `requirements` is a JSON array at the API boundary
//! but a text column here).

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
