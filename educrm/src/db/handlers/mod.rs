//! Repository implementations for database access.
//!
//! Each repository:
//! - Wraps a SQLx connection or transaction (`&mut PgConnection`)
//! - Provides strongly-typed CRUD operations
//! - Handles query construction and parameter binding
//! - Returns domain models from [`crate::db::models`]
//!
//! Cross-entity logic that belongs to the storage layer lives here too: the
//! application → student promotion upsert ([`applications::Applications::promote_to_student`])
//! and the payment-ledger traversals ([`payments::Payments::monthly_summary`],
//! [`payments::Payments::courses_with_payments`]).

pub mod applications;
pub mod blogs;
pub mod courses;
pub mod enrollments;
pub mod group_students;
pub mod groups;
pub mod payments;
pub mod repository;
pub mod students;
pub mod teachers;
pub mod users;
pub mod vacancies;
pub mod vacancy_applications;

pub use applications::Applications;
pub use blogs::Blogs;
pub use courses::Courses;
pub use enrollments::Enrollments;
pub use group_students::GroupStudents;
pub use groups::Groups;
pub use payments::Payments;
pub use repository::{PageFilter, Repository};
pub use students::Students;
pub use teachers::Teachers;
pub use users::Users;
pub use vacancies::Vacancies;
pub use vacancy_applications::VacancyApplications;
