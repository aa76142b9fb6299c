//! Common type definitions.
//!
//! All entity identifiers are `SERIAL` integers in the database; the aliases
//! below keep signatures readable and make accidental id mix-ups easier to
//! spot in review.

pub type CourseId = i32;
pub type StudentId = i32;
pub type TeacherId = i32;
pub type GroupId = i32;
pub type GroupStudentId = i32;
pub type EnrollmentId = i32;
pub type UserId = i32;
pub type VacancyId = i32;
pub type VacancyApplicationId = i32;
pub type BlogId = i32;
pub type ApplicationId = i32;
pub type PaymentId = i32;
