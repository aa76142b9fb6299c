//! Test utilities: a router-backed test server plus entity factories.

use crate::config::Config;
use crate::db::handlers::{Applications, Courses, GroupStudents, Groups, Payments, Repository, Students, Teachers, Users};
use crate::db::models::applications::{ApplicationCreateDBRequest, ApplicationDBResponse};
use crate::db::models::courses::{CourseCreateDBRequest, CourseDBResponse};
use crate::db::models::group_students::GroupStudentCreateDBRequest;
use crate::db::models::groups::{GroupCreateDBRequest, GroupDBResponse};
use crate::db::models::payments::{PaymentCreateDBRequest, PaymentDBResponse};
use crate::db::models::students::{StudentCreateDBRequest, StudentDBResponse};
use crate::db::models::teachers::{TeacherCreateDBRequest, TeacherDBResponse};
use crate::db::models::users::{UserCreateDBRequest, UserDBResponse};
use crate::types::{CourseId, GroupId, StudentId, TeacherId};
use axum_test::TestServer;
use sqlx::PgPool;
use uuid::Uuid;

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Config::default()
    }
}

pub async fn create_test_app(pool: PgPool) -> TestServer {
    let app = crate::Application::new_with_pool(create_test_config(), pool)
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

/// Unique-enough phone number for rows with a phone uniqueness constraint
pub fn unique_phone() -> String {
    let tail: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("+998{tail}")
}

pub async fn create_test_admin(pool: &PgPool, username: &str, password: &str) -> UserDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut users = Users::new(&mut conn);
    let hashed = crate::auth::password::hash_string(password).expect("Failed to hash password");

    users
        .create(&UserCreateDBRequest {
            username: username.to_string(),
            hashed_password: hashed,
            role: "admin".to_string(),
        })
        .await
        .expect("Failed to create test admin")
}

pub async fn create_test_course(pool: &PgPool, name: &str, price: i32) -> CourseDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Courses::new(&mut conn);

    repo.create(&CourseCreateDBRequest {
        name: name.to_string(),
        price,
        duration: "6 oy".to_string(),
        audience: "maktab o'quvchilari".to_string(),
        description: None,
    })
    .await
    .expect("Failed to create test course")
}

pub async fn create_test_teacher(pool: &PgPool, full_name: &str) -> TeacherDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Teachers::new(&mut conn);

    repo.create(&TeacherCreateDBRequest {
        full_name: full_name.to_string(),
        specialty: "Ingliz tili".to_string(),
        experience: "5 yil".to_string(),
        phone: unique_phone(),
        image: None,
        tags: None,
        quote: None,
    })
    .await
    .expect("Failed to create test teacher")
}

pub async fn create_test_student(pool: &PgPool, full_name: &str) -> StudentDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Students::new(&mut conn);

    repo.create(&StudentCreateDBRequest {
        full_name: full_name.to_string(),
        phone: unique_phone(),
        email: None,
        school: "1-maktab".to_string(),
        grade: "10".to_string(),
        address: None,
    })
    .await
    .expect("Failed to create test student")
}

pub async fn create_test_group(pool: &PgPool, name: &str, course_id: CourseId, teacher_id: TeacherId) -> GroupDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Groups::new(&mut conn);

    repo.create(&GroupCreateDBRequest {
        name: name.to_string(),
        course_id,
        teacher_id,
    })
    .await
    .expect("Failed to create test group")
}

pub async fn add_student_to_group(pool: &PgPool, group_id: GroupId, student_id: StudentId) {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = GroupStudents::new(&mut conn);

    repo.create(&GroupStudentCreateDBRequest { group_id, student_id })
        .await
        .expect("Failed to add student to group");
}

pub async fn create_test_payment(
    pool: &PgPool,
    student_id: StudentId,
    course_id: CourseId,
    amount: i32,
    month: &str,
    status: &str,
) -> PaymentDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Payments::new(&mut conn);

    repo.create(&PaymentCreateDBRequest {
        student_id,
        course_id,
        amount,
        month: month.to_string(),
        status: status.to_string(),
    })
    .await
    .expect("Failed to create test payment")
}

pub async fn create_test_application(pool: &PgPool, full_name: &str, phone: &str) -> ApplicationDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Applications::new(&mut conn);

    repo.create(&ApplicationCreateDBRequest {
        full_name: full_name.to_string(),
        phone: phone.to_string(),
        school: Some("1-maktab".to_string()),
        grade: Some("10".to_string()),
        address: None,
        course_id: None,
    })
    .await
    .expect("Failed to create test application")
}
