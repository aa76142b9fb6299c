//! OpenAPI document aggregation.
//!
//! Collects every annotated handler path and schema into one document,
//! rendered at `/docs` by Scalar.

use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "educrm",
        description = "Administrative backend for an education center",
    ),
    paths(
        // Auth
        handlers::auth::login,
        handlers::auth::me,
        handlers::auth::logout,
        // Courses
        handlers::courses::list_courses,
        handlers::courses::create_course,
        handlers::courses::get_course,
        handlers::courses::update_course,
        handlers::courses::delete_course,
        // Students
        handlers::students::list_students,
        handlers::students::create_student,
        handlers::students::get_student,
        handlers::students::update_student,
        handlers::students::delete_student,
        // Teachers
        handlers::teachers::list_teachers,
        handlers::teachers::create_teacher,
        handlers::teachers::get_teacher,
        handlers::teachers::update_teacher,
        handlers::teachers::delete_teacher,
        // Groups
        handlers::groups::list_groups,
        handlers::groups::create_group,
        handlers::groups::get_group,
        handlers::groups::update_group,
        handlers::groups::delete_group,
        // Group memberships
        handlers::group_students::list_group_students,
        handlers::group_students::list_by_group,
        handlers::group_students::list_by_student,
        handlers::group_students::add_student_to_group,
        handlers::group_students::remove_group_student,
        handlers::group_students::remove_student_from_group,
        // Enrollments (legacy)
        handlers::enrollments::list_enrollments,
        handlers::enrollments::create_enrollment,
        handlers::enrollments::get_enrollment,
        handlers::enrollments::delete_enrollment,
        // Vacancies
        handlers::vacancies::list_vacancies,
        handlers::vacancies::create_vacancy,
        handlers::vacancies::get_vacancy,
        handlers::vacancies::update_vacancy,
        handlers::vacancies::delete_vacancy,
        // Vacancy applications
        handlers::vacancy_applications::list_vacancy_applications,
        handlers::vacancy_applications::create_vacancy_application,
        handlers::vacancy_applications::get_vacancy_application,
        handlers::vacancy_applications::update_vacancy_application,
        handlers::vacancy_applications::delete_vacancy_application,
        // Blogs
        handlers::blogs::list_blogs,
        handlers::blogs::create_blog,
        handlers::blogs::get_blog,
        handlers::blogs::update_blog,
        handlers::blogs::delete_blog,
        // Applications
        handlers::applications::list_applications,
        handlers::applications::create_application,
        handlers::applications::get_application,
        handlers::applications::put_application,
        handlers::applications::patch_application,
        handlers::applications::update_application_status,
        handlers::applications::delete_application,
        // Payments
        handlers::payments::list_payments,
        handlers::payments::create_payment,
        handlers::payments::student_courses_with_payments,
        handlers::payments::student_payment_summary,
        handlers::payments::get_payment,
        handlers::payments::update_payment,
        handlers::payments::delete_payment,
    ),
    components(schemas(
        models::users::LoginRequest,
        models::users::LoginResponse,
        models::users::UserResponse,
        models::courses::CourseCreate,
        models::courses::CourseResponse,
        models::students::StudentCreate,
        models::students::StudentResponse,
        models::teachers::TeacherCreate,
        models::teachers::TeacherResponse,
        models::groups::GroupCreate,
        models::groups::GroupResponse,
        models::group_students::GroupStudentCreate,
        models::group_students::GroupStudentResponse,
        models::enrollments::EnrollmentCreate,
        models::enrollments::EnrollmentResponse,
        models::vacancies::VacancyCreate,
        models::vacancies::VacancyUpdate,
        models::vacancies::VacancyResponse,
        models::vacancy_applications::VacancyApplicationCreate,
        models::vacancy_applications::VacancyApplicationUpdate,
        models::vacancy_applications::VacancyApplicationResponse,
        models::blogs::BlogCreate,
        models::blogs::BlogUpdate,
        models::blogs::BlogResponse,
        models::applications::ApplicationCreate,
        models::applications::ApplicationUpdate,
        models::applications::ApplicationStatusUpdate,
        models::applications::ApplicationResponse,
        models::payments::PaymentCreate,
        models::payments::PaymentUpdate,
        models::payments::PaymentResponse,
        models::payments::StudentCourseWithPayments,
        models::payments::CourseMonthlySummary,
    ))
)]
pub struct ApiDoc;
