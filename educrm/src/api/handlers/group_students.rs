//! Handlers for the group roster membership resource.

use crate::api::models::Pagination;
use crate::api::models::group_students::{GroupStudentCreate, GroupStudentResponse};
use crate::db::handlers::{GroupStudents, Groups, Repository, Students};
use crate::db::models::group_students::GroupStudentCreateDBRequest;
use crate::errors::{Error, Result};
use crate::{
    AppState,
    types::{GroupId, GroupStudentId, StudentId},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/group-students",
    tag = "group-students",
    summary = "List group memberships",
    params(Pagination),
    responses(
        (status = 200, description = "List of memberships", body = Vec<GroupStudentResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_group_students(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<GroupStudentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = GroupStudents::new(&mut conn);

    let rows = repo.list(&page.to_filter()).await?;
    Ok(Json(rows.into_iter().map(GroupStudentResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/group-students/group/{group_id}",
    tag = "group-students",
    summary = "List memberships of a group",
    params(("group_id" = i32, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Memberships in the group", body = Vec<GroupStudentResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_by_group(State(state): State<AppState>, Path(group_id): Path<GroupId>) -> Result<Json<Vec<GroupStudentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = GroupStudents::new(&mut conn);

    let rows = repo.list_by_group(group_id).await?;
    Ok(Json(rows.into_iter().map(GroupStudentResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/group-students/student/{student_id}",
    tag = "group-students",
    summary = "List memberships of a student",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Memberships of the student", body = Vec<GroupStudentResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<StudentId>,
) -> Result<Json<Vec<GroupStudentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = GroupStudents::new(&mut conn);

    let rows = repo.list_by_student(student_id).await?;
    Ok(Json(rows.into_iter().map(GroupStudentResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/group-students",
    tag = "group-students",
    summary = "Add student to group",
    request_body = GroupStudentCreate,
    responses(
        (status = 201, description = "Student added to group", body = GroupStudentResponse),
        (status = 400, description = "Student already in this group"),
        (status = 404, description = "Group or student not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn add_student_to_group(
    State(state): State<AppState>,
    Json(create): Json<GroupStudentCreate>,
) -> Result<(StatusCode, Json<GroupStudentResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    // Missing parents are 404s, not constraint errors
    {
        let mut groups = Groups::new(&mut conn);
        if groups.get_by_id(create.group_id).await?.is_none() {
            return Err(Error::NotFound {
                resource: "Group".to_string(),
                id: create.group_id.to_string(),
            });
        }
    }
    {
        let mut students = Students::new(&mut conn);
        if students.get_by_id(create.student_id).await?.is_none() {
            return Err(Error::NotFound {
                resource: "Student".to_string(),
                id: create.student_id.to_string(),
            });
        }
    }

    let mut repo = GroupStudents::new(&mut conn);
    let row = repo.create(&GroupStudentCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(GroupStudentResponse::from(row))))
}

#[utoipa::path(
    delete,
    path = "/group-students/{id}",
    tag = "group-students",
    summary = "Remove membership by row id",
    params(("id" = i32, Path, description = "Membership row ID")),
    responses(
        (status = 204, description = "Membership removed"),
        (status = 404, description = "Membership not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn remove_group_student(State(state): State<AppState>, Path(id): Path<GroupStudentId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = GroupStudents::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Group-student relation".to_string(),
            id: id.to_string(),
        })
    }
}

#[utoipa::path(
    delete,
    path = "/group-students/group/{group_id}/student/{student_id}",
    tag = "group-students",
    summary = "Remove student from group",
    params(
        ("group_id" = i32, Path, description = "Group ID"),
        ("student_id" = i32, Path, description = "Student ID"),
    ),
    responses(
        (status = 204, description = "Membership removed"),
        (status = 404, description = "Student not in this group"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn remove_student_from_group(
    State(state): State<AppState>,
    Path((group_id, student_id)): Path<(GroupId, StudentId)>,
) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = GroupStudents::new(&mut conn);

    if repo.delete_by_pair(group_id, student_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Group-student relation".to_string(),
            id: format!("{group_id}/{student_id}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, create_test_course, create_test_group, create_test_student, create_test_teacher};
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn duplicate_membership_is_rejected(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;

        let course = create_test_course(&pool, "Ona tili", 150_000).await;
        let teacher = create_test_teacher(&pool, "Sevara Mahmudova").await;
        let group = create_test_group(&pool, "O-1", course.id, teacher.id).await;
        let student = create_test_student(&pool, "Roster Student").await;

        let body = json!({"group_id": group.id, "student_id": student.id});

        let first = server.post("/group-students").json(&body).await;
        first.assert_status(axum::http::StatusCode::CREATED);

        let second = server.post("/group-students").json(&body).await;
        second.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn missing_parents_are_404(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let student = create_test_student(&pool, "Lonely Student").await;

        let no_group = server
            .post("/group-students")
            .json(&json!({"group_id": 999999, "student_id": student.id}))
            .await;
        no_group.assert_status_not_found();

        let course = create_test_course(&pool, "Biologiya", 100_000).await;
        let teacher = create_test_teacher(&pool, "Olim Berdiyev").await;
        let group = create_test_group(&pool, "B-1", course.id, teacher.id).await;

        let no_student = server
            .post("/group-students")
            .json(&json!({"group_id": group.id, "student_id": 999999}))
            .await;
        no_student.assert_status_not_found();
    }
}
