//! Enrollment handlers: enroll, drop, status change, and the
//! transcript/roster reports.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};

use campus_types::course::CourseId;
use campus_types::enrollment::{EnrollRequest, UpdateEnrollmentRequest};
use campus_types::student::StudentId;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

fn parse_pair(student: &str, course: &str) -> Result<(StudentId, CourseId), AppError> {
    let student_id = student
        .parse::<StudentId>()
        .map_err(|_| AppError::Validation(format!("invalid student id: '{student}'")))?;
    let course_id = course
        .parse::<CourseId>()
        .map_err(|_| AppError::Validation(format!("invalid course id: '{course}'")))?;
    Ok((student_id, course_id))
}

/// POST /api/v1/enrollments - Enroll a student in a course.
pub async fn enroll(
    State(state): State<AppState>,
    Json(body): Json<EnrollRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let confirmation = state
        .enrollment_service
        .enroll(&body.student_id, &body.course_id)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = serde_json::json!({
        "enrollment": confirmation.enrollment,
        "student": confirmation.student.full_name,
        "course": confirmation.course.title,
    });

    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link(
            "student",
            &format!("/api/v1/students/{}", confirmation.student.id),
        )
        .with_link(
            "course",
            &format!("/api/v1/courses/{}", confirmation.course.id),
        );

    Ok(Json(resp))
}

/// PUT /api/v1/enrollments/:student_id/:course_id - Change enrollment status.
pub async fn update_enrollment(
    State(state): State<AppState>,
    Path((student, course)): Path<(String, String)>,
    Json(body): Json<UpdateEnrollmentRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let (student_id, course_id) = parse_pair(&student, &course)?;
    let enrollment = state
        .enrollment_service
        .set_status(&student_id, &course_id, body.status)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let enrollment_json =
        serde_json::to_value(&enrollment).map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::success(enrollment_json, request_id, elapsed);

    Ok(Json(resp))
}

/// DELETE /api/v1/enrollments/:student_id/:course_id - Drop a student from a course.
pub async fn drop_enrollment(
    State(state): State<AppState>,
    Path((student, course)): Path<(String, String)>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let (student_id, course_id) = parse_pair(&student, &course)?;
    state
        .enrollment_service
        .as_ref()
        .drop(&student_id, &course_id)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(serde_json::json!({"dropped": true}), request_id, elapsed);

    Ok(Json(resp))
}

/// GET /api/v1/students/:id/courses - Transcript: a student and their courses.
pub async fn student_courses(
    State(state): State<AppState>,
    Path(student): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    // Accept UUID or national ID, like the other student endpoints
    let student_id = match student.parse::<StudentId>() {
        Ok(id) => id,
        Err(_) => {
            state
                .student_service
                .get_student_by_national_id(&student)
                .await?
                .id
        }
    };

    let transcript = state.enrollment_service.transcript(&student_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = serde_json::json!({
        "student": transcript.student,
        "courses": transcript.courses,
        "total_courses": transcript.courses.len(),
    });

    let resp = ApiResponse::success(data, request_id, elapsed).with_link(
        "student",
        &format!("/api/v1/students/{}", transcript.student.id),
    );

    Ok(Json(resp))
}

/// GET /api/v1/courses/:id/students - Roster: a course and its students.
pub async fn course_students(
    State(state): State<AppState>,
    Path(course): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    // Accept UUID or catalog code, like the other course endpoints
    let course_id = match course.parse::<CourseId>() {
        Ok(id) => id,
        Err(_) => state.course_service.get_course_by_code(&course).await?.id,
    };

    let roster = state.enrollment_service.roster(&course_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = serde_json::json!({
        "course": roster.course,
        "students": roster.students,
        "total_students": roster.students.len(),
    });

    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("course", &format!("/api/v1/courses/{}", roster.course.id));

    Ok(Json(resp))
}
