//! Dashboard statistics endpoint.
//!
//! GET /api/v1/stats - Aggregate counts for the administration dashboard.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use sqlx::Row;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/stats - Aggregate dashboard statistics.
///
/// Returns student, course, and enrollment counts (the latter broken down
/// by status). Uses efficient COUNT(*) SQL queries directly on the reader
/// pool for performance.
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let student_row = sqlx::query("SELECT COUNT(*) as cnt FROM students")
        .fetch_one(&state.db_pool.reader)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to query student stats: {e}")))?;
    let total_students: i64 = student_row.try_get("cnt").unwrap_or(0);

    let course_row = sqlx::query("SELECT COUNT(*) as cnt FROM courses")
        .fetch_one(&state.db_pool.reader)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to query course stats: {e}")))?;
    let total_courses: i64 = course_row.try_get("cnt").unwrap_or(0);

    // Enrollment counts by status (single query with conditional counts)
    let enrollment_row = sqlx::query(
        r#"SELECT
            COUNT(*) as total,
            SUM(CASE WHEN status = 'active' THEN 1 ELSE 0 END) as active,
            SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END) as completed,
            SUM(CASE WHEN status = 'withdrawn' THEN 1 ELSE 0 END) as withdrawn
        FROM enrollments"#,
    )
    .fetch_one(&state.db_pool.reader)
    .await
    .map_err(|e| AppError::Internal(format!("Failed to query enrollment stats: {e}")))?;

    let total_enrollments: i64 = enrollment_row.try_get("total").unwrap_or(0);
    let active_enrollments: i64 = enrollment_row.try_get("active").unwrap_or(0);
    let completed_enrollments: i64 = enrollment_row.try_get("completed").unwrap_or(0);
    let withdrawn_enrollments: i64 = enrollment_row.try_get("withdrawn").unwrap_or(0);

    let elapsed = start.elapsed().as_millis() as u64;

    let data = serde_json::json!({
        "total_students": total_students,
        "total_courses": total_courses,
        "total_enrollments": total_enrollments,
        "active_enrollments": active_enrollments,
        "completed_enrollments": completed_enrollments,
        "withdrawn_enrollments": withdrawn_enrollments,
    });

    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("self", "/api/v1/stats")
        .with_link("students", "/api/v1/students")
        .with_link("courses", "/api/v1/courses");

    Ok(Json(resp))
}
