//! Student CRUD handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};

use campus_core::repository::SortOrder;
use campus_core::repository::student::StudentFilter;
use campus_types::student::{CreateStudentRequest, Student, StudentId, UpdateStudentRequest};

use crate::http::error::AppError;
use crate::http::extractors::query::StudentListQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Resolve a path segment as a student: UUID first, national ID otherwise.
async fn resolve_student(state: &AppState, id_or_national: &str) -> Result<Student, AppError> {
    match id_or_national.parse::<StudentId>() {
        Ok(id) => Ok(state.student_service.get_student(&id).await?),
        Err(_) => Ok(state
            .student_service
            .get_student_by_national_id(id_or_national)
            .await?),
    }
}

/// POST /api/v1/students - Register a new student.
pub async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<CreateStudentRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let student = state.student_service.create_student(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let student_json = serde_json::to_value(&student)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let mut resp = ApiResponse::success(student_json, request_id, elapsed);
    resp.links
        .insert("self".to_string(), format!("/api/v1/students/{}", student.id));
    resp.links.insert(
        "courses".to_string(),
        format!("/api/v1/students/{}/courses", student.id),
    );

    Ok(Json(resp))
}

/// GET /api/v1/students - List students with filtering and sorting.
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let sort_order = match query.order.to_lowercase().as_str() {
        "asc" => Some(SortOrder::Asc),
        _ => Some(SortOrder::Desc),
    };

    let filter = Some(StudentFilter {
        semester: query.semester,
        sort_by: Some(query.sort.clone()),
        sort_order,
        limit: query.limit,
        offset: query.offset,
    });

    let students = state.student_service.list_students(filter).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let students_json = students
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let resp = ApiResponse::success(students_json, request_id, elapsed)
        .with_link("self", "/api/v1/students");

    Ok(Json(resp))
}

/// GET /api/v1/students/:id - Get a student by ID or national ID.
pub async fn get_student(
    State(state): State<AppState>,
    Path(id_or_national): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let student = resolve_student(&state, &id_or_national).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let student_json = serde_json::to_value(&student)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::success(student_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/students/{}", student.id))
        .with_link(
            "courses",
            &format!("/api/v1/students/{}/courses", student.id),
        );

    Ok(Json(resp))
}

/// PUT /api/v1/students/:id - Update a student.
pub async fn update_student(
    State(state): State<AppState>,
    Path(id_or_national): Path<String>,
    Json(body): Json<UpdateStudentRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let student = resolve_student(&state, &id_or_national).await?;
    let updated = state
        .student_service
        .update_student(&student.id, body)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let student_json = serde_json::to_value(&updated)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::success(student_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/students/{}", updated.id));

    Ok(Json(resp))
}

/// DELETE /api/v1/students/:id - Delete a student permanently.
///
/// Enrollments cascade at the database level.
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id_or_national): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let student = resolve_student(&state, &id_or_national).await?;
    state.student_service.delete_student(&student.id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "national_id": student.national_id}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
