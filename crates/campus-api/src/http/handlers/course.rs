//! Course CRUD handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};

use campus_core::repository::SortOrder;
use campus_core::repository::course::CourseFilter;
use campus_types::course::{Course, CourseId, CreateCourseRequest, UpdateCourseRequest};

use crate::http::error::AppError;
use crate::http::extractors::query::CourseListQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Resolve a path segment as a course: UUID first, catalog code otherwise.
async fn resolve_course(state: &AppState, id_or_code: &str) -> Result<Course, AppError> {
    match id_or_code.parse::<CourseId>() {
        Ok(id) => Ok(state.course_service.get_course(&id).await?),
        Err(_) => Ok(state.course_service.get_course_by_code(id_or_code).await?),
    }
}

/// POST /api/v1/courses - Add a course to the catalog.
pub async fn create_course(
    State(state): State<AppState>,
    Json(body): Json<CreateCourseRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let course = state.course_service.create_course(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let course_json =
        serde_json::to_value(&course).map_err(|e| AppError::Internal(e.to_string()))?;
    let mut resp = ApiResponse::success(course_json, request_id, elapsed);
    resp.links
        .insert("self".to_string(), format!("/api/v1/courses/{}", course.id));
    resp.links.insert(
        "students".to_string(),
        format!("/api/v1/courses/{}/students", course.id),
    );

    Ok(Json(resp))
}

/// GET /api/v1/courses - List courses with filtering and sorting.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let sort_order = match query.order.to_lowercase().as_str() {
        "asc" => Some(SortOrder::Asc),
        _ => Some(SortOrder::Desc),
    };

    let filter = Some(CourseFilter {
        credits: query.credits,
        code_contains: query.code.clone(),
        sort_by: Some(query.sort.clone()),
        sort_order,
        limit: query.limit,
        offset: query.offset,
    });

    let courses = state.course_service.list_courses(filter).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let courses_json = courses
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let resp = ApiResponse::success(courses_json, request_id, elapsed)
        .with_link("self", "/api/v1/courses");

    Ok(Json(resp))
}

/// GET /api/v1/courses/:id - Get a course by ID or catalog code.
pub async fn get_course(
    State(state): State<AppState>,
    Path(id_or_code): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let course = resolve_course(&state, &id_or_code).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let course_json =
        serde_json::to_value(&course).map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::success(course_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/courses/{}", course.id))
        .with_link(
            "students",
            &format!("/api/v1/courses/{}/students", course.id),
        );

    Ok(Json(resp))
}

/// PUT /api/v1/courses/:id - Update a course.
pub async fn update_course(
    State(state): State<AppState>,
    Path(id_or_code): Path<String>,
    Json(body): Json<UpdateCourseRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let course = resolve_course(&state, &id_or_code).await?;
    let updated = state.course_service.update_course(&course.id, body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let course_json =
        serde_json::to_value(&updated).map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::success(course_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/courses/{}", updated.id));

    Ok(Json(resp))
}

/// DELETE /api/v1/courses/:id - Delete a course permanently.
///
/// Enrollments cascade at the database level.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id_or_code): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let course = resolve_course(&state, &id_or_code).await?;
    state.course_service.delete_course(&course.id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "code": course.code}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
