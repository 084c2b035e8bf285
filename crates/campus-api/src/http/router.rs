//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Student CRUD
        .route("/students", post(handlers::student::create_student))
        .route("/students", get(handlers::student::list_students))
        .route("/students/{id}", get(handlers::student::get_student))
        .route("/students/{id}", put(handlers::student::update_student))
        .route("/students/{id}", delete(handlers::student::delete_student))
        // Transcript report
        .route(
            "/students/{id}/courses",
            get(handlers::enrollment::student_courses),
        )
        // Course CRUD
        .route("/courses", post(handlers::course::create_course))
        .route("/courses", get(handlers::course::list_courses))
        .route("/courses/{id}", get(handlers::course::get_course))
        .route("/courses/{id}", put(handlers::course::update_course))
        .route("/courses/{id}", delete(handlers::course::delete_course))
        // Roster report
        .route(
            "/courses/{id}/students",
            get(handlers::enrollment::course_students),
        )
        // Enrollments
        .route("/enrollments", post(handlers::enrollment::enroll))
        .route(
            "/enrollments/{student_id}/{course_id}",
            put(handlers::enrollment::update_enrollment),
        )
        .route(
            "/enrollments/{student_id}/{course_id}",
            delete(handlers::enrollment::drop_enrollment),
        )
        // Dashboard stats
        .route("/stats", get(handlers::stats::get_stats));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
