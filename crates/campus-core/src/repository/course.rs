//! Course repository trait definition.

use campus_types::course::{Course, CourseId};
use campus_types::error::RepositoryError;

use super::SortOrder;

/// Filter criteria for listing courses.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Filter by exact credit weight.
    pub credits: Option<i32>,
    /// Substring match on the catalog code ("CS" matches "CS-101").
    pub code_contains: Option<String>,
    /// Field to sort by (e.g., "created_at", "code", "credits").
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

/// Repository trait for course persistence.
///
/// Implementations live in campus-infra (e.g., SqliteCourseRepository).
pub trait CourseRepository: Send + Sync {
    /// Create a new course. Returns the created course.
    fn create(
        &self,
        course: &Course,
    ) -> impl std::future::Future<Output = Result<Course, RepositoryError>> + Send;

    /// Get a course by its unique ID.
    fn get_by_id(
        &self,
        id: &CourseId,
    ) -> impl std::future::Future<Output = Result<Option<Course>, RepositoryError>> + Send;

    /// Get a course by its unique catalog code (exact match).
    fn get_by_code(
        &self,
        code: &str,
    ) -> impl std::future::Future<Output = Result<Option<Course>, RepositoryError>> + Send;

    /// List courses with optional filtering, sorting, and pagination.
    fn list(
        &self,
        filter: Option<CourseFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Course>, RepositoryError>> + Send;

    /// Update an existing course. Returns the updated course.
    fn update(
        &self,
        course: &Course,
    ) -> impl std::future::Future<Output = Result<Course, RepositoryError>> + Send;

    /// Permanently delete a course by ID. Enrollments cascade.
    fn delete(
        &self,
        id: &CourseId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
