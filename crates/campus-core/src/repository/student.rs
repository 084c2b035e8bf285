//! Student repository trait definition.

use campus_types::error::RepositoryError;
use campus_types::student::{Student, StudentId};

use super::SortOrder;

/// Filter criteria for listing students.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Filter by current semester (1-12).
    pub semester: Option<i32>,
    /// Field to sort by (e.g., "created_at", "full_name", "semester").
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

/// Repository trait for student persistence.
///
/// Implementations live in campus-infra (e.g., SqliteStudentRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait StudentRepository: Send + Sync {
    /// Create a new student. Returns the created student.
    fn create(
        &self,
        student: &Student,
    ) -> impl std::future::Future<Output = Result<Student, RepositoryError>> + Send;

    /// Get a student by its unique ID.
    fn get_by_id(
        &self,
        id: &StudentId,
    ) -> impl std::future::Future<Output = Result<Option<Student>, RepositoryError>> + Send;

    /// Get a student by its unique national ID.
    fn get_by_national_id(
        &self,
        national_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Student>, RepositoryError>> + Send;

    /// List students with optional filtering, sorting, and pagination.
    fn list(
        &self,
        filter: Option<StudentFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Student>, RepositoryError>> + Send;

    /// Update an existing student. Returns the updated student.
    fn update(
        &self,
        student: &Student,
    ) -> impl std::future::Future<Output = Result<Student, RepositoryError>> + Send;

    /// Permanently delete a student by ID. Enrollments cascade.
    fn delete(
        &self,
        id: &StudentId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
