//! Enrollment repository trait definition.

use campus_types::course::{Course, CourseId};
use campus_types::enrollment::{Enrollment, EnrollmentStatus};
use campus_types::error::RepositoryError;
use campus_types::student::{Student, StudentId};

/// Repository trait for the student-course join relation.
///
/// The (student_id, course_id) pair is unique; `create` surfaces a
/// duplicate as `RepositoryError::Conflict`.
pub trait EnrollmentRepository: Send + Sync {
    /// Create a new enrollment. Returns the created enrollment.
    fn create(
        &self,
        enrollment: &Enrollment,
    ) -> impl std::future::Future<Output = Result<Enrollment, RepositoryError>> + Send;

    /// Find the enrollment linking a student and a course, if any.
    fn find(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> impl std::future::Future<Output = Result<Option<Enrollment>, RepositoryError>> + Send;

    /// All courses a student is enrolled in (JOIN through enrollments).
    fn courses_for_student(
        &self,
        student_id: &StudentId,
    ) -> impl std::future::Future<Output = Result<Vec<Course>, RepositoryError>> + Send;

    /// All students enrolled in a course (JOIN through enrollments).
    fn students_for_course(
        &self,
        course_id: &CourseId,
    ) -> impl std::future::Future<Output = Result<Vec<Student>, RepositoryError>> + Send;

    /// Change the status of an existing enrollment.
    fn set_status(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
        status: EnrollmentStatus,
    ) -> impl std::future::Future<Output = Result<Enrollment, RepositoryError>> + Send;

    /// Delete the enrollment linking a student and a course.
    fn delete(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
