//! Enrollment service.
//!
//! Orchestrates the student-course join relation: enrolling, dropping,
//! status changes, and the transcript/roster reports. Composes all three
//! repositories because every operation must verify both sides exist.

use serde::Serialize;

use campus_types::course::{Course, CourseId};
use campus_types::enrollment::{Enrollment, EnrollmentId, EnrollmentStatus};
use campus_types::error::{EnrollmentError, RepositoryError};
use campus_types::student::{Student, StudentId};

use crate::repository::course::CourseRepository;
use crate::repository::enrollment::EnrollmentRepository;
use crate::repository::student::StudentRepository;

/// An enrollment together with the two parties it links.
///
/// Returned from `enroll` so the API can name the student and course in
/// its confirmation without a second round of lookups.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentConfirmation {
    pub enrollment: Enrollment,
    pub student: Student,
    pub course: Course,
}

/// A student and every course they are enrolled in.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub student: Student,
    pub courses: Vec<Course>,
}

/// A course and every student enrolled in it.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub course: Course,
    pub students: Vec<Student>,
}

/// Service orchestrating enrollments.
pub struct EnrollmentService<E, S, C>
where
    E: EnrollmentRepository,
    S: StudentRepository,
    C: CourseRepository,
{
    enrollment_repo: E,
    student_repo: S,
    course_repo: C,
}

impl<E, S, C> EnrollmentService<E, S, C>
where
    E: EnrollmentRepository,
    S: StudentRepository,
    C: CourseRepository,
{
    pub fn new(enrollment_repo: E, student_repo: S, course_repo: C) -> Self {
        Self {
            enrollment_repo,
            student_repo,
            course_repo,
        }
    }

    /// Enroll a student in a course.
    ///
    /// Rejects a duplicate (student, course) pair and verifies both parties
    /// exist before inserting the relation.
    pub async fn enroll(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<EnrollmentConfirmation, EnrollmentError> {
        let existing = self
            .enrollment_repo
            .find(student_id, course_id)
            .await
            .map_err(storage)?;
        if existing.is_some() {
            return Err(EnrollmentError::AlreadyEnrolled);
        }

        let student = self
            .student_repo
            .get_by_id(student_id)
            .await
            .map_err(storage)?
            .ok_or(EnrollmentError::StudentNotFound)?;

        let course = self
            .course_repo
            .get_by_id(course_id)
            .await
            .map_err(storage)?
            .ok_or(EnrollmentError::CourseNotFound)?;

        let enrollment = Enrollment {
            id: EnrollmentId::new(),
            student_id: *student_id,
            course_id: *course_id,
            status: EnrollmentStatus::Active,
            enrolled_at: chrono::Utc::now(),
        };

        let enrollment = self
            .enrollment_repo
            .create(&enrollment)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => EnrollmentError::AlreadyEnrolled,
                other => EnrollmentError::StorageError(other.to_string()),
            })?;

        Ok(EnrollmentConfirmation {
            enrollment,
            student,
            course,
        })
    }

    /// Drop a student from a course (deletes the relation).
    pub async fn drop(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<(), EnrollmentError> {
        self.enrollment_repo
            .delete(student_id, course_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => EnrollmentError::NotFound,
                other => EnrollmentError::StorageError(other.to_string()),
            })
    }

    /// Change the status of an existing enrollment.
    pub async fn set_status(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, EnrollmentError> {
        self.enrollment_repo
            .set_status(student_id, course_id, status)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => EnrollmentError::NotFound,
                other => EnrollmentError::StorageError(other.to_string()),
            })
    }

    /// Transcript report: a student plus all courses they are enrolled in.
    pub async fn transcript(&self, student_id: &StudentId) -> Result<Transcript, EnrollmentError> {
        let student = self
            .student_repo
            .get_by_id(student_id)
            .await
            .map_err(storage)?
            .ok_or(EnrollmentError::StudentNotFound)?;

        let courses = self
            .enrollment_repo
            .courses_for_student(student_id)
            .await
            .map_err(storage)?;

        Ok(Transcript { student, courses })
    }

    /// Roster report: a course plus all students enrolled in it.
    pub async fn roster(&self, course_id: &CourseId) -> Result<Roster, EnrollmentError> {
        let course = self
            .course_repo
            .get_by_id(course_id)
            .await
            .map_err(storage)?
            .ok_or(EnrollmentError::CourseNotFound)?;

        let students = self
            .enrollment_repo
            .students_for_course(course_id)
            .await
            .map_err(storage)?;

        Ok(Roster { course, students })
    }
}

fn storage(e: RepositoryError) -> EnrollmentError {
    EnrollmentError::StorageError(e.to_string())
}
