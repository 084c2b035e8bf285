//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use campus_types::error::{CourseError, EnrollmentError, StudentError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Student-related errors.
    Student(StudentError),
    /// Course-related errors.
    Course(CourseError),
    /// Enrollment-related errors.
    Enrollment(EnrollmentError),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<StudentError> for AppError {
    fn from(e: StudentError) -> Self {
        AppError::Student(e)
    }
}

impl From<CourseError> for AppError {
    fn from(e: CourseError) -> Self {
        AppError::Course(e)
    }
}

impl From<EnrollmentError> for AppError {
    fn from(e: EnrollmentError) -> Self {
        AppError::Enrollment(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::Student(StudentError::NotFound) => {
                ("STUDENT_NOT_FOUND", "Student not found".to_string())
            }
            AppError::Student(StudentError::NationalIdConflict(id)) => (
                "NATIONAL_ID_CONFLICT",
                format!("National id '{id}' is already registered"),
            ),
            AppError::Student(
                e @ (StudentError::InvalidSemester(_)
                | StudentError::InvalidName(_)
                | StudentError::InvalidEmail(_)),
            ) => ("VALIDATION_ERROR", e.to_string()),
            AppError::Student(e) => ("STUDENT_ERROR", e.to_string()),
            AppError::Course(CourseError::NotFound) => {
                ("COURSE_NOT_FOUND", "Course not found".to_string())
            }
            AppError::Course(CourseError::CodeConflict(code)) => (
                "COURSE_CODE_CONFLICT",
                format!("Course code '{code}' already exists"),
            ),
            AppError::Course(
                e @ (CourseError::InvalidCredits(_)
                | CourseError::InvalidTitle(_)
                | CourseError::InvalidCode(_)),
            ) => ("VALIDATION_ERROR", e.to_string()),
            AppError::Course(e) => ("COURSE_ERROR", e.to_string()),
            AppError::Enrollment(EnrollmentError::NotFound) => {
                ("ENROLLMENT_NOT_FOUND", "Enrollment not found".to_string())
            }
            AppError::Enrollment(EnrollmentError::AlreadyEnrolled) => (
                "ALREADY_ENROLLED",
                "Student is already enrolled in this course".to_string(),
            ),
            AppError::Enrollment(EnrollmentError::StudentNotFound) => {
                ("STUDENT_NOT_FOUND", "Student not found".to_string())
            }
            AppError::Enrollment(EnrollmentError::CourseNotFound) => {
                ("COURSE_NOT_FOUND", "Course not found".to_string())
            }
            AppError::Enrollment(e) => ("ENROLLMENT_ERROR", e.to_string()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        ApiResponse::<serde_json::Value>::error(code, &message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404() {
        let resp = AppError::Student(StudentError::NotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::Enrollment(EnrollmentError::CourseNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflicts_map_to_409() {
        let resp =
            AppError::Course(CourseError::CodeConflict("CS-101".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = AppError::Enrollment(EnrollmentError::AlreadyEnrolled).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let resp = AppError::Student(StudentError::InvalidSemester(13)).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_errors_map_to_500() {
        let resp =
            AppError::Student(StudentError::StorageError("disk full".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
