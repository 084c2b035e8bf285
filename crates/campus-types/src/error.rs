use thiserror::Error;

/// Errors related to student operations.
#[derive(Debug, Error)]
pub enum StudentError {
    #[error("student not found")]
    NotFound,

    #[error("national id '{0}' is already registered")]
    NationalIdConflict(String),

    #[error("invalid semester: {0} (must be between 1 and 12)")]
    InvalidSemester(i32),

    #[error("invalid student name: {0}")]
    InvalidName(String),

    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to course operations.
#[derive(Debug, Error)]
pub enum CourseError {
    #[error("course not found")]
    NotFound,

    #[error("course code '{0}' already exists")]
    CodeConflict(String),

    #[error("invalid credits: {0} (must be between 1 and 10)")]
    InvalidCredits(i32),

    #[error("invalid course title: {0}")]
    InvalidTitle(String),

    #[error("invalid course code: {0}")]
    InvalidCode(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to enrollment operations.
#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("enrollment not found")]
    NotFound,

    #[error("student is already enrolled in this course")]
    AlreadyEnrolled,

    #[error("student not found")]
    StudentNotFound,

    #[error("course not found")]
    CourseNotFound,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in campus-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_error_display() {
        let err = StudentError::NationalIdConflict("1002003004".to_string());
        assert_eq!(
            err.to_string(),
            "national id '1002003004' is already registered"
        );
    }

    #[test]
    fn test_course_error_display() {
        let err = CourseError::InvalidCredits(11);
        assert!(err.to_string().contains("11"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
