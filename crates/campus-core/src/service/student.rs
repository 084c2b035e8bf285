//! Student management service.
//!
//! Orchestrates student creation, update, and deletion. Enforces the
//! admission rules: unique national ID, semester in range, plausible email.

use campus_types::error::StudentError;
use campus_types::student::{
    CreateStudentRequest, Student, StudentId, UpdateStudentRequest, email_is_plausible,
    semester_in_range,
};

use crate::repository::student::{StudentFilter, StudentRepository};

/// Service orchestrating the student lifecycle.
///
/// Generic over the repository trait to maintain clean architecture --
/// campus-core never depends on campus-infra.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new student.
    ///
    /// Validates the name, email, and semester range, then rejects a
    /// national ID that is already on file.
    pub async fn create_student(
        &self,
        request: CreateStudentRequest,
    ) -> Result<Student, StudentError> {
        let full_name = request.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(StudentError::InvalidName("name cannot be empty".to_string()));
        }

        let national_id = request.national_id.trim().to_string();
        if national_id.is_empty() {
            return Err(StudentError::InvalidName(
                "national id cannot be empty".to_string(),
            ));
        }

        if !email_is_plausible(&request.email) {
            return Err(StudentError::InvalidEmail(request.email));
        }

        if !semester_in_range(request.semester) {
            return Err(StudentError::InvalidSemester(request.semester));
        }

        // Reject a national ID that is already registered before hitting
        // the UNIQUE constraint, so the caller gets the specific error.
        let existing = self
            .repo
            .get_by_national_id(&national_id)
            .await
            .map_err(|e| StudentError::StorageError(e.to_string()))?;
        if existing.is_some() {
            return Err(StudentError::NationalIdConflict(national_id));
        }

        let now = chrono::Utc::now();
        let student = Student {
            id: StudentId::new(),
            national_id,
            full_name,
            email: request.email,
            semester: request.semester,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&student).await.map_err(|e| match e {
            campus_types::error::RepositoryError::Conflict(msg) => {
                StudentError::NationalIdConflict(msg)
            }
            other => StudentError::StorageError(other.to_string()),
        })
    }

    /// Get a student by ID.
    pub async fn get_student(&self, id: &StudentId) -> Result<Student, StudentError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| StudentError::StorageError(e.to_string()))?
            .ok_or(StudentError::NotFound)
    }

    /// Get a student by national ID.
    pub async fn get_student_by_national_id(
        &self,
        national_id: &str,
    ) -> Result<Student, StudentError> {
        self.repo
            .get_by_national_id(national_id)
            .await
            .map_err(|e| StudentError::StorageError(e.to_string()))?
            .ok_or(StudentError::NotFound)
    }

    /// List students with optional filtering.
    pub async fn list_students(
        &self,
        filter: Option<StudentFilter>,
    ) -> Result<Vec<Student>, StudentError> {
        self.repo
            .list(filter)
            .await
            .map_err(|e| StudentError::StorageError(e.to_string()))
    }

    /// Update a student's mutable fields.
    ///
    /// A changed national ID is re-checked for uniqueness.
    pub async fn update_student(
        &self,
        id: &StudentId,
        request: UpdateStudentRequest,
    ) -> Result<Student, StudentError> {
        let mut student = self.get_student(id).await?;

        if let Some(national_id) = request.national_id {
            let trimmed = national_id.trim().to_string();
            if trimmed.is_empty() {
                return Err(StudentError::InvalidName(
                    "national id cannot be empty".to_string(),
                ));
            }
            if trimmed != student.national_id {
                let existing = self
                    .repo
                    .get_by_national_id(&trimmed)
                    .await
                    .map_err(|e| StudentError::StorageError(e.to_string()))?;
                if existing.is_some() {
                    return Err(StudentError::NationalIdConflict(trimmed));
                }
            }
            student.national_id = trimmed;
        }
        if let Some(full_name) = request.full_name {
            let trimmed = full_name.trim().to_string();
            if trimmed.is_empty() {
                return Err(StudentError::InvalidName("name cannot be empty".to_string()));
            }
            student.full_name = trimmed;
        }
        if let Some(email) = request.email {
            if !email_is_plausible(&email) {
                return Err(StudentError::InvalidEmail(email));
            }
            student.email = email;
        }
        if let Some(semester) = request.semester {
            if !semester_in_range(semester) {
                return Err(StudentError::InvalidSemester(semester));
            }
            student.semester = semester;
        }

        student.updated_at = chrono::Utc::now();

        // A concurrent insert can still trip the UNIQUE constraint after the
        // pre-check; surface it as the same conflict the create path reports.
        self.repo.update(&student).await.map_err(|e| match e {
            campus_types::error::RepositoryError::Conflict(msg) => {
                StudentError::NationalIdConflict(msg)
            }
            other => StudentError::StorageError(other.to_string()),
        })
    }

    /// Delete a student. Enrollments cascade at the database level.
    pub async fn delete_student(&self, id: &StudentId) -> Result<(), StudentError> {
        // Surface NotFound before the delete so callers get a 404.
        self.get_student(id).await?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| StudentError::StorageError(e.to_string()))
    }
}
