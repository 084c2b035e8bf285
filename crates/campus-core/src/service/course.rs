//! Course catalog service.
//!
//! Orchestrates course creation, update, and deletion. Enforces catalog
//! rules: unique normalized code, credit weight in range.

use campus_types::course::{
    Course, CourseId, CreateCourseRequest, UpdateCourseRequest, credits_in_range,
    normalize_course_code,
};
use campus_types::error::CourseError;

use crate::repository::course::{CourseFilter, CourseRepository};

/// Service orchestrating the course catalog.
pub struct CourseService<R: CourseRepository> {
    repo: R,
}

impl<R: CourseRepository> CourseService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Add a course to the catalog.
    ///
    /// The code is normalized to its canonical uppercase form before the
    /// uniqueness check, so "cs-101" and "CS-101" are the same course.
    pub async fn create_course(&self, request: CreateCourseRequest) -> Result<Course, CourseError> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(CourseError::InvalidTitle("title cannot be empty".to_string()));
        }

        let code = normalize_course_code(&request.code);
        if code.is_empty() {
            return Err(CourseError::InvalidCode(
                "code must contain at least one non-whitespace character".to_string(),
            ));
        }

        if !credits_in_range(request.credits) {
            return Err(CourseError::InvalidCredits(request.credits));
        }

        let existing = self
            .repo
            .get_by_code(&code)
            .await
            .map_err(|e| CourseError::StorageError(e.to_string()))?;
        if existing.is_some() {
            return Err(CourseError::CodeConflict(code));
        }

        let now = chrono::Utc::now();
        let course = Course {
            id: CourseId::new(),
            code,
            title,
            credits: request.credits,
            schedule: request.schedule,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&course).await.map_err(|e| match e {
            campus_types::error::RepositoryError::Conflict(msg) => CourseError::CodeConflict(msg),
            other => CourseError::StorageError(other.to_string()),
        })
    }

    /// Get a course by ID.
    pub async fn get_course(&self, id: &CourseId) -> Result<Course, CourseError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| CourseError::StorageError(e.to_string()))?
            .ok_or(CourseError::NotFound)
    }

    /// Get a course by catalog code (normalized before lookup).
    pub async fn get_course_by_code(&self, code: &str) -> Result<Course, CourseError> {
        self.repo
            .get_by_code(&normalize_course_code(code))
            .await
            .map_err(|e| CourseError::StorageError(e.to_string()))?
            .ok_or(CourseError::NotFound)
    }

    /// List courses with optional filtering.
    pub async fn list_courses(
        &self,
        filter: Option<CourseFilter>,
    ) -> Result<Vec<Course>, CourseError> {
        self.repo
            .list(filter)
            .await
            .map_err(|e| CourseError::StorageError(e.to_string()))
    }

    /// Update a course's mutable fields.
    ///
    /// A changed code is normalized and re-checked for uniqueness.
    pub async fn update_course(
        &self,
        id: &CourseId,
        request: UpdateCourseRequest,
    ) -> Result<Course, CourseError> {
        let mut course = self.get_course(id).await?;

        if let Some(code) = request.code {
            let normalized = normalize_course_code(&code);
            if normalized.is_empty() {
                return Err(CourseError::InvalidCode(
                    "code must contain at least one non-whitespace character".to_string(),
                ));
            }
            if normalized != course.code {
                let existing = self
                    .repo
                    .get_by_code(&normalized)
                    .await
                    .map_err(|e| CourseError::StorageError(e.to_string()))?;
                if existing.is_some() {
                    return Err(CourseError::CodeConflict(normalized));
                }
            }
            course.code = normalized;
        }
        if let Some(title) = request.title {
            let trimmed = title.trim().to_string();
            if trimmed.is_empty() {
                return Err(CourseError::InvalidTitle("title cannot be empty".to_string()));
            }
            course.title = trimmed;
        }
        if let Some(credits) = request.credits {
            if !credits_in_range(credits) {
                return Err(CourseError::InvalidCredits(credits));
            }
            course.credits = credits;
        }
        if let Some(schedule) = request.schedule {
            course.schedule = schedule;
        }

        course.updated_at = chrono::Utc::now();

        // A concurrent insert can still trip the UNIQUE constraint after the
        // pre-check; surface it as the same conflict the create path reports.
        self.repo.update(&course).await.map_err(|e| match e {
            campus_types::error::RepositoryError::Conflict(msg) => CourseError::CodeConflict(msg),
            other => CourseError::StorageError(other.to_string()),
        })
    }

    /// Delete a course. Enrollments cascade at the database level.
    pub async fn delete_course(&self, id: &CourseId) -> Result<(), CourseError> {
        self.get_course(id).await?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| CourseError::StorageError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::course::CourseFilter;
    use crate::service::testing::{InMemoryCourseRepo, make_course};
    use campus_types::error::RepositoryError;

    fn service() -> CourseService<InMemoryCourseRepo> {
        CourseService::new(InMemoryCourseRepo::default())
    }

    fn request(code: &str) -> CreateCourseRequest {
        CreateCourseRequest {
            code: code.to_string(),
            title: "Databases".to_string(),
            credits: 4,
            schedule: "Tue 10:00-12:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_code() {
        let svc = service();
        let course = svc.create_course(request("cs 101")).await.unwrap();
        assert_eq!(course.code, "CS-101");
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected_case_insensitively() {
        let svc = service();
        svc.create_course(request("CS-101")).await.unwrap();
        let err = svc.create_course(request("cs-101")).await.unwrap_err();
        assert!(matches!(err, CourseError::CodeConflict(_)));
    }

    #[tokio::test]
    async fn test_credits_out_of_range_rejected() {
        let svc = service();
        let mut req = request("CS-101");
        req.credits = 0;
        let err = svc.create_course(req).await.unwrap_err();
        assert!(matches!(err, CourseError::InvalidCredits(0)));
    }

    #[tokio::test]
    async fn test_get_by_code_normalizes_lookup() {
        let svc = service();
        svc.create_course(request("MAT-203")).await.unwrap();
        let found = svc.get_course_by_code(" mat 203 ").await.unwrap();
        assert_eq!(found.code, "MAT-203");
    }

    #[tokio::test]
    async fn test_update_code_conflict() {
        let svc = service();
        svc.create_course(request("CS-101")).await.unwrap();
        let other = svc.create_course(request("CS-102")).await.unwrap();

        let err = svc
            .update_course(
                &other.id,
                UpdateCourseRequest {
                    code: Some("CS-101".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CourseError::CodeConflict(_)));
    }

    /// Repository where the conflicting row lands between the uniqueness
    /// pre-check and the write, as a concurrent insert would.
    struct RacingRepo {
        inner: InMemoryCourseRepo,
    }

    impl CourseRepository for RacingRepo {
        async fn create(&self, course: &Course) -> Result<Course, RepositoryError> {
            self.inner.create(course).await
        }

        async fn get_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
            self.inner.get_by_id(id).await
        }

        async fn get_by_code(&self, _code: &str) -> Result<Option<Course>, RepositoryError> {
            Ok(None)
        }

        async fn list(
            &self,
            filter: Option<CourseFilter>,
        ) -> Result<Vec<Course>, RepositoryError> {
            self.inner.list(filter).await
        }

        async fn update(&self, course: &Course) -> Result<Course, RepositoryError> {
            Err(RepositoryError::Conflict(course.code.clone()))
        }

        async fn delete(&self, id: &CourseId) -> Result<(), RepositoryError> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_update_unique_conflict_maps_to_code_conflict() {
        let inner = InMemoryCourseRepo::default();
        let course = inner.insert(make_course("CS-101"));
        let svc = CourseService::new(RacingRepo { inner });

        let err = svc
            .update_course(
                &course.id,
                UpdateCourseRequest {
                    code: Some("CS-202".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CourseError::CodeConflict(_)));
    }
}
