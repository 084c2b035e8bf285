//! SQLite enrollment repository implementation.
//!
//! Implements `EnrollmentRepository` from `campus-core`. The transcript and
//! roster queries JOIN through the enrollments table so the relation is
//! resolved in a single round trip.

use campus_core::repository::enrollment::EnrollmentRepository;
use campus_types::course::{Course, CourseId};
use campus_types::enrollment::{Enrollment, EnrollmentId, EnrollmentStatus};
use campus_types::error::RepositoryError;
use campus_types::student::{Student, StudentId};
use sqlx::Row;

use super::pool::DatabasePool;
use super::student::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `EnrollmentRepository`.
pub struct SqliteEnrollmentRepository {
    pool: DatabasePool,
}

impl SqliteEnrollmentRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Enrollment.
struct EnrollmentRow {
    id: String,
    student_id: String,
    course_id: String,
    status: String,
    enrolled_at: String,
}

impl EnrollmentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            student_id: row.try_get("student_id")?,
            course_id: row.try_get("course_id")?,
            status: row.try_get("status")?,
            enrolled_at: row.try_get("enrolled_at")?,
        })
    }

    fn into_enrollment(self) -> Result<Enrollment, RepositoryError> {
        let id = self
            .id
            .parse::<EnrollmentId>()
            .map_err(|e| RepositoryError::Query(format!("invalid enrollment id: {e}")))?;
        let student_id = self
            .student_id
            .parse::<StudentId>()
            .map_err(|e| RepositoryError::Query(format!("invalid student id: {e}")))?;
        let course_id = self
            .course_id
            .parse::<CourseId>()
            .map_err(|e| RepositoryError::Query(format!("invalid course id: {e}")))?;
        let status: EnrollmentStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(Enrollment {
            id,
            student_id,
            course_id,
            status,
            enrolled_at: parse_datetime(&self.enrolled_at)?,
        })
    }
}

fn student_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Student, RepositoryError> {
    let map = |e: sqlx::Error| RepositoryError::Query(e.to_string());
    let id: String = row.try_get("id").map_err(map)?;
    let created_at: String = row.try_get("created_at").map_err(map)?;
    let updated_at: String = row.try_get("updated_at").map_err(map)?;
    let semester: i64 = row.try_get("semester").map_err(map)?;

    Ok(Student {
        id: id
            .parse::<StudentId>()
            .map_err(|e| RepositoryError::Query(format!("invalid student id: {e}")))?,
        national_id: row.try_get("national_id").map_err(map)?,
        full_name: row.try_get("full_name").map_err(map)?,
        email: row.try_get("email").map_err(map)?,
        semester: semester as i32,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

fn course_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Course, RepositoryError> {
    let map = |e: sqlx::Error| RepositoryError::Query(e.to_string());
    let id: String = row.try_get("id").map_err(map)?;
    let created_at: String = row.try_get("created_at").map_err(map)?;
    let updated_at: String = row.try_get("updated_at").map_err(map)?;
    let credits: i64 = row.try_get("credits").map_err(map)?;

    Ok(Course {
        id: id
            .parse::<CourseId>()
            .map_err(|e| RepositoryError::Query(format!("invalid course id: {e}")))?,
        code: row.try_get("code").map_err(map)?,
        title: row.try_get("title").map_err(map)?,
        credits: credits as i32,
        schedule: row.try_get("schedule").map_err(map)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl EnrollmentRepository for SqliteEnrollmentRepository {
    async fn create(&self, enrollment: &Enrollment) -> Result<Enrollment, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO enrollments (id, student_id, course_id, status, enrolled_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(enrollment.id.to_string())
        .bind(enrollment.student_id.to_string())
        .bind(enrollment.course_id.to_string())
        .bind(enrollment.status.to_string())
        .bind(format_datetime(&enrollment.enrolled_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(enrollment.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict("student is already enrolled in this course".to_string()),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn find(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM enrollments WHERE student_id = ? AND course_id = ?")
            .bind(student_id.to_string())
            .bind(course_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let enrollment_row = EnrollmentRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(enrollment_row.into_enrollment()?))
            }
            None => Ok(None),
        }
    }

    async fn courses_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Course>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT c.* FROM courses c
             JOIN enrollments e ON e.course_id = c.id
             WHERE e.student_id = ?
             ORDER BY c.code",
        )
        .bind(student_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(course_from_row).collect()
    }

    async fn students_for_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<Student>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT s.* FROM students s
             JOIN enrollments e ON e.student_id = s.id
             WHERE e.course_id = ?
             ORDER BY s.national_id",
        )
        .bind(course_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(student_from_row).collect()
    }

    async fn set_status(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, RepositoryError> {
        let result = sqlx::query(
            "UPDATE enrollments SET status = ? WHERE student_id = ? AND course_id = ?",
        )
        .bind(status.to_string())
        .bind(student_id.to_string())
        .bind(course_id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.find(student_id, course_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM enrollments WHERE student_id = ? AND course_id = ?")
                .bind(student_id.to_string())
                .bind(course_id.to_string())
                .execute(&self.pool.writer)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::course::SqliteCourseRepository;
    use crate::sqlite::pool::DatabasePool;
    use crate::sqlite::student::SqliteStudentRepository;
    use campus_core::repository::course::CourseRepository;
    use campus_core::repository::student::StudentRepository;
    use chrono::Utc;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_student(national_id: &str) -> Student {
        let now = Utc::now();
        Student {
            id: StudentId::new(),
            national_id: national_id.to_string(),
            full_name: format!("Student {national_id}"),
            email: format!("s{national_id}@uni.edu"),
            semester: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn make_course(code: &str) -> Course {
        let now = Utc::now();
        Course {
            id: CourseId::new(),
            code: code.to_string(),
            title: format!("Course {code}"),
            credits: 3,
            schedule: "Mon 08:00-10:00".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn make_enrollment(student: &Student, course: &Course) -> Enrollment {
        Enrollment {
            id: EnrollmentId::new(),
            student_id: student.id,
            course_id: course.id,
            status: EnrollmentStatus::Active,
            enrolled_at: Utc::now(),
        }
    }

    /// Insert a student and a course, returning all three repositories.
    async fn seed(
        pool: &DatabasePool,
    ) -> (
        SqliteEnrollmentRepository,
        SqliteStudentRepository,
        SqliteCourseRepository,
        Student,
        Course,
    ) {
        let students = SqliteStudentRepository::new(pool.clone());
        let courses = SqliteCourseRepository::new(pool.clone());
        let enrollments = SqliteEnrollmentRepository::new(pool.clone());

        let student = students.create(&make_student("1001")).await.unwrap();
        let course = courses.create(&make_course("CS-101")).await.unwrap();

        (enrollments, students, courses, student, course)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let (repo, _, _, student, course) = seed(&pool).await;

        let enrollment = make_enrollment(&student, &course);
        repo.create(&enrollment).await.unwrap();

        let found = repo.find(&student.id, &course.id).await.unwrap().unwrap();
        assert_eq!(found.id, enrollment.id);
        assert_eq!(found.status, EnrollmentStatus::Active);
    }

    #[tokio::test]
    async fn test_duplicate_pair_conflict() {
        let pool = test_pool().await;
        let (repo, _, _, student, course) = seed(&pool).await;

        repo.create(&make_enrollment(&student, &course)).await.unwrap();
        let err = repo
            .create(&make_enrollment(&student, &course))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_join_queries() {
        let pool = test_pool().await;
        let (repo, students, courses, student, course) = seed(&pool).await;

        let second_course = courses.create(&make_course("MAT-203")).await.unwrap();
        let second_student = students.create(&make_student("1002")).await.unwrap();

        repo.create(&make_enrollment(&student, &course)).await.unwrap();
        repo.create(&make_enrollment(&student, &second_course))
            .await
            .unwrap();
        repo.create(&make_enrollment(&second_student, &course))
            .await
            .unwrap();

        let transcript = repo.courses_for_student(&student.id).await.unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].code, "CS-101"); // ordered by code

        let roster = repo.students_for_course(&course.id).await.unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].national_id, "1001"); // ordered by national_id
    }

    #[tokio::test]
    async fn test_set_status() {
        let pool = test_pool().await;
        let (repo, _, _, student, course) = seed(&pool).await;

        repo.create(&make_enrollment(&student, &course)).await.unwrap();
        let updated = repo
            .set_status(&student.id, &course.id, EnrollmentStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, EnrollmentStatus::Completed);
    }

    #[tokio::test]
    async fn test_delete_and_missing_delete() {
        let pool = test_pool().await;
        let (repo, _, _, student, course) = seed(&pool).await;

        repo.create(&make_enrollment(&student, &course)).await.unwrap();
        repo.delete(&student.id, &course.id).await.unwrap();

        let err = repo.delete(&student.id, &course.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_cascade_on_student_delete() {
        let pool = test_pool().await;
        let (repo, students, _, student, course) = seed(&pool).await;

        repo.create(&make_enrollment(&student, &course)).await.unwrap();
        students.delete(&student.id).await.unwrap();

        let found = repo.find(&student.id, &course.id).await.unwrap();
        assert!(found.is_none(), "enrollment should cascade with the student");
    }

    #[tokio::test]
    async fn test_cascade_on_course_delete() {
        let pool = test_pool().await;
        let (repo, _, courses, student, course) = seed(&pool).await;

        repo.create(&make_enrollment(&student, &course)).await.unwrap();
        courses.delete(&course.id).await.unwrap();

        let roster = repo.students_for_course(&course.id).await.unwrap();
        assert!(roster.is_empty());
        let found = repo.find(&student.id, &course.id).await.unwrap();
        assert!(found.is_none(), "enrollment should cascade with the course");
    }
}
