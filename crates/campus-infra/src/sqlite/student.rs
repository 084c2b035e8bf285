//! SQLite student repository implementation.
//!
//! Implements `StudentRepository` from `campus-core` using sqlx with split
//! read/write pools.

use campus_core::repository::SortOrder;
use campus_core::repository::student::{StudentFilter, StudentRepository};
use campus_types::error::RepositoryError;
use campus_types::student::{Student, StudentId};
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `StudentRepository`.
pub struct SqliteStudentRepository {
    pool: DatabasePool,
}

impl SqliteStudentRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Student.
struct StudentRow {
    id: String,
    national_id: String,
    full_name: String,
    email: String,
    semester: i64,
    created_at: String,
    updated_at: String,
}

impl StudentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            national_id: row.try_get("national_id")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            semester: row.try_get("semester")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_student(self) -> Result<Student, RepositoryError> {
        let id = self
            .id
            .parse::<StudentId>()
            .map_err(|e| RepositoryError::Query(format!("invalid student id: {e}")))?;

        Ok(Student {
            id,
            national_id: self.national_id,
            full_name: self.full_name,
            email: self.email,
            semester: self.semester as i32,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

pub(super) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(super) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl StudentRepository for SqliteStudentRepository {
    async fn create(&self, student: &Student) -> Result<Student, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO students (id, national_id, full_name, email, semester, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(student.id.to_string())
        .bind(&student.national_id)
        .bind(&student.full_name)
        .bind(&student.email)
        .bind(student.semester)
        .bind(format_datetime(&student.created_at))
        .bind(format_datetime(&student.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(student.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "national id '{}' is already registered",
                    student.national_id
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM students WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let student_row = StudentRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(student_row.into_student()?))
            }
            None => Ok(None),
        }
    }

    async fn get_by_national_id(
        &self,
        national_id: &str,
    ) -> Result<Option<Student>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM students WHERE national_id = ?")
            .bind(national_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let student_row = StudentRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(student_row.into_student()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, filter: Option<StudentFilter>) -> Result<Vec<Student>, RepositoryError> {
        let mut sql = String::from("SELECT * FROM students");
        let filter = filter.unwrap_or_default();

        if let Some(semester) = filter.semester {
            sql.push_str(&format!(" WHERE semester = {semester}"));
        }

        // Whitelist allowed sort fields to prevent SQL injection
        let sort_field = filter.sort_by.as_deref().unwrap_or("created_at");
        let safe_sort = match sort_field {
            "national_id" | "full_name" | "email" | "semester" | "created_at" | "updated_at" => {
                sort_field
            }
            _ => "created_at",
        };
        let order = match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        sql.push_str(&format!(" ORDER BY {safe_sort} {order}"));

        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = filter.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut students = Vec::with_capacity(rows.len());
        for row in &rows {
            let student_row =
                StudentRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            students.push(student_row.into_student()?);
        }

        Ok(students)
    }

    async fn update(&self, student: &Student) -> Result<Student, RepositoryError> {
        let result = sqlx::query(
            "UPDATE students SET national_id = ?, full_name = ?, email = ?, semester = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&student.national_id)
        .bind(&student.full_name)
        .bind(&student.email)
        .bind(student.semester)
        .bind(format_datetime(&student.updated_at))
        .bind(student.id.to_string())
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(r) if r.rows_affected() == 0 => Err(RepositoryError::NotFound),
            Ok(_) => Ok(student.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "national id '{}' is already registered",
                    student.national_id
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn delete(&self, id: &StudentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id.to_string())
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
    use crate::sqlite::pool::DatabasePool;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_student(national_id: &str, semester: i32) -> Student {
        let now = Utc::now();
        Student {
            id: StudentId::new(),
            national_id: national_id.to_string(),
            full_name: format!("Student {national_id}"),
            email: format!("s{national_id}@uni.edu"),
            semester,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let pool = test_pool().await;
        let repo = SqliteStudentRepository::new(pool);
        let student = make_student("1001", 3);

        let created = repo.create(&student).await.unwrap();
        assert_eq!(created.national_id, "1001");

        let found = repo.get_by_id(&student.id).await.unwrap().unwrap();
        assert_eq!(found.full_name, "Student 1001");
        assert_eq!(found.semester, 3);
    }

    #[tokio::test]
    async fn test_get_by_national_id() {
        let pool = test_pool().await;
        let repo = SqliteStudentRepository::new(pool);
        let student = make_student("1002", 1);

        repo.create(&student).await.unwrap();

        let found = repo.get_by_national_id("1002").await.unwrap().unwrap();
        assert_eq!(found.id, student.id);
    }

    #[tokio::test]
    async fn test_list_with_semester_filter_and_pagination() {
        let pool = test_pool().await;
        let repo = SqliteStudentRepository::new(pool);

        repo.create(&make_student("1001", 1)).await.unwrap();
        repo.create(&make_student("1002", 2)).await.unwrap();
        repo.create(&make_student("1003", 2)).await.unwrap();

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let second_semester = repo
            .list(Some(StudentFilter {
                semester: Some(2),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(second_semester.len(), 2);

        let page = repo
            .list(Some(StudentFilter {
                sort_by: Some("national_id".to_string()),
                sort_order: Some(SortOrder::Asc),
                limit: Some(1),
                offset: Some(1),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].national_id, "1002");
    }

    #[tokio::test]
    async fn test_update() {
        let pool = test_pool().await;
        let repo = SqliteStudentRepository::new(pool);
        let mut student = make_student("1001", 1);

        repo.create(&student).await.unwrap();

        student.semester = 2;
        student.email = "new@uni.edu".to_string();
        student.updated_at = Utc::now();
        repo.update(&student).await.unwrap();

        let found = repo.get_by_id(&student.id).await.unwrap().unwrap();
        assert_eq!(found.semester, 2);
        assert_eq!(found.email, "new@uni.edu");
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let repo = SqliteStudentRepository::new(pool);
        let student = make_student("1001", 1);

        repo.create(&student).await.unwrap();
        repo.delete(&student.id).await.unwrap();

        let found = repo.get_by_id(&student.id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_national_id_conflict() {
        let pool = test_pool().await;
        let repo = SqliteStudentRepository::new(pool);

        repo.create(&make_student("1001", 1)).await.unwrap();
        let mut second = make_student("1002", 1);
        repo.create(&second).await.unwrap();

        second.national_id = "1001".to_string();
        let err = repo.update(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_national_id_conflict() {
        let pool = test_pool().await;
        let repo = SqliteStudentRepository::new(pool);
        let first = make_student("1001", 1);
        let mut second = make_student("1001", 2);
        second.id = StudentId::new();

        repo.create(&first).await.unwrap();
        let err = repo.create(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_nonexistent() {
        let pool = test_pool().await;
        let repo = SqliteStudentRepository::new(pool);

        let err = repo.delete(&StudentId::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
