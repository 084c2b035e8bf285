//! SQLite course repository implementation.
//!
//! Implements `CourseRepository` from `campus-core` using sqlx with split
//! read/write pools. Follows the same patterns as `SqliteStudentRepository`:
//! raw queries, private Row structs, split reader/writer pool usage.

use campus_core::repository::SortOrder;
use campus_core::repository::course::{CourseFilter, CourseRepository};
use campus_types::course::{Course, CourseId};
use campus_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::student::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `CourseRepository`.
pub struct SqliteCourseRepository {
    pool: DatabasePool,
}

impl SqliteCourseRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Course.
struct CourseRow {
    id: String,
    code: String,
    title: String,
    credits: i64,
    schedule: String,
    created_at: String,
    updated_at: String,
}

impl CourseRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            code: row.try_get("code")?,
            title: row.try_get("title")?,
            credits: row.try_get("credits")?,
            schedule: row.try_get("schedule")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_course(self) -> Result<Course, RepositoryError> {
        let id = self
            .id
            .parse::<CourseId>()
            .map_err(|e| RepositoryError::Query(format!("invalid course id: {e}")))?;

        Ok(Course {
            id,
            code: self.code,
            title: self.title,
            credits: self.credits as i32,
            schedule: self.schedule,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

impl CourseRepository for SqliteCourseRepository {
    async fn create(&self, course: &Course) -> Result<Course, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO courses (id, code, title, credits, schedule, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(course.id.to_string())
        .bind(&course.code)
        .bind(&course.title)
        .bind(course.credits)
        .bind(&course.schedule)
        .bind(format_datetime(&course.created_at))
        .bind(format_datetime(&course.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(course.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "course code '{}' already exists",
                    course.code
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM courses WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let course_row =
                    CourseRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(course_row.into_course()?))
            }
            None => Ok(None),
        }
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Course>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM courses WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let course_row =
                    CourseRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(course_row.into_course()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, filter: Option<CourseFilter>) -> Result<Vec<Course>, RepositoryError> {
        let mut sql = String::from("SELECT * FROM courses");
        let mut conditions: Vec<String> = Vec::new();
        let filter = filter.unwrap_or_default();

        if let Some(credits) = filter.credits {
            conditions.push(format!("credits = {credits}"));
        }
        // The code substring comes from user input, so it is bound rather
        // than formatted into the SQL.
        if filter.code_contains.is_some() {
            conditions.push("code LIKE ? ESCAPE '\\'".to_string());
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        // Whitelist allowed sort fields to prevent SQL injection
        let sort_field = filter.sort_by.as_deref().unwrap_or("created_at");
        let safe_sort = match sort_field {
            "code" | "title" | "credits" | "created_at" | "updated_at" => sort_field,
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

        let mut query = sqlx::query(&sql);
        if let Some(sub) = &filter.code_contains {
            // Escape the escape character first so user backslashes stay literal
            let escaped = sub
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            query = query.bind(format!("%{escaped}%"));
        }

        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut courses = Vec::with_capacity(rows.len());
        for row in &rows {
            let course_row =
                CourseRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            courses.push(course_row.into_course()?);
        }

        Ok(courses)
    }

    async fn update(&self, course: &Course) -> Result<Course, RepositoryError> {
        let result = sqlx::query(
            "UPDATE courses SET code = ?, title = ?, credits = ?, schedule = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&course.code)
        .bind(&course.title)
        .bind(course.credits)
        .bind(&course.schedule)
        .bind(format_datetime(&course.updated_at))
        .bind(course.id.to_string())
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(r) if r.rows_affected() == 0 => Err(RepositoryError::NotFound),
            Ok(_) => Ok(course.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "course code '{}' already exists",
                    course.code
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn delete(&self, id: &CourseId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
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
