//! Query parameter extractors for list endpoints.

use serde::Deserialize;

/// Query parameters for the student list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct StudentListQuery {
    /// Filter by current semester (1-12).
    pub semester: Option<i32>,
    /// Sort by field.
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Sort order (asc, desc).
    #[serde(default = "default_order")]
    pub order: String,
    /// Maximum results.
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

/// Query parameters for the course list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct CourseListQuery {
    /// Filter by exact credit weight.
    pub credits: Option<i32>,
    /// Substring match on the catalog code.
    pub code: Option<String>,
    /// Sort by field.
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Sort order (asc, desc).
    #[serde(default = "default_order")]
    pub order: String,
    /// Maximum results.
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

fn default_sort() -> String {
    "created_at".to_string()
}

fn default_order() -> String {
    "desc".to_string()
}
