use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Credit weight a course may carry (inclusive).
pub const MIN_CREDITS: i32 = 1;
pub const MAX_CREDITS: i32 = 10;

/// Unique identifier for a course, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(pub Uuid);

impl CourseId {
    /// Create a new CourseId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a CourseId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CourseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A catalog course offering.
///
/// Courses are identified externally by a short uppercase code ("CS-101")
/// unique across the catalog, and carry a credit weight between 1 and 10.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Catalog code, unique, stored uppercase ("CS-101").
    pub code: String,
    /// Human-readable course title.
    pub title: String,
    /// Credit weight (1-10).
    pub credits: i32,
    /// Freeform meeting schedule ("Mon 08:00-10:00").
    pub schedule: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new course. All fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
    pub credits: i32,
    pub schedule: String,
}

/// Request to update a course. All fields are optional; omitted fields
/// keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub code: Option<String>,
    pub title: Option<String>,
    pub credits: Option<i32>,
    pub schedule: Option<String>,
}

/// Check that a credit weight falls in the allowed 1-10 range.
pub fn credits_in_range(credits: i32) -> bool {
    (MIN_CREDITS..=MAX_CREDITS).contains(&credits)
}

/// Normalize a course code to its canonical catalog form.
///
/// Rules:
/// - Trim surrounding whitespace
/// - Uppercase
/// - Collapse interior whitespace runs into a single hyphen
///
/// # Examples
///
/// ```
/// use campus_types::course::normalize_course_code;
///
/// assert_eq!(normalize_course_code("cs-101"), "CS-101");
/// assert_eq!(normalize_course_code("  mat 203 "), "MAT-203");
/// ```
pub fn normalize_course_code(code: &str) -> String {
    let mut result = String::with_capacity(code.len());
    let mut prev_was_space = false;
    for c in code.trim().chars() {
        if c.is_whitespace() {
            prev_was_space = true;
        } else {
            if prev_was_space && !result.is_empty() {
                result.push('-');
            }
            prev_was_space = false;
            result.extend(c.to_uppercase());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credits_range() {
        assert!(credits_in_range(1));
        assert!(credits_in_range(10));
        assert!(!credits_in_range(0));
        assert!(!credits_in_range(11));
    }

    #[test]
    fn test_normalize_course_code() {
        assert_eq!(normalize_course_code("phys  110"), "PHYS-110");
        assert_eq!(normalize_course_code("CS-101"), "CS-101");
        assert_eq!(normalize_course_code(" db2 "), "DB2");
    }

    #[test]
    fn test_course_id_roundtrip() {
        let id = CourseId::new();
        let parsed: CourseId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
