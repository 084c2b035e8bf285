use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Semesters a student may be registered in (inclusive).
pub const MIN_SEMESTER: i32 = 1;
pub const MAX_SEMESTER: i32 = 12;

/// Unique identifier for a student, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub Uuid);

impl StudentId {
    /// Create a new StudentId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a StudentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A registered student.
///
/// Students are identified externally by their national ID document number
/// (unique across the system) and internally by a UUID. A student sits in
/// exactly one semester at a time, between 1 and 12.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    /// National ID document number, unique per student.
    pub national_id: String,
    /// Freeform display name.
    pub full_name: String,
    /// Contact email address.
    pub email: String,
    /// Current semester (1-12).
    pub semester: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new student. All fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub national_id: String,
    pub full_name: String,
    pub email: String,
    pub semester: i32,
}

/// Request to update a student. All fields are optional; omitted fields
/// keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub national_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub semester: Option<i32>,
}

/// Check that a semester falls in the allowed 1-12 range.
pub fn semester_in_range(semester: i32) -> bool {
    (MIN_SEMESTER..=MAX_SEMESTER).contains(&semester)
}

/// Minimal email shape check: one `@` with a non-empty local part and a
/// domain containing a dot.
///
/// # Examples
///
/// ```
/// use campus_types::student::email_is_plausible;
///
/// assert!(email_is_plausible("ana@example.edu"));
/// assert!(!email_is_plausible("not-an-email"));
/// assert!(!email_is_plausible("@example.edu"));
/// ```
pub fn email_is_plausible(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
