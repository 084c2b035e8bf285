use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::course::CourseId;
use crate::student::StudentId;

/// Unique identifier for an enrollment, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentId(pub Uuid);

impl EnrollmentId {
    /// Create a new EnrollmentId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create an EnrollmentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for EnrollmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EnrollmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The many-to-many relation between a student and a course.
///
/// At most one enrollment exists per (student, course) pair. Dropping a
/// course deletes the row; completing or withdrawing updates the status
/// while keeping the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// Current state of the enrollment.
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
}

/// Enrollment lifecycle states.
///
/// - Active: currently taking the course
/// - Completed: finished the course, record kept for the transcript
/// - Withdrawn: left the course after the add/drop window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Withdrawn,
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(f, "active"),
            EnrollmentStatus::Completed => write!(f, "completed"),
            EnrollmentStatus::Withdrawn => write!(f, "withdrawn"),
        }
    }
}

impl FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(EnrollmentStatus::Active),
            "completed" => Ok(EnrollmentStatus::Completed),
            "withdrawn" => Ok(EnrollmentStatus::Withdrawn),
            other => Err(format!("invalid enrollment status: '{other}'")),
        }
    }
}

impl Default for EnrollmentStatus {
    fn default() -> Self {
        EnrollmentStatus::Active
    }
}

/// Request to enroll a student in a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub student_id: StudentId,
    pub course_id: CourseId,
}

/// Request to change an enrollment's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEnrollmentRequest {
    pub status: EnrollmentStatus,
}
