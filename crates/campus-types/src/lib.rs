//! Shared domain types for the campus backend.
//!
//! This crate contains the core domain types used across the platform:
//! Student, Course, Enrollment, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod course;
pub mod enrollment;
pub mod error;
pub mod student;
