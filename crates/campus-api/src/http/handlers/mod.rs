//! HTTP request handlers for the REST API.

pub mod course;
pub mod enrollment;
pub mod stats;
pub mod student;
