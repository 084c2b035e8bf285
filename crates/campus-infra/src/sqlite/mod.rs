//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod course;
pub mod enrollment;
pub mod pool;
pub mod student;
