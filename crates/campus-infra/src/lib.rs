//! Infrastructure layer for the campus backend.
//!
//! Contains implementations of the repository traits defined in
//! `campus-core`: SQLite storage with WAL mode and split read/write pools.

pub mod sqlite;
