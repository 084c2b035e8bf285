//! Business logic and repository trait definitions for the campus backend.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `campus-types` -- never on
//! `campus-infra` or any database/IO crate.

pub mod repository;
pub mod service;
