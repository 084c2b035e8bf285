//! CLI command definitions and dispatch for the `campus` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `campus create student`, `campus list courses`).

pub mod course;
pub mod enrollment;
pub mod status;
pub mod student;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Manage students, courses, and enrollments.
#[derive(Parser)]
#[command(name = "campus", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show details of a student, including their enrolled courses.
    Show {
        /// Student national ID to display.
        national_id: String,
    },

    /// Delete a resource.
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Enroll a student in a course.
    Enroll {
        /// Student national ID.
        student: String,
        /// Course catalog code.
        course: String,
    },

    /// Drop a student from a course.
    Drop {
        /// Student national ID.
        student: String,
        /// Course catalog code.
        course: String,
    },

    /// System status dashboard.
    Status,

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Register a new student.
    Student {
        /// National ID document number (unique).
        #[arg(long)]
        national_id: Option<String>,

        /// Full display name.
        #[arg(long)]
        name: Option<String>,

        /// Contact email address.
        #[arg(long)]
        email: Option<String>,

        /// Current semester (1-12).
        #[arg(long)]
        semester: Option<i32>,
    },

    /// Add a course to the catalog.
    Course {
        /// Catalog code (unique, e.g. "CS-101").
        #[arg(long)]
        code: Option<String>,

        /// Course title.
        #[arg(long)]
        title: Option<String>,

        /// Credit weight (1-10).
        #[arg(long)]
        credits: Option<i32>,

        /// Meeting schedule (e.g. "Mon 08:00-10:00").
        #[arg(long)]
        schedule: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List students.
    Students {
        /// Filter by semester (1-12).
        #[arg(long)]
        semester: Option<i32>,

        /// Sort field.
        #[arg(long, default_value = "created_at")]
        sort: String,
    },

    /// List courses.
    Courses {
        /// Filter by exact credit weight.
        #[arg(long)]
        credits: Option<i32>,

        /// Substring match on the catalog code.
        #[arg(long)]
        code: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DeleteResource {
    /// Delete a student (enrollments cascade).
    Student {
        /// Student national ID.
        national_id: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Delete a course (enrollments cascade).
    Course {
        /// Course catalog code.
        code: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
