//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository traits, but AppState pins them to the
//! concrete SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use campus_core::service::course::CourseService;
use campus_core::service::enrollment::EnrollmentService;
use campus_core::service::student::StudentService;
use campus_infra::sqlite::course::SqliteCourseRepository;
use campus_infra::sqlite::enrollment::SqliteEnrollmentRepository;
use campus_infra::sqlite::pool::{DatabasePool, default_data_dir};
use campus_infra::sqlite::student::SqliteStudentRepository;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteStudentService = StudentService<SqliteStudentRepository>;

pub type ConcreteCourseService = CourseService<SqliteCourseRepository>;

pub type ConcreteEnrollmentService = EnrollmentService<
    SqliteEnrollmentRepository,
    SqliteStudentRepository,
    SqliteCourseRepository,
>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub student_service: Arc<ConcreteStudentService>,
    pub course_service: Arc<ConcreteCourseService>,
    pub enrollment_service: Arc<ConcreteEnrollmentService>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state at the default data directory
    /// (`CAMPUS_DATA_DIR` or `~/.campus`).
    pub async fn init() -> anyhow::Result<Self> {
        Self::init_at(PathBuf::from(default_data_dir())).await
    }

    /// Initialize the application state rooted at a specific directory:
    /// connect to the database and wire the services.
    pub async fn init_at(data_dir: PathBuf) -> anyhow::Result<Self> {
        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("campus.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        // Wire services to their SQLite repositories
        let student_service = StudentService::new(SqliteStudentRepository::new(db_pool.clone()));
        let course_service = CourseService::new(SqliteCourseRepository::new(db_pool.clone()));
        let enrollment_service = EnrollmentService::new(
            SqliteEnrollmentRepository::new(db_pool.clone()),
            SqliteStudentRepository::new(db_pool.clone()),
            SqliteCourseRepository::new(db_pool.clone()),
        );

        Ok(Self {
            student_service: Arc::new(student_service),
            course_service: Arc::new(course_service),
            enrollment_service: Arc::new(enrollment_service),
            data_dir,
            db_pool,
        })
    }
}
