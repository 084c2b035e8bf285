//! In-memory repository fakes for service tests.
//!
//! Each fake keeps its rows behind an `Arc<Mutex<Vec<_>>>` so clones share
//! state. The enrollment fake holds handles to the student and course
//! stores to answer the join queries.

use std::sync::{Arc, Mutex};

use campus_types::course::{Course, CourseId};
use campus_types::enrollment::{Enrollment, EnrollmentStatus};
use campus_types::error::RepositoryError;
use campus_types::student::{Student, StudentId};

use crate::repository::course::{CourseFilter, CourseRepository};
use crate::repository::enrollment::EnrollmentRepository;
use crate::repository::student::{StudentFilter, StudentRepository};

pub fn make_student(national_id: &str) -> Student {
    let now = chrono::Utc::now();
    Student {
        id: StudentId::new(),
        national_id: national_id.to_string(),
        full_name: format!("Student {national_id}"),
        email: format!("s{national_id}@uni.edu"),
        semester: 1,
        created_at: now,
        updated_at: now,
    }
}

pub fn make_course(code: &str) -> Course {
    let now = chrono::Utc::now();
    Course {
        id: CourseId::new(),
        code: code.to_string(),
        title: format!("Course {code}"),
        credits: 3,
        schedule: "Mon 08:00-10:00".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStudentRepo {
    rows: Arc<Mutex<Vec<Student>>>,
}

impl InMemoryStudentRepo {
    pub fn insert(&self, student: Student) -> Student {
        self.rows.lock().unwrap().push(student.clone());
        student
    }
}

impl StudentRepository for InMemoryStudentRepo {
    async fn create(&self, student: &Student) -> Result<Student, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|s| s.national_id == student.national_id) {
            return Err(RepositoryError::Conflict(student.national_id.clone()));
        }
        rows.push(student.clone());
        Ok(student.clone())
    }

    async fn get_by_id(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == *id).cloned())
    }

    async fn get_by_national_id(
        &self,
        national_id: &str,
    ) -> Result<Option<Student>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.national_id == national_id)
            .cloned())
    }

    async fn list(&self, filter: Option<StudentFilter>) -> Result<Vec<Student>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let semester = filter.and_then(|f| f.semester);
        Ok(rows
            .iter()
            .filter(|s| semester.is_none_or(|sem| s.semester == sem))
            .cloned()
            .collect())
    }

    async fn update(&self, student: &Student) -> Result<Student, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|s| s.id == student.id) {
            Some(slot) => {
                *slot = student.clone();
                Ok(student.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &StudentId) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != *id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCourseRepo {
    rows: Arc<Mutex<Vec<Course>>>,
}

impl InMemoryCourseRepo {
    pub fn insert(&self, course: Course) -> Course {
        self.rows.lock().unwrap().push(course.clone());
        course
    }
}

impl CourseRepository for InMemoryCourseRepo {
    async fn create(&self, course: &Course) -> Result<Course, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.code == course.code) {
            return Err(RepositoryError::Conflict(course.code.clone()));
        }
        rows.push(course.clone());
        Ok(course.clone())
    }

    async fn get_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == *id).cloned())
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Course>, RepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.code == code).cloned())
    }

    async fn list(&self, filter: Option<CourseFilter>) -> Result<Vec<Course>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let filter = filter.unwrap_or_default();
        Ok(rows
            .iter()
            .filter(|c| filter.credits.is_none_or(|cr| c.credits == cr))
            .filter(|c| {
                filter
                    .code_contains
                    .as_deref()
                    .is_none_or(|sub| c.code.contains(sub))
            })
            .cloned()
            .collect())
    }

    async fn update(&self, course: &Course) -> Result<Course, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|c| c.id == course.id) {
            Some(slot) => {
                *slot = course.clone();
                Ok(course.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &CourseId) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != *id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryEnrollmentRepo {
    rows: Arc<Mutex<Vec<Enrollment>>>,
    students: InMemoryStudentRepo,
    courses: InMemoryCourseRepo,
}

impl InMemoryEnrollmentRepo {
    pub fn new(students: InMemoryStudentRepo, courses: InMemoryCourseRepo) -> Self {
        Self {
            rows: Arc::default(),
            students,
            courses,
        }
    }
}

impl EnrollmentRepository for InMemoryEnrollmentRepo {
    async fn create(&self, enrollment: &Enrollment) -> Result<Enrollment, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|e| e.student_id == enrollment.student_id && e.course_id == enrollment.course_id)
        {
            return Err(RepositoryError::Conflict("already enrolled".to_string()));
        }
        rows.push(enrollment.clone());
        Ok(enrollment.clone())
    }

    async fn find(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.student_id == *student_id && e.course_id == *course_id)
            .cloned())
    }

    async fn courses_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Course>, RepositoryError> {
        let course_ids: Vec<CourseId> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.student_id == *student_id)
            .map(|e| e.course_id)
            .collect();

        let mut courses = Vec::with_capacity(course_ids.len());
        for id in course_ids {
            if let Some(course) = self.courses.get_by_id(&id).await? {
                courses.push(course);
            }
        }
        Ok(courses)
    }

    async fn students_for_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<Student>, RepositoryError> {
        let student_ids: Vec<StudentId> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.course_id == *course_id)
            .map(|e| e.student_id)
            .collect();

        let mut students = Vec::with_capacity(student_ids.len());
        for id in student_ids {
            if let Some(student) = self.students.get_by_id(&id).await? {
                students.push(student);
            }
        }
        Ok(students)
    }

    async fn set_status(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|e| e.student_id == *student_id && e.course_id == *course_id)
        {
            Some(e) => {
                e.status = status;
                Ok(e.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| !(e.student_id == *student_id && e.course_id == *course_id));
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
