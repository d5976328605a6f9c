use crate::core::seed::{self, SeedPlan};
use crate::domain::model::{
    Course, CourseId, Instructor, Member, NewCourse, NewInstructor, NewStudent, Person, PersonId,
    Student,
};
use crate::utils::error::{EntityKind, RegistryError, Result};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Hands out ids from two independent namespaces: people (students and
/// instructors share one counter) and courses. Ids are never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next_person: u32,
    next_course: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_person: 1,
            next_course: 1,
        }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_person_id(&mut self) -> PersonId {
        let id = PersonId(self.next_person);
        self.next_person += 1;
        id
    }

    pub fn next_course_id(&mut self) -> CourseId {
        let id = CourseId(self.next_course);
        self.next_course += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    Uninitialized,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DirectorySummary {
    pub students: usize,
    pub instructors: usize,
    pub courses: usize,
    pub enrollments: usize,
}

#[derive(Debug)]
struct Collections {
    ids: IdAllocator,
    students: Vec<Arc<Student>>,
    instructors: Vec<Arc<Instructor>>,
    courses: Vec<Course>,
    state: DirectoryState,
}

impl Collections {
    fn new(ids: IdAllocator) -> Self {
        Self {
            ids,
            students: Vec::new(),
            instructors: Vec::new(),
            courses: Vec::new(),
            state: DirectoryState::Uninitialized,
        }
    }

    fn insert_student(&mut self, draft: NewStudent) -> Arc<Student> {
        let student = Arc::new(Student {
            person: Person {
                id: self.ids.next_person_id(),
                first_name: draft.first_name,
                last_name: draft.last_name,
            },
            student_number: draft.student_number,
            email: draft.email,
        });
        self.students.push(Arc::clone(&student));
        student
    }

    fn insert_instructor(&mut self, draft: NewInstructor) -> Arc<Instructor> {
        let instructor = Arc::new(Instructor {
            person: Person {
                id: self.ids.next_person_id(),
                first_name: draft.first_name,
                last_name: draft.last_name,
            },
            title: draft.title,
            email: draft.email,
            department: draft.department,
        });
        self.instructors.push(Arc::clone(&instructor));
        instructor
    }

    fn insert_course(&mut self, draft: NewCourse) -> Course {
        // An unknown instructor id leaves the course unassigned rather than failing.
        let instructor = draft
            .instructor_id
            .and_then(|id| self.instructor(id).cloned());

        if let (Some(id), None) = (draft.instructor_id, &instructor) {
            tracing::warn!(
                instructor_id = %id,
                course_code = %draft.course_code,
                "Instructor not found, course left unassigned"
            );
        }

        let course = Course {
            id: self.ids.next_course_id(),
            course_code: draft.course_code,
            course_name: draft.course_name,
            credits: draft.credits,
            instructor_id: draft.instructor_id,
            instructor,
            enrolled_students: Vec::new(),
        };
        self.courses.push(course.clone());
        course
    }

    fn student(&self, id: PersonId) -> Option<&Arc<Student>> {
        self.students.iter().find(|s| s.id() == id)
    }

    fn instructor(&self, id: PersonId) -> Option<&Arc<Instructor>> {
        self.instructors.iter().find(|i| i.id() == id)
    }

    fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    fn apply_seed(&mut self, plan: SeedPlan) {
        let students: Vec<Arc<Student>> = plan
            .students
            .into_iter()
            .map(|s| self.insert_student(s))
            .collect();
        let instructors: Vec<Arc<Instructor>> = plan
            .instructors
            .into_iter()
            .map(|i| self.insert_instructor(i))
            .collect();

        let mut course_ids = Vec::with_capacity(plan.courses.len());
        for course in plan.courses {
            let instructor_id = instructors.get(course.instructor).map(|i| i.id());
            let stored = self.insert_course(NewCourse {
                course_code: course.course_code.to_string(),
                course_name: course.course_name.to_string(),
                credits: course.credits,
                instructor_id,
            });
            course_ids.push(stored.id);
        }

        for (course_idx, student_idx) in plan.enrollments {
            let (Some(course_id), Some(student)) =
                (course_ids.get(course_idx), students.get(student_idx))
            else {
                continue;
            };
            if let Some(course) = self.courses.iter_mut().find(|c| c.id == *course_id) {
                course.enroll_student(Arc::clone(student));
            }
        }
    }
}

/// In-memory aggregate of students, instructors and courses.
///
/// All three collections sit behind a single lock. Mutations take the write
/// side; reads take the read side, so a reader never sees a half-applied
/// mutation.
#[derive(Debug)]
pub struct Directory {
    inner: RwLock<Collections>,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    /// An empty directory in the `Uninitialized` state.
    pub fn new() -> Self {
        Self::with_allocator(IdAllocator::new())
    }

    pub fn with_allocator(ids: IdAllocator) -> Self {
        Self {
            inner: RwLock::new(Collections::new(ids)),
        }
    }

    /// A directory that already holds the sample data.
    pub fn seeded() -> Self {
        let directory = Self::new();
        directory.initialize();
        directory
    }

    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the sample data exactly once. Returns `true` for the caller that
    /// performed the seeding and `false` for everyone else.
    pub fn initialize(&self) -> bool {
        let mut inner = self.write();
        if inner.state == DirectoryState::Ready {
            return false;
        }

        inner.apply_seed(seed::sample_data());
        inner.state = DirectoryState::Ready;

        tracing::info!(
            students = inner.students.len(),
            instructors = inner.instructors.len(),
            courses = inner.courses.len(),
            "Directory seeded with sample data"
        );
        true
    }

    pub fn state(&self) -> DirectoryState {
        self.read().state
    }

    pub fn add_student(&self, student: NewStudent) -> Arc<Student> {
        let stored = self.write().insert_student(student);
        tracing::info!(id = %stored.id(), "Student {} added", stored.full_name());
        stored
    }

    pub fn add_instructor(&self, instructor: NewInstructor) -> Arc<Instructor> {
        let stored = self.write().insert_instructor(instructor);
        tracing::info!(id = %stored.id(), "Instructor {} added", stored.full_title());
        stored
    }

    /// Stores the course, attaching the instructor named by `instructor_id`
    /// when one exists at this moment.
    pub fn add_course(&self, course: NewCourse) -> Course {
        let stored = self.write().insert_course(course);
        tracing::info!(
            id = %stored.id,
            "Course {} - {} added",
            stored.course_code,
            stored.course_name
        );
        stored
    }

    /// Enrolls an existing student in an existing course. Enrolling twice is a no-op.
    pub fn enroll_student(&self, course_id: CourseId, student_id: PersonId) -> Result<Course> {
        let mut inner = self.write();

        let student = inner
            .student(student_id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(EntityKind::Student, student_id.0))?;
        let course = inner
            .courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Course, course_id.0))?;

        if course.enroll_student(Arc::clone(&student)) {
            tracing::info!(
                course_id = %course_id,
                student_id = %student_id,
                "Student {} enrolled in {}",
                student.full_name(),
                course.course_code
            );
        } else {
            tracing::debug!(
                course_id = %course_id,
                student_id = %student_id,
                "Student already enrolled, nothing to do"
            );
        }

        Ok(course.clone())
    }

    pub fn list_students(&self) -> Vec<Arc<Student>> {
        self.read().students.clone()
    }

    pub fn list_instructors(&self) -> Vec<Arc<Instructor>> {
        self.read().instructors.clone()
    }

    pub fn list_courses(&self) -> Vec<Course> {
        self.read().courses.clone()
    }

    pub fn get_course(&self, id: CourseId) -> Result<Course> {
        self.read()
            .course(id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(EntityKind::Course, id.0))
    }

    pub fn get_student(&self, id: PersonId) -> Result<Arc<Student>> {
        self.read()
            .student(id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(EntityKind::Student, id.0))
    }

    pub fn get_instructor(&self, id: PersonId) -> Result<Arc<Instructor>> {
        self.read()
            .instructor(id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(EntityKind::Instructor, id.0))
    }

    /// Looks a person id up in both the student and instructor collections.
    pub fn find_member(&self, id: PersonId) -> Result<Member> {
        let inner = self.read();
        if let Some(student) = inner.student(id) {
            return Ok(Member::Student(Arc::clone(student)));
        }
        inner
            .instructor(id)
            .map(|i| Member::Instructor(Arc::clone(i)))
            .ok_or_else(|| RegistryError::not_found(EntityKind::Person, id.0))
    }

    pub fn summary(&self) -> DirectorySummary {
        let inner = self.read();
        DirectorySummary {
            students: inner.students.len(),
            instructors: inner.instructors.len(),
            courses: inner.courses.len(),
            enrollments: inner.courses.iter().map(Course::enrolled_count).sum(),
        }
    }
}
