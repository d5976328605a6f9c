use crate::domain::ports::{DisplayInfo, SignIn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u32);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields shared by every person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    #[serde(flatten)]
    pub person: Person,
    pub student_number: String,
    pub email: Option<String>,
}

impl Student {
    pub fn id(&self) -> PersonId {
        self.person.id
    }

    pub fn full_name(&self) -> String {
        self.person.full_name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instructor {
    #[serde(flatten)]
    pub person: Person,
    pub title: String,
    pub email: Option<String>,
    pub department: Option<String>,
}

impl Instructor {
    pub fn id(&self) -> PersonId {
        self.person.id
    }

    pub fn full_name(&self) -> String {
        self.person.full_name()
    }

    pub fn full_title(&self) -> String {
        format!("{} {}", self.title, self.full_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Instructor => f.write_str("instructor"),
        }
    }
}

/// Any stored person, tagged by role.
#[derive(Debug, Clone)]
pub enum Member {
    Student(Arc<Student>),
    Instructor(Arc<Instructor>),
}

impl Member {
    pub fn person(&self) -> &Person {
        match self {
            Member::Student(s) => &s.person,
            Member::Instructor(i) => &i.person,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Member::Student(_) => Role::Student,
            Member::Instructor(_) => Role::Instructor,
        }
    }
}

/// Acknowledgement returned by a sign-in; carries no session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInAck {
    pub person_id: PersonId,
    pub role: Role,
    pub message: String,
}

impl DisplayInfo for Student {
    fn display_info(&self) -> String {
        format!("Student: {}, Number: {}", self.full_name(), self.student_number)
    }
}

impl DisplayInfo for Instructor {
    fn display_info(&self) -> String {
        format!(
            "Instructor: {}, Department: {}",
            self.full_title(),
            self.department.as_deref().unwrap_or("N/A")
        )
    }
}

impl DisplayInfo for Member {
    fn display_info(&self) -> String {
        match self {
            Member::Student(s) => s.display_info(),
            Member::Instructor(i) => i.display_info(),
        }
    }
}

impl SignIn for Student {
    fn sign_in(&self) -> SignInAck {
        let message = format!("{} logged in as a student.", self.full_name());
        tracing::info!(person_id = %self.id(), "{}", message);
        SignInAck {
            person_id: self.id(),
            role: Role::Student,
            message,
        }
    }
}

impl SignIn for Instructor {
    fn sign_in(&self) -> SignInAck {
        let message = format!("{} logged in as an instructor.", self.full_title());
        tracing::info!(person_id = %self.id(), "{}", message);
        SignInAck {
            person_id: self.id(),
            role: Role::Instructor,
            message,
        }
    }
}

impl SignIn for Member {
    fn sign_in(&self) -> SignInAck {
        match self {
            Member::Student(s) => s.sign_in(),
            Member::Instructor(i) => i.sign_in(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub course_code: String,
    pub course_name: String,
    pub credits: u8,
    /// Lookup key used once, when the course is added, to attach `instructor`.
    pub instructor_id: Option<PersonId>,
    pub instructor: Option<Arc<Instructor>>,
    pub enrolled_students: Vec<Arc<Student>>,
}

impl Course {
    /// Appends the student unless one with the same id is already on the roster.
    /// Returns whether the roster changed.
    pub fn enroll_student(&mut self, student: Arc<Student>) -> bool {
        if self.is_enrolled(student.id()) {
            return false;
        }
        self.enrolled_students.push(student);
        true
    }

    pub fn is_enrolled(&self, student_id: PersonId) -> bool {
        self.enrolled_students.iter().any(|s| s.id() == student_id)
    }

    pub fn enrolled_count(&self) -> usize {
        self.enrolled_students.len()
    }

    pub fn instructor_label(&self) -> String {
        self.instructor
            .as_ref()
            .map(|i| i.full_title())
            .unwrap_or_else(|| "Not assigned".to_string())
    }
}

// Drafts built from validated form input. Ids are assigned by the directory.

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub student_number: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewInstructor {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCourse {
    pub course_code: String,
    pub course_name: String,
    pub credits: u8,
    pub instructor_id: Option<PersonId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: u32) -> Arc<Student> {
        Arc::new(Student {
            person: Person {
                id: PersonId(id),
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
            },
            student_number: "20230002".to_string(),
            email: None,
        })
    }

    fn instructor() -> Instructor {
        Instructor {
            person: Person {
                id: PersonId(5),
                first_name: "Robert".to_string(),
                last_name: "Williams".to_string(),
            },
            title: "Professor".to_string(),
            email: None,
            department: None,
        }
    }

    fn empty_course() -> Course {
        Course {
            id: CourseId(1),
            course_code: "CS101".to_string(),
            course_name: "Introduction to Programming".to_string(),
            credits: 4,
            instructor_id: None,
            instructor: None,
            enrolled_students: Vec::new(),
        }
    }

    #[test]
    fn test_derived_names() {
        let s = student(2);
        assert_eq!(s.full_name(), "Jane Smith");

        let i = instructor();
        assert_eq!(i.full_title(), "Professor Robert Williams");
        assert_eq!(i.display_info(), "Instructor: Professor Robert Williams, Department: N/A");
        assert_eq!(s.display_info(), "Student: Jane Smith, Number: 20230002");
    }

    #[test]
    fn test_enroll_is_idempotent() {
        let mut course = empty_course();
        assert!(course.enroll_student(student(2)));
        assert!(!course.enroll_student(student(2)));
        assert!(course.enroll_student(student(3)));

        assert_eq!(course.enrolled_count(), 2);
        let ids: Vec<PersonId> = course.enrolled_students.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![PersonId(2), PersonId(3)]);
    }

    #[test]
    fn test_instructor_label() {
        let mut course = empty_course();
        assert_eq!(course.instructor_label(), "Not assigned");
        course.instructor = Some(Arc::new(instructor()));
        assert_eq!(course.instructor_label(), "Professor Robert Williams");
    }

    #[test]
    fn test_sign_in_reports_role() {
        let ack = Member::Student(student(2)).sign_in();
        assert_eq!(ack.role, Role::Student);
        assert_eq!(ack.person_id, PersonId(2));
        assert_eq!(ack.message, "Jane Smith logged in as a student.");

        let ack = Member::Instructor(Arc::new(instructor())).sign_in();
        assert_eq!(ack.role, Role::Instructor);
        assert_eq!(ack.message, "Professor Robert Williams logged in as an instructor.");
    }
}
