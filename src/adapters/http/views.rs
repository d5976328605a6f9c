//! Server-side HTML rendering with Handlebars. Every page is a body template
//! rendered into `layout`; values are HTML-escaped by the registry.

use crate::adapters::http::forms::{CourseForm, InstructorForm, StudentForm};
use crate::core::{Course, CourseId, DirectorySummary, Instructor, PersonId, Student};
use crate::utils::error::{FieldError, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;

const PAGES: &[(&str, &str)] = &[
    ("layout", include_str!("../../../templates/layout.hbs")),
    ("index", include_str!("../../../templates/index.hbs")),
    ("students", include_str!("../../../templates/students.hbs")),
    ("student_form", include_str!("../../../templates/student_form.hbs")),
    ("instructors", include_str!("../../../templates/instructors.hbs")),
    ("instructor_form", include_str!("../../../templates/instructor_form.hbs")),
    ("courses", include_str!("../../../templates/courses.hbs")),
    ("course_form", include_str!("../../../templates/course_form.hbs")),
    ("course_details", include_str!("../../../templates/course_details.hbs")),
    ("enroll", include_str!("../../../templates/enroll.hbs")),
    ("error", include_str!("../../../templates/error.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[(
    "field_errors",
    include_str!("../../../templates/field_errors.hbs"),
)];

#[derive(Serialize)]
struct Layout<'a> {
    title: &'a str,
    notice: Option<&'a str>,
    body: String,
}

#[derive(Serialize)]
struct StudentRow {
    id: PersonId,
    full_name: String,
    student_number: String,
    email: Option<String>,
}

impl From<&Student> for StudentRow {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id(),
            full_name: s.full_name(),
            student_number: s.student_number.clone(),
            email: s.email.clone(),
        }
    }
}

#[derive(Serialize)]
struct InstructorRow {
    id: PersonId,
    full_title: String,
    department: Option<String>,
    email: Option<String>,
    selected: bool,
}

impl InstructorRow {
    fn new(i: &Instructor, selected: Option<u32>) -> Self {
        Self {
            id: i.id(),
            full_title: i.full_title(),
            department: i.department.clone(),
            email: i.email.clone(),
            selected: selected == Some(i.id().0),
        }
    }
}

#[derive(Serialize)]
struct CourseRow {
    id: CourseId,
    course_code: String,
    course_name: String,
    credits: u8,
    instructor: String,
    enrolled: usize,
    students: Vec<StudentRow>,
}

impl From<&Course> for CourseRow {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id,
            course_code: c.course_code.clone(),
            course_name: c.course_name.clone(),
            credits: c.credits,
            instructor: c.instructor_label(),
            enrolled: c.enrolled_count(),
            students: c.enrolled_students.iter().map(|s| StudentRow::from(s.as_ref())).collect(),
        }
    }
}

#[derive(Serialize)]
struct EnrollOption {
    #[serde(flatten)]
    student: StudentRow,
    enrolled: bool,
}

#[derive(Serialize)]
struct FormPage<'a, F> {
    form: &'a F,
    errors: &'a [FieldError],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    instructors: Vec<InstructorRow>,
}

/// The compiled page templates. Built once and shared through the router state.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in PAGES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    fn page<T: Serialize>(
        &self,
        template: &str,
        title: &str,
        notice: Option<&str>,
        context: &T,
    ) -> Result<String> {
        let body = self.registry.render(template, context)?;
        let html = self.registry.render("layout", &Layout { title, notice, body })?;
        Ok(html)
    }

    pub fn index_page(&self, summary: &DirectorySummary) -> Result<String> {
        self.page("index", "Dashboard", None, summary)
    }

    pub fn students_page(&self, students: &[Arc<Student>], notice: Option<&str>) -> Result<String> {
        let rows: Vec<StudentRow> = students.iter().map(|s| StudentRow::from(s.as_ref())).collect();
        self.page("students", "Students", notice, &serde_json::json!({ "students": rows }))
    }

    pub fn student_form_page(&self, form: &StudentForm, errors: &[FieldError]) -> Result<String> {
        let context = FormPage {
            form,
            errors,
            instructors: Vec::new(),
        };
        self.page("student_form", "Add Student", None, &context)
    }

    pub fn instructors_page(
        &self,
        instructors: &[Arc<Instructor>],
        notice: Option<&str>,
    ) -> Result<String> {
        let rows: Vec<InstructorRow> = instructors.iter().map(|i| InstructorRow::new(i, None)).collect();
        self.page("instructors", "Instructors", notice, &serde_json::json!({ "instructors": rows }))
    }

    pub fn instructor_form_page(&self, form: &InstructorForm, errors: &[FieldError]) -> Result<String> {
        let context = FormPage {
            form,
            errors,
            instructors: Vec::new(),
        };
        self.page("instructor_form", "Add Instructor", None, &context)
    }

    pub fn courses_page(&self, courses: &[Course], notice: Option<&str>) -> Result<String> {
        let rows: Vec<CourseRow> = courses.iter().map(CourseRow::from).collect();
        self.page("courses", "Courses", notice, &serde_json::json!({ "courses": rows }))
    }

    pub fn course_form_page(
        &self,
        form: &CourseForm,
        errors: &[FieldError],
        instructors: &[Arc<Instructor>],
    ) -> Result<String> {
        let selected = form.selected_instructor();
        let context = FormPage {
            form,
            errors,
            instructors: instructors.iter().map(|i| InstructorRow::new(i, selected)).collect(),
        };
        self.page("course_form", "Add Course", None, &context)
    }

    pub fn course_details_page(&self, course: &Course, notice: Option<&str>) -> Result<String> {
        let context = serde_json::json!({ "course": CourseRow::from(course) });
        self.page("course_details", &course.course_code, notice, &context)
    }

    pub fn enroll_page(&self, course: &Course, students: &[Arc<Student>]) -> Result<String> {
        let options: Vec<EnrollOption> = students
            .iter()
            .map(|s| EnrollOption {
                student: StudentRow::from(s.as_ref()),
                enrolled: course.is_enrolled(s.id()),
            })
            .collect();
        let context = serde_json::json!({
            "course": CourseRow::from(course),
            "students": options,
        });
        self.page("enroll", "Enroll Student", None, &context)
    }

    pub fn error_page(&self, title: &str, message: &str) -> Result<String> {
        self.page("error", title, None, &serde_json::json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Person, PersonId};

    fn views() -> Views {
        Views::new().unwrap()
    }

    fn student(first_name: &str) -> Arc<Student> {
        Arc::new(Student {
            person: Person {
                id: PersonId(1),
                first_name: first_name.to_string(),
                last_name: "Doe".to_string(),
            },
            student_number: "123456".to_string(),
            email: None,
        })
    }

    #[test]
    fn test_students_page_escapes_names() {
        let html = views()
            .students_page(&[student("<script>")], Some("Student <b>added</b>"))
            .unwrap();
        assert!(html.contains("&lt;script&gt; Doe"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Student &lt;b&gt;added&lt;/b&gt;"));
        assert!(html.contains("<td>-</td>"));
    }

    #[test]
    fn test_course_details_lists_roster() {
        let course = Course {
            id: CourseId(3),
            course_code: "PHY101".to_string(),
            course_name: "General Physics".to_string(),
            credits: 4,
            instructor_id: None,
            instructor: None,
            enrolled_students: vec![student("Jane")],
        };
        let html = views().course_details_page(&course, None).unwrap();
        assert!(html.contains("<title>PHY101 - Student Course Management</title>"));
        assert!(html.contains("Instructor: Not assigned"));
        assert!(html.contains("Enrolled Students (1)"));
        assert!(html.contains("<li>Jane Doe (123456)</li>"));
        assert!(html.contains("/courses/3/enroll"));
        assert!(!html.contains("class=\"notice\""));
    }

    #[test]
    fn test_form_page_shows_errors_and_values() {
        let form = StudentForm {
            last_name: "O\"Brien".to_string(),
            ..StudentForm::default()
        };
        let html = views()
            .student_form_page(&form, &[FieldError::new("first_name", "First name is required")])
            .unwrap();
        assert!(html.contains("data-field=\"first_name\""));
        assert!(html.contains("First name is required"));
        assert!(html.contains("value=\"O&quot;Brien\""));
        assert!(html.contains("name=\"email\" value=\"\""));

        let clean = views().student_form_page(&StudentForm::default(), &[]).unwrap();
        assert!(!clean.contains("class=\"errors\""));
    }

    #[test]
    fn test_course_form_marks_selected_instructor() {
        let instructor = Arc::new(Instructor {
            person: Person {
                id: PersonId(6),
                first_name: "Robert".to_string(),
                last_name: "Williams".to_string(),
            },
            title: "Professor".to_string(),
            email: None,
            department: None,
        });
        let form = CourseForm {
            instructor_id: Some("6".to_string()),
            ..CourseForm::default()
        };
        let html = views().course_form_page(&form, &[], &[instructor]).unwrap();
        assert!(html.contains("<option value=\"6\" selected>Professor Robert Williams</option>"));
    }

    #[test]
    fn test_error_page() {
        let html = views()
            .error_page("Not Found", "The requested course (#9) does not exist.")
            .unwrap();
        assert!(html.contains("<h1>Not Found</h1>"));
        assert!(html.contains("<p>The requested course (#9) does not exist.</p>"));
    }
}
