use crate::core::{NewCourse, NewInstructor, NewStudent, PersonId};
use crate::utils::error::{EntityKind, RegistryError, Result};
use crate::utils::validation::{
    normalize_optional, parse_int_in_range, parse_optional_id, validate_course_code,
    validate_length, validate_max_length, validate_optional_email, validate_student_number,
    FieldErrors, Validate,
};
use serde::{Deserialize, Serialize};

// Raw form bodies. Every field is text so that bad input turns into a field
// message on the re-rendered form instead of a rejected request.

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    pub student_number: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InstructorForm {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CourseForm {
    pub course_code: String,
    pub course_name: String,
    pub credits: String,
    pub instructor_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnrollForm {
    pub student_id: Option<String>,
}

/// Resolves an id typed into a URL or posted by a select box. Text that is
/// not an id cannot name a record, so it is reported as not found.
pub fn parse_reference(entity: EntityKind, field: &str, raw: Option<&str>) -> Result<u32> {
    match parse_optional_id(field, raw) {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(RegistryError::not_found(entity, "none")),
        Err(_) => Err(RegistryError::not_found(
            entity,
            raw.map(str::trim).unwrap_or_default(),
        )),
    }
}

fn check_names(errors: &mut FieldErrors, first_name: &str, last_name: &str) {
    errors.check(validate_length("first_name", "First name", first_name, 2, 50));
    errors.check(validate_length("last_name", "Last name", last_name, 2, 50));
}

impl Validate for StudentForm {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_names(&mut errors, &self.first_name, &self.last_name);
        errors.check(validate_student_number("student_number", &self.student_number));
        errors.check(validate_optional_email("email", self.email.as_deref()));
        errors.into_result()
    }
}

impl StudentForm {
    pub fn to_draft(&self) -> Result<NewStudent> {
        self.validate()?;
        Ok(NewStudent {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            student_number: self.student_number.trim().to_string(),
            email: normalize_optional(self.email.as_deref()),
        })
    }
}

impl Validate for InstructorForm {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_names(&mut errors, &self.first_name, &self.last_name);
        errors.check(validate_max_length("title", "Title", &self.title, 50));
        errors.check(validate_optional_email("email", self.email.as_deref()));
        errors.into_result()
    }
}

impl InstructorForm {
    pub fn to_draft(&self) -> Result<NewInstructor> {
        self.validate()?;
        Ok(NewInstructor {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            title: self.title.trim().to_string(),
            email: normalize_optional(self.email.as_deref()),
            department: normalize_optional(self.department.as_deref()),
        })
    }
}

impl CourseForm {
    /// Validates and parses in one pass; numeric fields are needed for the draft.
    pub fn to_draft(&self) -> Result<NewCourse> {
        let mut errors = FieldErrors::new();
        errors.check(validate_course_code("course_code", &self.course_code));
        errors.check(validate_length("course_name", "Course name", &self.course_name, 3, 100));
        let credits = parse_int_in_range("credits", "Credits", &self.credits, 1, 10);
        let instructor_id = parse_optional_id("instructor_id", self.instructor_id.as_deref());
        errors.check_parsed(&credits);
        errors.check_parsed(&instructor_id);
        errors.into_result()?;

        Ok(NewCourse {
            course_code: self.course_code.trim().to_string(),
            course_name: self.course_name.trim().to_string(),
            credits: credits?,
            instructor_id: instructor_id?.map(PersonId),
        })
    }

    pub fn selected_instructor(&self) -> Option<u32> {
        parse_optional_id("instructor_id", self.instructor_id.as_deref())
            .ok()
            .flatten()
    }
}

impl Validate for CourseForm {
    fn validate(&self) -> Result<()> {
        self.to_draft().map(|_| ())
    }
}
