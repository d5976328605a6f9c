use crate::utils::error::{FieldError, RegistryError, Result};
use regex::Regex;
use std::net::SocketAddr;
use std::sync::LazyLock;

static STUDENT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{6,10}$").expect("student number pattern"));

static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}\d{3}$").expect("course code pattern"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub type FieldResult<T = ()> = std::result::Result<T, FieldError>;

/// Gathers every failed field check of one form so they can be reported together.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, result: FieldResult) {
        if let Err(e) = result {
            self.errors.push(e);
        }
    }

    /// Records a failed parse while leaving the parsed value with the caller.
    pub fn check_parsed<T>(&mut self, result: &FieldResult<T>) {
        if let Err(e) = result {
            self.errors.push(e.clone());
        }
    }

    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::Validation {
                errors: self.errors,
            })
        }
    }
}

/// Trims an optional text field; blank input counts as absent.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate_length(field: &str, label: &str, value: &str, min: usize, max: usize) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(field, format!("{} is required", label)));
    }

    let len = value.chars().count();
    if len < min || len > max {
        return Err(FieldError::new(
            field,
            format!("{} must be between {} and {} characters", label, min, max),
        ));
    }
    Ok(())
}

pub fn validate_max_length(field: &str, label: &str, value: &str, max: usize) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(field, format!("{} is required", label)));
    }
    if value.chars().count() > max {
        return Err(FieldError::new(
            field,
            format!("{} cannot exceed {} characters", label, max),
        ));
    }
    Ok(())
}

pub fn validate_student_number(field: &str, value: &str) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(field, "Student number is required"));
    }
    if !STUDENT_NUMBER.is_match(value) {
        return Err(FieldError::new(
            field,
            "Student number must be between 6 and 10 digits",
        ));
    }
    Ok(())
}

pub fn validate_course_code(field: &str, value: &str) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(field, "Course code is required"));
    }
    if !COURSE_CODE.is_match(value) {
        return Err(FieldError::new(
            field,
            "Course code must be 2-4 uppercase letters followed by 3 digits (e.g., CS101)",
        ));
    }
    Ok(())
}

pub fn validate_optional_email(field: &str, value: Option<&str>) -> FieldResult {
    match normalize_optional(value) {
        Some(email) if !EMAIL.is_match(&email) => {
            Err(FieldError::new(field, "Invalid email address"))
        }
        _ => Ok(()),
    }
}

pub fn parse_int_in_range(field: &str, label: &str, raw: &str, min: u8, max: u8) -> FieldResult<u8> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::new(field, format!("{} are required", label)));
    }

    match raw.parse::<i64>() {
        Ok(value) if value >= i64::from(min) && value <= i64::from(max) => {
            u8::try_from(value).map_err(|_| out_of_range(field, label, min, max))
        }
        Ok(_) => Err(out_of_range(field, label, min, max)),
        Err(_) => Err(FieldError::new(field, format!("{} must be a whole number", label))),
    }
}

fn out_of_range(field: &str, label: &str, min: u8, max: u8) -> FieldError {
    FieldError::new(field, format!("{} must be between {} and {}", label, min, max))
}

/// Parses an optional numeric id from a select box; an empty choice means none.
pub fn parse_optional_id(field: &str, raw: Option<&str>) -> FieldResult<Option<u32>> {
    match normalize_optional(raw) {
        None => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| FieldError::new(field, format!("'{}' is not a valid id", value))),
    }
}

pub fn validate_socket_addr(field_name: &str, value: &str) -> Result<SocketAddr> {
    if value.trim().is_empty() {
        return Err(RegistryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Address cannot be empty".to_string(),
        });
    }

    value
        .trim()
        .parse::<SocketAddr>()
        .map_err(|e| RegistryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length() {
        assert!(validate_length("first_name", "First name", "Jo", 2, 50).is_ok());
        assert!(validate_length("first_name", "First name", "J", 2, 50).is_err());
        assert!(validate_length("first_name", "First name", &"x".repeat(51), 2, 50).is_err());

        let err = validate_length("first_name", "First name", "   ", 2, 50).unwrap_err();
        assert_eq!(err.message, "First name is required");
    }

    #[test]
    fn test_validate_student_number() {
        assert!(validate_student_number("student_number", "123456").is_ok());
        assert!(validate_student_number("student_number", "1234567890").is_ok());
        assert!(validate_student_number("student_number", "12345").is_err());
        assert!(validate_student_number("student_number", "12345678901").is_err());
        assert!(validate_student_number("student_number", "12a456").is_err());
    }

    #[test]
    fn test_validate_course_code() {
        assert!(validate_course_code("course_code", "CS101").is_ok());
        assert!(validate_course_code("course_code", "MATH201").is_ok());
        assert!(validate_course_code("course_code", "cs101").is_err());
        assert!(validate_course_code("course_code", "C101").is_err());
        assert!(validate_course_code("course_code", "CS1010").is_err());
        assert!(validate_course_code("course_code", "ABCDE101").is_err());
    }

    #[test]
    fn test_validate_optional_email() {
        assert!(validate_optional_email("email", None).is_ok());
        assert!(validate_optional_email("email", Some("")).is_ok());
        assert!(validate_optional_email("email", Some("a.b@university.edu")).is_ok());
        assert!(validate_optional_email("email", Some("not-an-email")).is_err());
        assert!(validate_optional_email("email", Some("two@@signs.edu")).is_err());
    }

    #[test]
    fn test_parse_int_in_range() {
        assert_eq!(parse_int_in_range("credits", "Credits", "4", 1, 10).unwrap(), 4);
        assert!(parse_int_in_range("credits", "Credits", "0", 1, 10).is_err());
        assert!(parse_int_in_range("credits", "Credits", "11", 1, 10).is_err());
        assert!(parse_int_in_range("credits", "Credits", "four", 1, 10).is_err());
        assert!(parse_int_in_range("credits", "Credits", "", 1, 10).is_err());
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id("instructor_id", None).unwrap(), None);
        assert_eq!(parse_optional_id("instructor_id", Some("")).unwrap(), None);
        assert_eq!(parse_optional_id("instructor_id", Some("7")).unwrap(), Some(7));
        assert!(parse_optional_id("instructor_id", Some("x")).is_err());
    }

    #[test]
    fn test_field_errors_collects_all() {
        let mut errors = FieldErrors::new();
        errors.check(validate_student_number("student_number", "1"));
        errors.check(validate_optional_email("email", Some("bad")));
        errors.check(validate_length("last_name", "Last name", "Doe", 2, 50));

        match errors.into_result() {
            Err(RegistryError::Validation { errors }) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "student_number");
                assert_eq!(errors[1].field, "email");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_check_parsed_keeps_value_and_error() {
        let mut errors = FieldErrors::new();
        let credits = parse_int_in_range("credits", "Credits", "12", 1, 10);
        let instructor = parse_optional_id("instructor_id", Some("3"));
        errors.check_parsed(&credits);
        errors.check_parsed(&instructor);

        assert_eq!(instructor.unwrap(), Some(3));
        match errors.into_result() {
            Err(RegistryError::Validation { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0], credits.unwrap_err());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("server.bind", "127.0.0.1:8080").is_ok());
        assert!(validate_socket_addr("server.bind", "").is_err());
        assert!(validate_socket_addr("server.bind", "localhost").is_err());
    }
}
