use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which collection a failed lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Instructor,
    Person,
    Course,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Student => "Student",
            EntityKind::Instructor => "Instructor",
            EntityKind::Person => "Person",
            EntityKind::Course => "Course",
        };
        f.write_str(name)
    }
}

/// A single violated form-field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    /// `id` is the reference as the caller gave it, which may not even be numeric.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: String },

    #[error("Validation failed: {}", join_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("Server error: {message}")]
    ServerError { message: String },
}

impl From<FieldError> for RegistryError {
    fn from(error: FieldError) -> Self {
        RegistryError::Validation {
            errors: vec![error],
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RegistryError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        RegistryError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RegistryError::NotFound { .. } => ErrorCategory::Lookup,
            RegistryError::Validation { .. } => ErrorCategory::Input,
            RegistryError::ConfigError { .. }
            | RegistryError::InvalidConfigValueError { .. }
            | RegistryError::TomlError(_) => ErrorCategory::Configuration,
            RegistryError::IoError(_)
            | RegistryError::TemplateError(_)
            | RegistryError::RenderError(_)
            | RegistryError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RegistryError::NotFound { entity, id } => {
                format!("The requested {} (#{}) does not exist.", entity.to_string().to_lowercase(), id)
            }
            RegistryError::Validation { errors } => {
                format!("{} field(s) need attention.", errors.len())
            }
            RegistryError::ConfigError { message } => format!("Configuration problem: {}", message),
            RegistryError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            RegistryError::IoError(e) => format!("Could not access a file: {}", e),
            RegistryError::TomlError(_) => "The configuration file is not valid TOML.".to_string(),
            RegistryError::TemplateError(_) | RegistryError::RenderError(_) => {
                "The page could not be rendered.".to_string()
            }
            RegistryError::ServerError { message } => format!("The server stopped: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Lookup => "Go back to the list and pick an existing entry.",
            ErrorCategory::Input => "Correct the highlighted fields and submit again.",
            ErrorCategory::Configuration => "Check the configuration file and command line flags.",
            ErrorCategory::System => {
                "Check that the bind address is free and the page templates are intact."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = RegistryError::not_found(EntityKind::Course, 42);
        assert_eq!(err.to_string(), "Course 42 not found");
        assert!(err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let err = RegistryError::Validation {
            errors: vec![
                FieldError::new("first_name", "First name is required"),
                FieldError::new("credits", "Credits must be between 1 and 10"),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("first_name: First name is required"));
        assert!(text.contains("credits: Credits must be between 1 and 10"));
        assert_eq!(err.user_friendly_message(), "2 field(s) need attention.");
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = RegistryError::InvalidConfigValueError {
            field: "server.bind".to_string(),
            value: "nowhere".to_string(),
            reason: "not a socket address".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
