//! Error types for the Roster library.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a [`RosterError`].
///
/// Callers match on the kind instead of on distinct error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Name is empty or blank.
    InvalidName,
    /// Department is missing, empty, or blank.
    InvalidDepartment,
    /// Salary is negative, or a salary range is malformed.
    InvalidSalary,
    /// Performance rating is outside [0, 5].
    InvalidPerformanceRating,
    /// Years of experience is negative.
    InvalidExperience,
    /// An employee with the same id is already stored.
    DuplicateId,
    /// No employee with the given id.
    NotFound,
    /// Unknown field name, or a value of the wrong type for the field.
    InvalidField,
    /// Malformed query parameter.
    InvalidArgument,
    /// Error reading an input file.
    Io,
    /// Input data could not be parsed.
    Parse,
    /// Configuration could not be loaded.
    Config,
}

impl ErrorKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::InvalidName => "Invalid name",
            ErrorKind::InvalidDepartment => "Invalid department",
            ErrorKind::InvalidSalary => "Invalid salary",
            ErrorKind::InvalidPerformanceRating => "Invalid performance rating",
            ErrorKind::InvalidExperience => "Invalid years of experience",
            ErrorKind::DuplicateId => "Duplicate id",
            ErrorKind::NotFound => "Not found",
            ErrorKind::InvalidField => "Invalid field",
            ErrorKind::InvalidArgument => "Invalid argument",
            ErrorKind::Io => "IO error",
            ErrorKind::Parse => "Parse error",
            ErrorKind::Config => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Main error type for Roster operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct RosterError {
    kind: ErrorKind,
    message: String,
}

impl RosterError {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The error category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The context message, without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefix the message with additional context, keeping the kind.
    pub fn context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{}: {}", context, self.message);
        self
    }

    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidName, message)
    }

    pub fn invalid_department(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDepartment, message)
    }

    pub fn invalid_salary(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSalary, message)
    }

    pub fn invalid_rating(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPerformanceRating, message)
    }

    pub fn invalid_experience(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidExperience, message)
    }

    pub fn duplicate_id(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateId, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn invalid_field(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidField, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        let kind = if err.is_io_error() {
            ErrorKind::Io
        } else {
            ErrorKind::Parse
        };
        Self::new(kind, format!("CSV error: {}", err))
    }
}

/// Result type alias for Roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = RosterError::not_found("Employee with ID 42 does not exist");
        assert_eq!(
            err.to_string(),
            "Not found: Employee with ID 42 does not exist"
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_context_keeps_kind() {
        let err = RosterError::invalid_salary("Salary cannot be negative").context("row 3");
        assert_eq!(err.kind(), ErrorKind::InvalidSalary);
        assert_eq!(err.message(), "row 3: Salary cannot be negative");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::InvalidPerformanceRating).unwrap();
        assert_eq!(json, "\"invalid_performance_rating\"");
    }
}
