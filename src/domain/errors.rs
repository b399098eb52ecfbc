//! Domain validation errors.

use std::fmt;

/// Message reported for a required field that was absent.
pub const MISSING_MESSAGE: &str = "may not be null";

/// Message reported for a required field that was present but empty.
pub const EMPTY_MESSAGE: &str = "may not be empty";

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was not supplied.
    MissingField(&'static str),

    /// A required field was supplied but empty.
    EmptyField(&'static str),

    /// The provided id is not a positive integer.
    InvalidId(String),
}

impl ValidationError {
    /// Name of the field the violation applies to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) | Self::EmptyField(field) => field,
            Self::InvalidId(_) => "id",
        }
    }

    /// Client-facing message for the violation.
    pub fn message(&self) -> String {
        match self {
            Self::MissingField(_) => MISSING_MESSAGE.to_string(),
            Self::EmptyField(_) => EMPTY_MESSAGE.to_string(),
            Self::InvalidId(id) => format!("invalid id: {}", id),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field(), self.message())
    }
}

impl std::error::Error for ValidationError {}
