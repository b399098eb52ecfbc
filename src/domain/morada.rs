//! Morada value object.

use super::errors::ValidationError;
use std::fmt;

/// The address field of an agenda record and its uniqueness key.
///
/// Construction only checks presence: the text is stored exactly as given,
/// so two moradas differing only in case or spacing are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Morada(String);

impl Morada {
    pub const FIELD: &'static str = "morada";

    /// Create a new Morada, rejecting the empty string.
    pub fn new(morada: impl Into<String>) -> Result<Self, ValidationError> {
        let morada = morada.into();
        if morada.is_empty() {
            return Err(ValidationError::EmptyField(Self::FIELD));
        }
        Ok(Self(morada))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Morada {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
