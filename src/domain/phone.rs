//! PhoneNumbers value object.

use super::errors::ValidationError;
use std::fmt;

/// The free-form phone numbers field of an agenda record.
///
/// The field may hold several numbers in any notation the user chose
/// (`"912 345 678 / 213 456 789"`), so the only rule is that it is not empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumbers(String);

impl PhoneNumbers {
    pub const FIELD: &'static str = "numbers";

    /// Create a new PhoneNumbers, rejecting the empty string.
    pub fn new(numbers: impl Into<String>) -> Result<Self, ValidationError> {
        let numbers = numbers.into();
        if numbers.is_empty() {
            return Err(ValidationError::EmptyField(Self::FIELD));
        }
        Ok(Self(numbers))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
