//! AgendaId value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Path segments accepted as ids: one or more ASCII digits, nothing else.
static ID_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("static regex"));

/// A type-safe wrapper for store-assigned agenda ids.
///
/// Ids are always positive; the store never hands out zero or negatives.
///
/// # Example
///
/// ```
/// use agenda_server::domain::AgendaId;
///
/// let id: AgendaId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgendaId(i64);

impl AgendaId {
    /// Create a new AgendaId, validating that it's positive.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidId` for zero or negative values.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::InvalidId(id.to_string()));
        }
        Ok(Self(id))
    }

    /// Get the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for AgendaId {
    type Err = ValidationError;

    /// Parse a URL path segment. Only `[0-9]+` is accepted, so signs,
    /// whitespace and overflowing values are all rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !ID_SEGMENT.is_match(s) {
            return Err(ValidationError::InvalidId(s.to_string()));
        }
        let value = s
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidId(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for AgendaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
