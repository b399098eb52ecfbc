//! Agenda model: one directory entry keyed by its morada.

use crate::domain::{Morada, PhoneNumbers, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A stored directory record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Agenda {
    /// Store-assigned identifier
    pub id: i64,

    /// Address; unique across the directory
    pub morada: String,

    /// Free-form phone numbers
    pub numbers: String,
}

impl Agenda {
    /// Create a record from its stored parts.
    pub fn new(id: i64, morada: impl Into<String>, numbers: impl Into<String>) -> Self {
        Self {
            id,
            morada: morada.into(),
            numbers: numbers.into(),
        }
    }

    /// Re-run the field rules against an already stored record.
    ///
    /// Rows written by older binaries or by hand may not satisfy the rules
    /// that gate inserts, so removal checks them again.
    pub fn validate(&self) -> Result<(), BTreeMap<String, String>> {
        let violations: Vec<ValidationError> = [
            Morada::new(self.morada.as_str()).err(),
            PhoneNumbers::new(self.numbers.as_str()).err(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violation_map(&violations))
        }
    }
}

impl fmt::Display for Agenda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Agenda{{id={}, morada={}, numbers={}}}",
            self.id, self.morada, self.numbers
        )
    }
}

/// Request payload for registering a new record.
///
/// Both fields are optional at the JSON level so that an absent field
/// surfaces as a validation violation rather than a parse failure. A client
/// supplied `id` is accepted and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAgenda {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morada: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<String>,
}

/// A payload whose fields passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAgenda {
    pub morada: Morada,
    pub numbers: PhoneNumbers,
}

impl NewAgenda {
    pub fn new(morada: impl Into<String>, numbers: impl Into<String>) -> Self {
        Self {
            morada: Some(morada.into()),
            numbers: Some(numbers.into()),
        }
    }

    /// Check every field and collect all violations.
    ///
    /// Returns the validated pair, or a field→message map naming each field
    /// that failed. All fields are checked even after the first failure.
    pub fn validate(&self) -> Result<ValidatedAgenda, BTreeMap<String, String>> {
        let morada = match self.morada.as_deref() {
            None => Err(ValidationError::MissingField(Morada::FIELD)),
            Some(value) => Morada::new(value),
        };
        let numbers = match self.numbers.as_deref() {
            None => Err(ValidationError::MissingField(PhoneNumbers::FIELD)),
            Some(value) => PhoneNumbers::new(value),
        };

        match (morada, numbers) {
            (Ok(morada), Ok(numbers)) => Ok(ValidatedAgenda { morada, numbers }),
            (morada, numbers) => {
                let violations: Vec<ValidationError> =
                    [morada.err(), numbers.err()].into_iter().flatten().collect();
                Err(violation_map(&violations))
            }
        }
    }
}

fn violation_map(violations: &[ValidationError]) -> BTreeMap<String, String> {
    violations
        .iter()
        .map(|v| (v.field().to_string(), v.message()))
        .collect()
}
