use std::collections::BTreeMap;

use thiserror::Error;

use super::field::Field;
use super::record::FormRecord;

/// A required field left unanswered.
///
/// The `Display` text is the message shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an institution")]
    MissingInstitution,
    #[error("Please select if UGC CCFUGP is followed")]
    MissingUgcPolicy,
}

impl ValidationError {
    /// The field this error is reported against.
    pub fn field(self) -> Field {
        match self {
            ValidationError::MissingInstitution => Field::Institution,
            ValidationError::MissingUgcPolicy => Field::UgcPolicyFollowed,
        }
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, ValidationError>);

impl ValidationErrors {
    /// Returns the error recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    /// Returns the message recorded for `field`, if any.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    /// Removes the error for `field`. Returns `true` if one was present.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates errors in field display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    fn insert(&mut self, error: ValidationError) {
        self.0.insert(error.field(), error);
    }
}

/// Checks the two required answers and returns a fresh set of errors.
///
/// Every other field is optional, including numeric fields holding text that
/// does not parse; those never produce an error.
pub fn validate_record(record: &FormRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if record.institution.is_empty() {
        errors.insert(ValidationError::MissingInstitution);
    }
    if record.ugc_policy_followed.is_none() {
        errors.insert(ValidationError::MissingUgcPolicy);
    }
    errors
}
