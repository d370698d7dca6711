//! Request payloads accepted by the JSON API.
//!
//! Each form deserializes the raw request, runs its `validator` rules and is
//! then turned into a payload made of domain value objects.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod activities;
pub mod auth;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod onboarding;
pub mod tools;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Value(#[from] TypeConstraintError),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("duplicate tool: {0}")]
    DuplicateTool(String),

    #[error("tool config must be a JSON object")]
    InvalidToolConfig,

    #[error("role {0} cannot be assigned")]
    RoleNotAssignable(String),

    #[error("invalid csv: {0}")]
    Csv(String),
}

impl From<csv::Error> for FormError {
    fn from(err: csv::Error) -> Self {
        FormError::Csv(err.to_string())
    }
}

/// Trims an optional free-text field, dropping blank values.
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_drops_blank_values() {
        assert_eq!(trimmed(Some("  ".into())), None);
        assert_eq!(trimmed(Some(" Sales ".into())), Some("Sales".into()));
        assert_eq!(trimmed(None), None);
    }
}
