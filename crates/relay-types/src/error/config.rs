//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Errors that can occur while assembling the relay configuration.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Config validation error (invalid values)
    #[error("Config validation error for {field}: {message}")]
    ValidationError {
        /// Dotted path of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// `.env` file exists but could not be read or parsed
    #[error("Failed to load env file: {message}")]
    EnvFile {
        /// Description of the load failure
        message: String,
    },
}

impl ConfigError {
    /// Reduce `validator` output to the first offending field (sorted by path).
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        match first_field_error(errors, "") {
            Some((field, message)) => Self::ValidationError { field, message },
            None => Self::ValidationError { field: "config".to_string(), message: errors.to_string() },
        }
    }
}

fn first_field_error(errors: &ValidationErrors, prefix: &str) -> Option<(String, String)> {
    let mut entries = errors.errors().iter().collect::<Vec<_>>();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (name, kind) in entries {
        let path = if prefix.is_empty() { name.to_string() } else { format!("{}.{}", prefix, name) };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let message = errs
                    .iter()
                    .map(|e| e.message.as_ref().map_or_else(|| e.code.to_string(), |m| m.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Some((path, message));
            },
            ValidationErrorsKind::Struct(inner) => {
                if let Some(found) = first_field_error(inner, &path) {
                    return Some(found);
                }
            },
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    if let Some(found) = first_field_error(inner, &path) {
                        return Some(found);
                    }
                }
            },
        }
    }
    None
}
