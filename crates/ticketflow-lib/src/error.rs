//! Error types for `ticketflow-lib`.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::TicketId;

/// Primary error type for ticketflow-lib operations.
#[derive(Error, Debug)]
pub enum TicketError {
    // === Ticket Errors ===
    /// Ticket with the specified ID was not found.
    #[error("Ticket not found: {id}")]
    TicketNotFound { id: TicketId },

    /// Attempted to insert a ticket whose ID already exists.
    #[error("Ticket ID collision: {id}")]
    IdCollision { id: TicketId },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {}", format_errors(errors))]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Invalid status value.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    /// Invalid priority value.
    #[error("Invalid priority: {priority}")]
    InvalidPriority { priority: String },

    /// Invalid sort key or direction.
    #[error("Invalid sort: {value}")]
    InvalidSort { value: String },

    /// Invalid view mode.
    #[error("Invalid view mode: {value}")]
    InvalidView { value: String },

    // === Session Errors ===
    /// Username or password missing at login.
    #[error("Please enter both username and password")]
    InvalidCredentials,

    /// A command needing a session ran without one.
    #[error("Not logged in (run `tkt login` first)")]
    NotLoggedIn,

    // === Storage Errors ===
    /// A stored value could not be decoded.
    #[error("Corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// No ID above the highest stored one is left to allocate.
    #[error("No ticket IDs left after {last}")]
    IdSpaceExhausted { last: TicketId },

    /// Generic storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Directory not found at the specified path.
    #[error("Data directory not found: {0}")]
    DataDirNotFound(PathBuf),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TicketError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// Field errors carried by this error, if it is a validation failure.
    #[must_use]
    pub fn field_errors(&self) -> Vec<ValidationError> {
        match self {
            Self::Validation { field, reason } => vec![ValidationError::new(field, reason)],
            Self::ValidationErrors { errors } => errors.clone(),
            _ => Vec::new(),
        }
    }
}

/// Result type using `TicketError`.
pub type Result<T> = std::result::Result<T, TicketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_validation_error_collapses() {
        let err = TicketError::from_validation_errors(vec![ValidationError::new(
            "title",
            "Title is required",
        )]);
        assert!(matches!(err, TicketError::Validation { .. }));
        assert_eq!(err.to_string(), "Validation failed: title: Title is required");
    }

    #[test]
    fn multiple_validation_errors_keep_every_field() {
        let err = TicketError::from_validation_errors(vec![
            ValidationError::new("title", "Title is required"),
            ValidationError::new("description", "Description is required"),
        ]);
        let fields: Vec<String> = err.field_errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "description"]);
        assert!(err.to_string().contains("description: Description is required"));
    }
}
