//! Error types for the Roster profile directory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Roster workspace.
///
/// Variants fall into three families that callers treat differently:
/// validation and not-found errors are handled inline by the caller, while
/// persistence errors (see [`RosterError::is_persistence`]) mean that the
/// in-memory state may not survive a reload.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RosterError {
    /// Bad or missing input field
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Address could not be turned into coordinates
    #[error("Geocoding error: {0}")]
    Geocoding(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RosterError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for the named input field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Migration error
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Geocoding error
    pub fn geocoding(message: impl Into<String>) -> Self {
        Self::Geocoding(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from the persistence medium.
    ///
    /// Returns true for IO, serialization, data access and migration errors.
    /// The store keeps its in-memory state when one of these is raised.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Serialization { .. } | Self::DataAccess(_) | Self::Migration(_)
        )
    }

    /// Returns the offending field name for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RosterError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RosterError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, RosterError>`.
pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_kinds() {
        assert!(RosterError::io("disk full").is_persistence());
        assert!(RosterError::data_access("quota").is_persistence());
        assert!(RosterError::migration("bad version").is_persistence());
        assert!(!RosterError::validation("name", "required").is_persistence());
        assert!(!RosterError::not_found("profile", "p-1").is_persistence());
    }

    #[test]
    fn test_validation_field() {
        let err = RosterError::validation("address.coordinates", "required");
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("address.coordinates"));
        assert_eq!(
            err.to_string(),
            "Validation error: address.coordinates - required"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err: RosterError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, RosterError::Serialization { ref format, .. } if format == "JSON"));
    }
}
