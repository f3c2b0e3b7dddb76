//! Error types for ormcli

use thiserror::Error;

/// Result type alias for ormcli operations
pub type CliResult<T> = Result<T, CliError>;

/// Error types for CLI derivation and dispatch
///
/// Expected user-facing outcomes (record not found, empty change set,
/// declined confirmation) are never errors: operations report them and
/// return `Ok(false)`. These variants cover genuine failures only.
#[derive(Debug, Error)]
pub enum CliError {
    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Change set names a field the model does not declare
    #[error("Unknown field `{0}`")]
    UnknownField(String),

    /// Change set value does not match the field's storage type
    #[error("Type mismatch on field '{field}': {message}")]
    TypeMismatch { field: String, message: String },

    /// Invalid combination of provided options
    #[error("Usage error: {0}")]
    Usage(String),

    /// Terminal prompt failure
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a type mismatch error for a specific field
    pub fn type_mismatch(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this is an unknown field error
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField(_))
    }

    /// Check if this is a type mismatch error
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Check if this is a usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}
