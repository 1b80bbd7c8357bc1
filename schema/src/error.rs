use thiserror::Error;

use crate::type_descriptor::TypeName;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";

/// Result type for the `api_schema` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Error categories raised while converting types into schemas
#[derive(Error)]
pub enum Error {
    /// A type catalog could not be loaded or is inconsistent
    #[error("Type catalog error: {0}")]
    Catalog(String),

    /// A converter claimed a type but could not build its schema
    #[error("Conversion of '{type_name}' failed: {message}")]
    ConversionFailed {
        /// The type being converted
        type_name: TypeName,
        /// What went wrong
        message:   String,
    },

    /// Reading or writing a file failed
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// Internal invariant broken
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A generic type signature could not be parsed
    #[error("Invalid type signature '{signature}': {reason}")]
    InvalidSignature {
        /// The text that failed to parse
        signature: String,
        /// Parser explanation
        reason:    String,
    },

    /// Component registry protocol violation (populate on a missing slot, etc.)
    #[error("Registry conflict: {0}")]
    RegistryConflict(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(s) => f.debug_tuple("Catalog").field(s).finish(),
            Self::ConversionFailed { type_name, message } => f
                .debug_struct("ConversionFailed")
                .field("type_name", type_name)
                .field("message", message)
                .finish(),
            Self::FileOperation(s) => f.debug_tuple("FileOperation").field(s).finish(),
            Self::InvalidState(s) => f.debug_tuple("InvalidState").field(s).finish(),
            Self::InvalidSignature { signature, reason } => f
                .debug_struct("InvalidSignature")
                .field("signature", signature)
                .field("reason", reason)
                .finish(),
            Self::RegistryConflict(s) => f.debug_tuple("RegistryConflict").field(s).finish(),
            Self::Serialization(s) => f.debug_tuple("Serialization").field(s).finish(),
        }
    }
}

impl Error {
    /// Create a "Failed to X" error
    pub fn failed_to(action: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidState(format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"))
    }

    /// Create an "Invalid X" error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidState(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create error for a converter that could not finish a type
    pub fn conversion_failed(type_name: &TypeName, message: impl Into<String>) -> Self {
        Self::ConversionFailed {
            type_name: type_name.clone(),
            message:   message.into(),
        }
    }

    /// Create error for IO operations
    pub fn io_failed(
        operation: &str,
        path: &std::path::Path,
        error: impl std::fmt::Display,
    ) -> Self {
        Self::FileOperation(format!(
            "{MSG_FAILED_TO_PREFIX} {operation} {}: {error}",
            path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_messages() {
        let error = Error::io_failed(
            "read",
            std::path::Path::new("/tmp/catalog.json"),
            "not found",
        );
        assert_eq!(
            error.to_string(),
            "File operation failed: Failed to read /tmp/catalog.json: not found"
        );

        let error = Error::conversion_failed(&TypeName::from("com.acme.Order"), "boom");
        assert_eq!(error.to_string(), "Conversion of 'com.acme.Order' failed: boom");

        let error = Error::invalid("arguments", "none given");
        assert_eq!(error.to_string(), "Invalid state: Invalid arguments: none given");
    }
}
