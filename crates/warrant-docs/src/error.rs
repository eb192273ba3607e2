//! Error types for document generation.

use thiserror::Error;

/// Errors that can occur while emitting a specification document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize the specification to JSON.
    #[error("failed to serialize specification: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for document operations.
pub type DocsResult<T> = Result<T, DocsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error_message() {
        let err: DocsError = serde_json::from_str::<String>("not json").unwrap_err().into();
        assert!(err.to_string().contains("serialize"));
    }
}
