//! Error types for the collection transform

use thiserror::Error;

/// Result type alias for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;

/// Structural transform failures
///
/// Enrichment failures never show up here; they degrade to source values.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The document cannot be read as a collection
    #[error("Invalid collection: {0}")]
    InvalidCollection(String),

    /// Assembling the output records failed
    #[error("Failed to assemble workflow definition: {0}")]
    Assembly(String),
}

impl From<serde_json::Error> for TransformError {
    fn from(err: serde_json::Error) -> Self {
        TransformError::Assembly(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_collection_display() {
        let err = TransformError::InvalidCollection("item[0]: expected a map".to_string());
        assert_eq!(err.to_string(), "Invalid collection: item[0]: expected a map");
    }

    #[test]
    fn test_assembly_display() {
        let err = TransformError::Assembly("boom".to_string());
        assert_eq!(err.to_string(), "Failed to assemble workflow definition: boom");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransformError>();
    }
}
