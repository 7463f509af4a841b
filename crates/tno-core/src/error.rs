//! Error types for the annotator.

/// Errors raised by a [`MessageHandle`](crate::message::MessageHandle) when
/// reading or persisting message state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing storage could not be read or written.
    #[error("message store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The message could not be serialized for storage.
    #[error("message could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The host refused the update.
    #[error("message update rejected: {0}")]
    Rejected(String),
}

/// Convenience result type for message store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while annotating a message.
#[derive(Debug, thiserror::Error)]
pub enum TnoError {
    /// Writing the processed marker or the annotated content failed.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    /// The annotator configuration is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A JSON document (config, catalog, event) could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for annotator operations.
pub type TnoResult<T> = Result<T, TnoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_wraps_into_persistence() {
        let err: TnoError = StoreError::Rejected("read-only".to_string()).into();
        assert_eq!(
            err.to_string(),
            "persistence failure: message update rejected: read-only"
        );
    }

    #[test]
    fn invalid_config_display() {
        let err = TnoError::InvalidConfig("namespace is empty".to_string());
        assert_eq!(err.to_string(), "invalid config: namespace is empty");
    }
}
