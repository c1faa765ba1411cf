//! Error types for the collection store

use pokebox_core::{ApiError, FieldErrors};

/// Key-value backend errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Store used before `connect` or after `disconnect`
    #[error("store is not connected")]
    Disconnected,

    /// Backend-specific failure
    #[error("store backend error: {0}")]
    Backend(String),

    /// Key pattern could not be compiled
    #[error("invalid key pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },
}

/// Collection operation errors
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// No entry with this id under the requesting identity
    #[error("entry '{0}' not found")]
    NotFound(String),

    /// Payload or merged record failed schema validation
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// Key-value backend failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored value could not be decoded
    #[error("stored entry at {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

impl CollectionError {
    /// Check if error is a missing entry
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<CollectionError> for ApiError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CollectionError::Validation(errors) => ApiError::Validation(errors),
            CollectionError::Store(_) | CollectionError::Corrupt { .. } => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokebox_core::ErrorKind;

    #[test]
    fn collection_error_mapping() {
        assert_eq!(
            ApiError::from(CollectionError::NotFound("abc".to_string())).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ApiError::from(CollectionError::Validation(FieldErrors::new())).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ApiError::from(CollectionError::Store(StoreError::Disconnected)).kind(),
            ErrorKind::Internal
        );
        assert_eq!(
            ApiError::from(CollectionError::Corrupt {
                key: "ash:box:1".to_string(),
                reason: "eof".to_string()
            })
            .kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn not_found_message_names_the_id() {
        let err = CollectionError::NotFound("abc".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "entry 'abc' not found");
    }
}
