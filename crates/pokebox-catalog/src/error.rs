//! Upstream catalog errors

use pokebox_core::ApiError;

/// Errors from the upstream catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Upstream answered "not found"
    #[error("{resource} '{name}' not found")]
    NotFound {
        /// Resource kind, e.g. `pokemon`
        resource: &'static str,
        /// Requested name
        name: String,
    },

    /// Request could not be completed
    #[error("catalog transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("catalog decode error: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Create not-found error
    #[inline]
    pub fn not_found(resource: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            name: name.into(),
        }
    }

    /// Check if upstream reported a missing entity
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            CatalogError::Transport(_) | CatalogError::Decode(_) => {
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
    fn not_found_maps_to_not_found() {
        let err = CatalogError::not_found("pokemon", "missingno");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "pokemon 'missingno' not found");
        assert_eq!(ApiError::from(err).kind(), ErrorKind::NotFound);
    }

    #[test]
    fn transport_maps_to_internal() {
        let err = CatalogError::Transport("connection refused".to_string());
        assert!(!err.is_not_found());
        assert_eq!(ApiError::from(err).kind(), ErrorKind::Internal);
        assert_eq!(
            ApiError::from(CatalogError::Decode("eof".to_string())).kind(),
            ErrorKind::Internal
        );
    }
}
