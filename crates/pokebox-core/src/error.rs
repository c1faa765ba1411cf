//! Error taxonomy at the request boundary
//!
//! Every failure that reaches a caller is one of five kinds:
//! - Bad input (malformed request parameters)
//! - Validation failure (schema violation, with field-level detail)
//! - Not found (catalog entity or collection entry)
//! - Unauthorized (missing or invalid identity credential)
//! - Internal failure (anything unexpected from upstream or the store)

use crate::auth::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field-level validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as it appears in the payload (camelCase)
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Create new field error
    #[inline]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered list of field errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    /// Create empty list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with `field`
    #[inline]
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if any error mentions `field`
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when empty, otherwise the accumulated errors
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Borrow as slice
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Error classification with stable status and code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadInput,
    Validation,
    NotFound,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[inline]
    #[must_use]
    pub fn status(self) -> u16 {
        match self {
            ErrorKind::BadInput => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Validation => 422,
            ErrorKind::Internal => 500,
        }
    }

    /// Machine-readable code
    #[inline]
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::BadInput => "BAD_INPUT",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

/// Main request-boundary error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request parameters
    #[error("bad input: {0}")]
    BadInput(String),

    /// Payload failed schema validation
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Missing catalog entity or collection entry
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or invalid credential
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// Unexpected upstream or store failure
    #[error("internal failure: {0}")]
    Internal(String),
}

impl ApiError {
    /// Classify this error
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadInput(_) => ErrorKind::BadInput,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status code
    #[inline]
    #[must_use]
    pub fn status(&self) -> u16 {
        self.kind().status()
    }

    /// Response body. Internal details are not exposed to callers.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let kind = self.kind();
        let (message, errors) = match self {
            Self::BadInput(msg) | Self::NotFound(msg) => (msg.clone(), None),
            Self::Validation(errors) => ("payload failed validation".to_string(), Some(errors.0.clone())),
            Self::Unauthorized(err) => (err.to_string(), None),
            Self::Internal(_) => ("internal server error".to_string(), None),
        };
        ErrorBody {
            code: kind.code().to_string(),
            message,
            errors,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Serialized error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorBody {
    /// Create body for an arbitrary kind
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            code: kind.code().to_string(),
            message: message.into(),
            errors: None,
        }
    }
}
