//! Bearer-token identity
//!
//! Tokens are `hex(claims_json).hex(signature)` where the signature is an
//! ed25519 signature over the raw claims bytes. Verification only checks the
//! signature, the expiry and the subject shape; the subject string is then
//! trusted verbatim as the collection key-space prefix.

use crate::config::{ConfigError, ServiceConfig};
use chrono::Utc;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum identity length in characters
pub const MAX_IDENTITY_LEN: usize = 64;

/// Authentication failures. All of them surface as Unauthorized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header
    #[error("missing credential")]
    Missing,

    /// Header or token does not have the expected shape
    #[error("malformed credential: {0}")]
    Malformed(&'static str),

    /// Signature does not verify
    #[error("invalid credential signature")]
    BadSignature,

    /// Token past its expiry
    #[error("credential expired")]
    Expired,

    /// Subject is not usable as an identity
    #[error("invalid identity: {0}")]
    InvalidSubject(String),
}

/// Verified subject string scoping a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Create identity, rejecting key-space separators and wildcards
    pub fn new(value: impl Into<String>) -> Result<Self, AuthError> {
        let value = value.into();
        if value.is_empty() {
            return Err(AuthError::InvalidSubject("empty".to_string()));
        }
        if value.chars().count() > MAX_IDENTITY_LEN {
            return Err(AuthError::InvalidSubject(format!(
                "longer than {MAX_IDENTITY_LEN} characters"
            )));
        }
        if let Some(c) = value
            .chars()
            .find(|c| matches!(c, ':' | '*' | '?' | '[' | ']') || c.is_whitespace() || c.is_control())
        {
            return Err(AuthError::InvalidSubject(format!(
                "contains reserved character {c:?}"
            )));
        }
        Ok(Self(value))
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identity {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

/// Signed token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity)
    pub sub: String,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
}

/// Issues and verifies identity tokens
pub struct TokenAuthority {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
    ttl_secs: i64,
}

impl TokenAuthority {
    /// Create authority from a signing key
    #[must_use]
    pub fn new(signing_key: SigningKey, ttl_secs: i64) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
            ttl_secs,
        }
    }

    /// Create authority with a fresh random key
    #[must_use]
    pub fn generate(ttl_secs: i64) -> Self {
        let mut csprng = OsRng;
        Self::new(SigningKey::generate(&mut csprng), ttl_secs)
    }

    /// Create authority from configuration
    ///
    /// Uses the configured hex seed when present, otherwise a random key
    /// (tokens then do not survive a restart).
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let ttl = i64::try_from(config.token_ttl_secs)
            .map_err(|_| ConfigError::Invalid("token_ttl_secs out of range".to_string()))?;

        match &config.signing_seed_hex {
            Some(seed) => {
                let bytes = hex::decode(seed)
                    .map_err(|e| ConfigError::Invalid(format!("signing_seed_hex: {e}")))?;
                let seed: [u8; 32] = bytes.try_into().map_err(|_| {
                    ConfigError::Invalid("signing_seed_hex must be 32 bytes".to_string())
                })?;
                Ok(Self::new(SigningKey::from_bytes(&seed), ttl))
            }
            None => {
                tracing::warn!("no signing seed configured, issued tokens will not survive a restart");
                Ok(Self::generate(ttl))
            }
        }
    }

    /// Issue a token for `identity` valid from now
    #[must_use]
    pub fn issue(&self, identity: &Identity) -> String {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now`
    #[must_use]
    pub fn issue_at(&self, identity: &Identity, now: i64) -> String {
        let claims = Claims {
            sub: identity.as_str().to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };
        // Claims is a plain struct of strings and integers.
        let payload = serde_json::to_vec(&claims).unwrap_or_default();
        let signature = self.signing_key.sign(&payload);
        format!("{}.{}", hex::encode(&payload), hex::encode(signature.to_bytes()))
    }

    /// Verify a raw `Authorization` header value and extract the identity
    pub fn verify(&self, header: Option<&str>) -> Result<Identity, AuthError> {
        self.verify_at(header, Utc::now().timestamp())
    }

    /// Verify as if the current time were `now`
    pub fn verify_at(&self, header: Option<&str>, now: i64) -> Result<Identity, AuthError> {
        let header = header.map(str::trim).filter(|h| !h.is_empty()).ok_or(AuthError::Missing)?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Malformed("expected `Bearer <token>`"))?;

        let (payload_hex, signature_hex) = token
            .split_once('.')
            .ok_or(AuthError::Malformed("missing signature segment"))?;
        let payload = hex::decode(payload_hex).map_err(|_| AuthError::Malformed("payload is not hex"))?;
        let signature_bytes =
            hex::decode(signature_hex).map_err(|_| AuthError::Malformed("signature is not hex"))?;
        let signature = Signature::from_slice(&signature_bytes)
            .map_err(|_| AuthError::Malformed("signature has wrong length"))?;

        self.verifying_key
            .verify(&payload, &signature)
            .map_err(|_| AuthError::BadSignature)?;

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::Malformed("claims are not valid JSON"))?;
        if claims.exp <= now {
            return Err(AuthError::Expired);
        }
        Identity::new(claims.sub)
    }

    /// Get the public verifying key
    #[inline]
    #[must_use]
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("verifying_key", &hex::encode(self.verifying_key.as_bytes()))
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
