//! Collection key-space

use pokebox_core::Identity;

/// Default middle key segment
pub const DEFAULT_NAMESPACE: &str = "box";

/// Builds and parses `identity:namespace:id` keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    namespace: String,
}

impl KeySpace {
    /// Create key-space for a namespace
    #[inline]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Get namespace
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key prefix shared by every entry of `identity`
    #[must_use]
    pub fn prefix(&self, identity: &Identity) -> String {
        format!("{}:{}:", identity, self.namespace)
    }

    /// Key of one entry
    #[must_use]
    pub fn entry_key(&self, identity: &Identity, id: &str) -> String {
        format!("{}{}", self.prefix(identity), id)
    }

    /// Pattern matching every entry of `identity`
    #[must_use]
    pub fn pattern(&self, identity: &Identity) -> String {
        format!("{}*", self.prefix(identity))
    }

    /// Id segment of a key belonging to `identity`
    #[must_use]
    pub fn entry_id<'k>(&self, identity: &Identity, key: &'k str) -> Option<&'k str> {
        key.strip_prefix(&self.prefix(identity))
            .filter(|id| !id.is_empty())
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}
