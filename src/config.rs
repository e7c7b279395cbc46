//! Controller configuration

/// Storage key the original release shipped with
///
/// Must stay stable across releases so upgrades do not orphan prior
/// decisions.
pub const DEFAULT_STORAGE_KEY: &str = "leocyte_cookie_consent";

/// How loaders treat the absence of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatingPolicy {
    /// Non-essential categories are blocked until an explicit decision
    /// grants them
    #[default]
    BlockUntilDecision,
    /// Notifications are informational only; non-essential categories are
    /// not blocked before a decision exists
    Advisory,
}

/// Options for [`ConsentController`](crate::ConsentController)
#[derive(Debug, Clone)]
pub struct ConsentOptions {
    /// Key the serialized record is stored under
    pub storage_key: String,

    /// Gating behavior before an explicit decision exists
    pub gating: GatingPolicy,
}

impl Default for ConsentOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            gating: GatingPolicy::default(),
        }
    }
}

impl ConsentOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the storage key
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Override the gating policy
    pub fn with_gating(mut self, policy: GatingPolicy) -> Self {
        self.gating = policy;
        self
    }
}
