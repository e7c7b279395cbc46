//! Consent record types
//!
//! The three-boolean-plus-timestamp structure representing a visitor's
//! cookie-category decisions, and the category enum loaders gate on.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Cookie categories a site may gate scripts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieCategory {
    /// Required for site functionality; never subject to opt-out
    Essential,
    /// Usage-measurement scripts
    Analytics,
    /// Personalization and advertising scripts
    Marketing,
}

/// A visitor's recorded cookie-category decision
///
/// A record is either fully absent (no decision yet) or fully present:
/// `analytics` and `marketing` are required on the wire, so a stored blob
/// missing either fails to parse and counts as no decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// Always `true`; not user-settable
    #[serde(default = "default_essential")]
    pub essential: bool,

    /// Whether analytics scripts may run
    pub analytics: bool,

    /// Whether marketing scripts may run
    pub marketing: bool,

    /// RFC 3339 time the decision was made. Absent on records written
    /// before decisions were stamped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

fn default_essential() -> bool {
    true
}

impl Default for ConsentRecord {
    /// The safe default: essential only, nothing granted
    fn default() -> Self {
        Self {
            essential: true,
            analytics: false,
            marketing: false,
            timestamp: None,
        }
    }
}

impl ConsentRecord {
    /// Build a record from a user decision, stamped with the current time
    pub fn decided(analytics: bool, marketing: bool) -> Self {
        Self {
            essential: true,
            analytics,
            marketing,
            timestamp: Some(Utc::now().to_rfc3339()),
        }
    }

    /// Parse a persisted record, degrading to `None` on malformed input
    ///
    /// A corrupt or wrong-shaped blob means "no decision", never an error:
    /// the banner re-prompts instead of the page breaking.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(record) => Some(record.normalized()),
            Err(e) => {
                tracing::warn!("malformed consent record, treating as no decision: {e}");
                None
            }
        }
    }

    /// Serialize for persistence
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Whether the given category is granted by this record
    pub fn grants(&self, category: CookieCategory) -> bool {
        match category {
            CookieCategory::Essential => true,
            CookieCategory::Analytics => self.analytics,
            CookieCategory::Marketing => self.marketing,
        }
    }

    /// Restore the `essential` invariant, whatever a stored blob claimed
    fn normalized(mut self) -> Self {
        if !self.essential {
            tracing::warn!("stored consent record had essential=false, coercing to true");
            self.essential = true;
        }
        self
    }
}
