//! Consent State Controller
//!
//! Single authority for reading, validating, persisting, and broadcasting
//! consent decisions. Constructed once at page init with injected storage
//! and notification dependencies; everything else on the page queries it.

use crate::banner::{BannerAction, BannerAdapter};
use crate::config::{ConsentOptions, GatingPolicy};
use crate::models::{ConsentRecord, CookieCategory};
use crate::notify::{ConsentBroadcaster, CONSENT_CHANGED};
use crate::store::KeyValueStore;

/// Owns the canonical consent record and its lifecycle
pub struct ConsentController {
    store: Box<dyn KeyValueStore>,
    broadcaster: Box<dyn ConsentBroadcaster>,
    options: ConsentOptions,
    /// Write-through cache of the persisted record; `None` means no decision
    current: Option<ConsentRecord>,
    banner_required: bool,
}

impl ConsentController {
    /// Construct with default options, loading any persisted decision
    pub fn new(store: Box<dyn KeyValueStore>, broadcaster: Box<dyn ConsentBroadcaster>) -> Self {
        Self::with_options(store, broadcaster, ConsentOptions::default())
    }

    /// Construct with explicit options
    ///
    /// The banner-presentation decision is taken here, exactly once per
    /// load: the banner is required iff no prior decision could be read.
    pub fn with_options(
        store: Box<dyn KeyValueStore>,
        broadcaster: Box<dyn ConsentBroadcaster>,
        options: ConsentOptions,
    ) -> Self {
        let current = load_record(store.as_ref(), &options.storage_key);
        let banner_required = current.is_none();

        if let Some(record) = &current {
            tracing::debug!(
                analytics = record.analytics,
                marketing = record.marketing,
                "loaded persisted consent decision"
            );
        }

        Self {
            store,
            broadcaster,
            options,
            current,
            banner_required,
        }
    }

    /// Current record, or the safe default when no decision exists
    ///
    /// Never fails and never creates state: with storage absent or
    /// unreadable this silently returns the in-memory default.
    pub fn get_consent(&self) -> ConsentRecord {
        self.current.clone().unwrap_or_default()
    }

    /// Whether any decision has been recorded
    ///
    /// Distinguishes "no decision yet" from "decision = reject all".
    pub fn has_decision(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the banner should be shown
    ///
    /// True on a load with no prior decision, cleared by any recorded
    /// decision, re-raised only by [`reset_decision`](Self::reset_decision).
    pub fn banner_required(&self) -> bool {
        self.banner_required
    }

    /// Record a decision: persist, cache, notify
    ///
    /// The only way a record is created or changed. Persistence failure is
    /// a soft-fail: the session still sees the new record and listeners are
    /// still notified, but the decision will not survive a reload.
    pub fn record_decision(&mut self, analytics: bool, marketing: bool) -> ConsentRecord {
        let record = ConsentRecord::decided(analytics, marketing);

        match record.to_json() {
            Ok(raw) => {
                if let Err(e) = self.store.set(&self.options.storage_key, &raw) {
                    tracing::warn!("failed to persist consent decision: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize consent decision: {e}"),
        }

        self.current = Some(record.clone());
        self.banner_required = false;
        self.broadcaster.broadcast(CONSENT_CHANGED, &record);
        tracing::debug!(analytics, marketing, "consent decision recorded");

        record
    }

    /// The Accept All banner action
    pub fn accept_all(&mut self) -> ConsentRecord {
        self.record_decision(true, true)
    }

    /// The Reject Non-Essential banner action
    pub fn reject_non_essential(&mut self) -> ConsentRecord {
        self.record_decision(false, false)
    }

    /// The Save Preferences banner action, with the submitted checkbox states
    pub fn save_preferences(&mut self, analytics: bool, marketing: bool) -> ConsentRecord {
        self.record_decision(analytics, marketing)
    }

    /// Delete the persisted decision and re-raise the banner
    ///
    /// Used by "manage cookie preferences" compliance flows. After this,
    /// [`has_decision`](Self::has_decision) is false and
    /// [`get_consent`](Self::get_consent) returns the default record.
    pub fn reset_decision(&mut self) {
        if let Err(e) = self.store.remove(&self.options.storage_key) {
            tracing::warn!("failed to remove persisted consent: {e}");
        }
        self.current = None;
        self.banner_required = true;
        tracing::debug!("consent decision reset");
    }

    /// Whether scripts in `category` may run under the configured policy
    ///
    /// `Essential` is always allowed. With no decision recorded, the
    /// answer depends on the gating policy: blocked under
    /// [`GatingPolicy::BlockUntilDecision`], permitted under
    /// [`GatingPolicy::Advisory`].
    pub fn allows(&self, category: CookieCategory) -> bool {
        if category == CookieCategory::Essential {
            return true;
        }

        match (&self.current, self.options.gating) {
            (Some(record), _) => record.grants(category),
            (None, GatingPolicy::BlockUntilDecision) => false,
            (None, GatingPolicy::Advisory) => true,
        }
    }

    /// Show the banner through `adapter` if it is required
    pub fn present_banner(&mut self, adapter: &mut dyn BannerAdapter) {
        if self.banner_required {
            adapter.render(&self.get_consent());
        }
    }

    /// Apply a banner action, then hide the banner
    pub fn handle_banner_action(
        &mut self,
        action: BannerAction,
        adapter: &mut dyn BannerAdapter,
    ) -> ConsentRecord {
        let record = match action {
            BannerAction::AcceptAll => self.accept_all(),
            BannerAction::RejectNonEssential => self.reject_non_essential(),
            BannerAction::SavePreferences {
                analytics,
                marketing,
            } => self.save_preferences(analytics, marketing),
        };

        adapter.hide();
        record
    }
}

/// Read the persisted record, degrading to "no decision" on any failure
fn load_record(store: &dyn KeyValueStore, key: &str) -> Option<ConsentRecord> {
    match store.get(key) {
        Ok(Some(raw)) => ConsentRecord::from_json(&raw),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("consent storage unreadable, treating as no decision: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::EventBus;
    use crate::store::MemoryStore;

    fn fresh_controller() -> ConsentController {
        ConsentController::new(Box::new(MemoryStore::new()), Box::new(EventBus::new()))
    }

    #[test]
    fn test_fresh_session_has_no_decision() {
        let controller = fresh_controller();

        assert!(!controller.has_decision());
        assert!(controller.banner_required());
        assert_eq!(controller.get_consent(), ConsentRecord::default());
    }

    #[test]
    fn test_get_consent_has_no_side_effect() {
        let store = MemoryStore::new();
        let controller =
            ConsentController::new(Box::new(store), Box::new(EventBus::new()));

        let _ = controller.get_consent();
        let _ = controller.get_consent();

        // Querying never creates state
        assert!(!controller.has_decision());
    }

    #[test]
    fn test_record_decision_returns_last_values() {
        let mut controller = fresh_controller();

        controller.record_decision(true, true);
        controller.record_decision(false, true);
        let record = controller.record_decision(true, false);

        assert!(record.essential);
        let current = controller.get_consent();
        assert!(current.analytics);
        assert!(!current.marketing);
        assert!(current.essential);
    }

    #[test]
    fn test_has_decision_flips_on_first_record() {
        let mut controller = fresh_controller();

        assert!(!controller.has_decision());
        controller.record_decision(false, false);
        assert!(controller.has_decision());
    }

    #[test]
    fn test_reject_all_is_still_a_decision() {
        let mut controller = fresh_controller();

        controller.reject_non_essential();

        assert!(controller.has_decision());
        let record = controller.get_consent();
        assert!(!record.analytics);
        assert!(!record.marketing);
    }

    #[test]
    fn test_decision_clears_banner() {
        let mut controller = fresh_controller();

        assert!(controller.banner_required());
        controller.accept_all();
        assert!(!controller.banner_required());
    }

    #[test]
    fn test_reset_reverts_to_default() {
        let mut controller = fresh_controller();

        controller.accept_all();
        controller.reset_decision();

        assert!(!controller.has_decision());
        assert!(controller.banner_required());
        assert_eq!(controller.get_consent(), ConsentRecord::default());
    }

    #[test]
    fn test_wrappers_map_to_standard_actions() {
        let mut controller = fresh_controller();

        let record = controller.accept_all();
        assert!(record.analytics && record.marketing);

        let record = controller.reject_non_essential();
        assert!(!record.analytics && !record.marketing);

        let record = controller.save_preferences(true, false);
        assert!(record.analytics && !record.marketing);
    }

    #[test]
    fn test_blocking_policy_denies_until_decision() {
        let mut controller = fresh_controller();

        assert!(controller.allows(CookieCategory::Essential));
        assert!(!controller.allows(CookieCategory::Analytics));
        assert!(!controller.allows(CookieCategory::Marketing));

        controller.record_decision(true, false);

        assert!(controller.allows(CookieCategory::Analytics));
        assert!(!controller.allows(CookieCategory::Marketing));
    }

    #[test]
    fn test_advisory_policy_permits_until_decision() {
        let options = ConsentOptions::new().with_gating(GatingPolicy::Advisory);
        let mut controller = ConsentController::with_options(
            Box::new(MemoryStore::new()),
            Box::new(EventBus::new()),
            options,
        );

        assert!(controller.allows(CookieCategory::Analytics));
        assert!(controller.allows(CookieCategory::Marketing));

        controller.reject_non_essential();

        assert!(!controller.allows(CookieCategory::Analytics));
        assert!(!controller.allows(CookieCategory::Marketing));
        assert!(controller.allows(CookieCategory::Essential));
    }

    #[test]
    fn test_custom_storage_key() {
        let mut store = MemoryStore::new();
        store.set("site_consent", "garbage").unwrap();

        let options = ConsentOptions::new().with_storage_key("site_consent");
        let mut controller = ConsentController::with_options(
            Box::new(store),
            Box::new(EventBus::new()),
            options,
        );

        // Garbage under the configured key reads as no decision
        assert!(!controller.has_decision());

        controller.accept_all();
        assert!(controller.has_decision());
    }
}
