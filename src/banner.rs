//! Presentation-adapter contract for the consent banner
//!
//! The controller decides *whether* the banner shows and what each button
//! means; how the dialog renders is the host page's business. Keeping the
//! seam here lets the controller run against any rendering technology,
//! including none at all in tests.

use crate::models::ConsentRecord;

/// The three standard banner actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerAction {
    /// Grant analytics and marketing
    AcceptAll,
    /// Deny everything but essential
    RejectNonEssential,
    /// Persist the checkbox states as submitted
    SavePreferences { analytics: bool, marketing: bool },
}

/// Rendering seam implemented by the host page
///
/// `render` shows the dialog seeded with the current record so the
/// analytics/marketing checkboxes reflect any prior choice; the essential
/// indicator is always checked and disabled. Implementations surface user
/// clicks back to the controller as [`BannerAction`]s.
pub trait BannerAdapter {
    /// Show the banner, seeded with `record`
    fn render(&mut self, record: &ConsentRecord);

    /// Hide the banner
    fn hide(&mut self);
}
