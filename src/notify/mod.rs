//! Change notification for consent decisions
//!
//! Analytics and marketing loaders register listeners and receive each new
//! record as it is decided, instead of polling storage. Listeners must be
//! idempotent: the same values can be delivered more than once.

mod bus;

pub use bus::EventBus;

use crate::models::ConsentRecord;

/// Event name for consent-change notifications, stable across releases
pub const CONSENT_CHANGED: &str = "consentChanged";

/// Listener invoked with each newly recorded consent record
pub type ConsentListener = Box<dyn FnMut(&ConsentRecord)>;

/// Notification seam injected into the controller
pub trait ConsentBroadcaster {
    /// Deliver `record` to every listener registered for `event`
    fn broadcast(&mut self, event: &str, record: &ConsentRecord);
}
