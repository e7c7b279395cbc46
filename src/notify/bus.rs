//! Synchronous in-process event bus

use super::{ConsentBroadcaster, ConsentListener};
use crate::models::ConsentRecord;

/// Dispatches consent notifications to registered listeners
///
/// Dispatch is synchronous and in registration order. All consent activity
/// runs on a single thread, so no locking is involved.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(String, ConsentListener)>,
}

impl EventBus {
    /// Create a bus with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event`
    pub fn subscribe(
        &mut self,
        event: impl Into<String>,
        listener: impl FnMut(&ConsentRecord) + 'static,
    ) {
        self.listeners.push((event.into(), Box::new(listener)));
    }

    /// Number of listeners registered for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .iter()
            .filter(|(name, _)| name.as_str() == event)
            .count()
    }
}

impl ConsentBroadcaster for EventBus {
    fn broadcast(&mut self, event: &str, record: &ConsentRecord) {
        for (name, listener) in self.listeners.iter_mut() {
            if name.as_str() == event {
                listener(record);
            }
        }
    }
}
