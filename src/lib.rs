// Consentd - Cookie Consent State Controller
// Determines, persists, and broadcasts a visitor's cookie-category decisions

pub mod banner;
pub mod config;
pub mod controller;
pub mod models;
pub mod notify;
pub mod store;

// Re-export commonly used types
pub use banner::{BannerAction, BannerAdapter};
pub use config::{ConsentOptions, GatingPolicy, DEFAULT_STORAGE_KEY};
pub use controller::ConsentController;
pub use models::{ConsentRecord, CookieCategory};
pub use notify::{ConsentBroadcaster, EventBus, CONSENT_CHANGED};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
