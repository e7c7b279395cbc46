//! Data model for consent decisions

mod record;

pub use record::{ConsentRecord, CookieCategory};
