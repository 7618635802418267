//! Deduplicated notification delivery and recipient-side management.

pub mod service;

pub use service::{NotificationList, NotificationService};
