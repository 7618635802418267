//! Feed assembly and engagement hydration.

pub mod hydrate;
pub mod service;

pub use hydrate::Hydrator;
pub use service::FeedService;
