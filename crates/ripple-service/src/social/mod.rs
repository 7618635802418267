//! Engagement write paths: follow, like, save, comment.

pub mod service;

pub use service::SocialService;
