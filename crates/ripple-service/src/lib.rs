//! # ripple-service
//!
//! Business logic services for Ripple: feed assembly with the 70/30
//! followed/popular blend, batched engagement hydration, the
//! suggested-users cascade, the engagement write paths, and
//! deduplicated notification delivery.

pub mod feed;
pub mod notification;
pub mod recommendation;
pub mod social;

pub use feed::{FeedService, Hydrator};
pub use notification::NotificationService;
pub use recommendation::RecommendationService;
pub use social::SocialService;
