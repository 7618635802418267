//! Suggested-users recommendation cascade.

pub mod service;

pub use service::RecommendationService;
