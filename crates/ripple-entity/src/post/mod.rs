//! Post entity, category, and the hydrated feed projection.

pub mod category;
pub mod model;

pub use category::PostCategory;
pub use model::{FeedPost, Post};
