//! Engagement edge models: follows, likes, saves, and comments.

pub mod comment;
pub mod follow;
pub mod like;
pub mod save;

pub use comment::Comment;
pub use follow::{Follow, FollowCounts};
pub use like::Like;
pub use save::Save;
