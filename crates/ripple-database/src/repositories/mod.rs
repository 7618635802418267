//! Repository implementations for all Ripple entities.

pub mod comment;
pub mod engagement;
pub mod follow;
pub mod notification;
pub mod post;
pub mod user;

pub use comment::CommentRepository;
pub use engagement::EngagementRepository;
pub use follow::FollowRepository;
pub use notification::NotificationRepository;
pub use post::PostRepository;
pub use user::UserRepository;
