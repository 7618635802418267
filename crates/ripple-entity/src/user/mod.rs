//! User entity and role.

pub mod model;
pub mod role;

pub use model::{User, UserProfile};
pub use role::UserRole;
