//! # ripple-entity
//!
//! Domain entity models for Ripple: users, posts, engagement edges,
//! and notifications.

pub mod engagement;
pub mod notification;
pub mod post;
pub mod user;
