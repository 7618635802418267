//! Shared types used across the application.

pub mod pagination;
