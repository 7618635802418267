//! # ripple-database
//!
//! PostgreSQL connection management, the store trait seams services
//! depend on, and the concrete repository implementations.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
