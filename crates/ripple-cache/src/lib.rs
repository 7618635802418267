//! # ripple-cache
//!
//! In-memory cache provider (moka-backed) and centralized cache key
//! builders. The cache is owned by the composition root and injected
//! into services; it is never a hidden singleton.

pub mod keys;
pub mod provider;

pub use provider::MemoryCacheProvider;
