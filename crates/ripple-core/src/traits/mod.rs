//! Trait seams defined by the core crate.
//!
//! The persistent store traits live in `ripple-database` next to their
//! repository implementations because they reference the entity types;
//! the cache seam has no entity dependency and lives here.

pub mod cache;
