//! Snapshot persistence for the Petling virtual pet.
//!
//! The pet is persisted as a single JSON document behind one port,
//! [`PetStore`], with interchangeable tiers:
//!
//! ```text
//! Host
//!   |
//!   +-- save_pet / load_pet --> TieredStore
//!         |-- RedisStore   (durable remote tier, optional)
//!         +-- FileStore    (local fallback tier)
//! ```
//!
//! # Modules
//!
//! - [`port`] -- The [`PetStore`] trait
//! - [`file`] -- Local file tier with atomic replace
//! - [`redis`] -- Redis-compatible remote tier
//! - [`memory`] -- In-memory tier for tests
//! - [`tiered`] -- Remote-first tier composition
//! - [`persist`] -- Encode/decode helpers over any store
//! - [`error`] -- Shared error types

pub mod error;
pub mod file;
pub mod memory;
pub mod persist;
pub mod port;
pub mod redis;
pub mod tiered;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use persist::{load_pet, save_pet};
pub use port::PetStore;
pub use redis::RedisStore;
pub use tiered::TieredStore;
