//! Shared type definitions for the Petling virtual pet.
//!
//! This crate is the single source of truth for the data that crosses
//! crate boundaries: the enums the engine derives, the snapshot written by
//! the store, the catalog entries the host loads, and the read-only view a
//! renderer consumes. Renderer-facing types flow to `TypeScript` via
//! `ts-rs`.
//!
//! # Modules
//!
//! - [`enums`] -- Mood, stage, item kind, and rejection reasons
//! - [`structs`] -- Snapshot, inventory entry, shop item, and renderer view

mod compat;
pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ItemKind, Mood, RejectionReason, Stage};
pub use structs::{InventoryEntry, PetSnapshot, PetView, SNAPSHOT_VERSION, ShopItem};
