//! Pet state engine for the Petling virtual pet.
//!
//! This crate owns the single pet entity and everything that changes it:
//! time-driven decay, care actions, the coin economy, mood and mortality,
//! and the snapshot codec. It has no I/O and no clock of its own; every
//! time-dependent operation takes `now` as a parameter.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `petling-config.yaml` into
//!   strongly-typed structs, including every tunable of the pet model.
//! - [`pet`] -- The [`Pet`] entity and its read accessors.
//! - [`vitals`] -- Time-advance: decay, ageing, growth, and mortality.
//! - [`care`] -- Feed, play, sleep, clean, revive.
//! - [`economy`] -- Taps, shop purchases, passive income.
//! - [`mood`] -- Mood priority chain.
//! - [`death`] -- Mortality rule and [`DeathCause`].
//! - [`snapshot`] -- Versioned snapshot encode/decode.
//! - [`error`] -- [`SnapshotError`].
//!
//! [`Pet`]: pet::Pet
//! [`DeathCause`]: death::DeathCause
//! [`SnapshotError`]: error::SnapshotError

pub mod care;
pub mod config;
pub mod death;
pub mod economy;
pub mod error;
pub mod mood;
pub mod pet;
pub mod snapshot;
pub mod vitals;

pub use config::{CareConfig, PetlingConfig};
pub use death::DeathCause;
pub use error::SnapshotError;
pub use pet::Pet;
pub use vitals::AdvanceReport;
