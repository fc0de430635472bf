//! Core structs shared between the engine, the store, and the host.
//!
//! [`PetSnapshot`] is the persisted wire format, [`PetView`] is what a
//! renderer reads, [`ShopItem`] is one catalog entry, and
//! [`InventoryEntry`] is one acquired collectible.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::compat;
use crate::enums::{ItemKind, Mood, Stage};

/// Snapshot schema version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// One acquired item in the pet's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Display name of the item.
    pub name: String,
    /// Category of the item. Only collectibles are stored today.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// When the item was acquired.
    #[serde(rename = "timestamp", alias = "date", with = "compat::epoch_millis")]
    pub acquired_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A purchasable item as supplied by the catalog.
///
/// `hunger` and `happiness` are the magnitudes for food and toys. When
/// absent the engine falls back to its configured defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    /// Display name, also used for the inventory entry of collectibles.
    #[serde(default)]
    pub name: String,
    /// Price in coins.
    pub cost: u64,
    /// Category deciding the purchase effect.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Hunger removed by a food item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hunger: Option<f64>,
    /// Happiness added by a toy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happiness: Option<f64>,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Flat, versioned snapshot of the full pet state.
///
/// Field names are camelCase and instants are epoch milliseconds. Fields
/// marked optional may be missing from older saves; the engine fills them
/// in when it restores the pet. Aliases accept the field names of the
/// first save format (`birthDate`, `lastUpdate`, `state`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSnapshot {
    /// Schema version. Absent in legacy saves, which read as `0`.
    #[serde(default)]
    pub version: u32,
    /// Display name.
    pub name: String,
    /// When the pet was created.
    #[serde(alias = "birthDate", with = "compat::epoch_millis")]
    pub birth_timestamp: DateTime<Utc>,
    /// When the pet was last recomputed.
    #[serde(alias = "lastUpdate", with = "compat::epoch_millis")]
    pub last_update_timestamp: DateTime<Utc>,
    /// When passive income was last paid out (or sleep last began).
    #[serde(
        default,
        alias = "lastEnergyRecovery",
        with = "compat::epoch_millis_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_energy_recovery_timestamp: Option<DateTime<Utc>>,
    /// Hunger stat, 0--100.
    pub hunger: f64,
    /// Happiness stat, 0--100.
    pub happiness: f64,
    /// Energy stat, 0--100.
    pub energy: f64,
    /// Cleanliness stat, 0--100.
    pub cleanliness: f64,
    /// Mood at the last recomputation.
    #[serde(alias = "state")]
    pub mood: Mood,
    /// Whether the pet is asleep.
    pub is_sleeping: bool,
    /// Age in days at the last recomputation.
    #[serde(default, alias = "age")]
    pub age_days: f64,
    /// Weight.
    pub weight: f64,
    /// Life stage.
    pub stage: Stage,
    /// Whether the pet is alive.
    pub is_alive: bool,
    /// Coin balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<u64>,
    /// Acquired items, oldest first.
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
    /// Taps used on `last_tap_day`.
    #[serde(default)]
    pub taps_today: u32,
    /// Calendar day the tap counter belongs to.
    #[serde(
        default,
        alias = "lastTapDate",
        with = "compat::calendar_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_tap_day: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Renderer view
// ---------------------------------------------------------------------------

/// Read-only view of the pet handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PetView {
    /// Display name.
    pub name: String,
    /// Hunger stat, 0--100.
    pub hunger: f64,
    /// Happiness stat, 0--100.
    pub happiness: f64,
    /// Energy stat, 0--100.
    pub energy: f64,
    /// Cleanliness stat, 0--100.
    pub cleanliness: f64,
    /// Current mood.
    pub mood: Mood,
    /// Current life stage.
    pub stage: Stage,
    /// Age in days.
    pub age_days: f64,
    /// Weight.
    pub weight: f64,
    /// Whether the pet is alive.
    pub is_alive: bool,
    /// Whether the pet is asleep.
    pub is_sleeping: bool,
    /// Coin balance.
    pub money: u64,
    /// Number of inventory entries.
    pub inventory_count: u32,
    /// Taps still available today.
    pub taps_left: u32,
    /// Minutes until energy is full, 0 when awake.
    pub recovery_minutes: u32,
}
