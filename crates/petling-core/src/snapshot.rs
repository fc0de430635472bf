//! Conversion between a live [`Pet`] and its persisted [`PetSnapshot`].
//!
//! Encoding always writes the current [`SNAPSHOT_VERSION`]. Decoding
//! accepts that version and every older one, filling in fields the older
//! formats did not carry:
//!
//! | Field                  | Default when absent            |
//! |------------------------|--------------------------------|
//! | `money`                | `config.starting_money`        |
//! | `inventory`            | empty                          |
//! | `tapsToday`            | 0                              |
//! | `lastEnergyRecovery..` | the load instant               |
//! | `lastTapDay`           | calendar day of the load       |
//!
//! Decoding does not advance the pet. Callers decide when to catch up.

use chrono::{DateTime, Utc};
use petling_types::{Mood, PetSnapshot, SNAPSHOT_VERSION};
use tracing::debug;

use crate::config::CareConfig;
use crate::error::SnapshotError;
use crate::pet::{Pet, instant, resolve_name};
use crate::vitals::clamp_stat;

impl Pet {
    /// Capture the full pet state as a snapshot.
    pub fn snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            version: SNAPSHOT_VERSION,
            name: self.name.clone(),
            birth_timestamp: self.birth,
            last_update_timestamp: self.last_update,
            last_energy_recovery_timestamp: Some(self.last_energy_recovery),
            hunger: self.hunger,
            happiness: self.happiness,
            energy: self.energy,
            cleanliness: self.cleanliness,
            mood: self.mood,
            is_sleeping: self.is_sleeping,
            age_days: self.age_days,
            weight: self.weight,
            stage: self.stage,
            is_alive: self.is_alive,
            money: Some(self.money),
            inventory: self.inventory.clone(),
            taps_today: self.taps_today,
            last_tap_day: Some(self.last_tap_day),
        }
    }

    /// Rebuild a pet from a snapshot loaded at `now`.
    ///
    /// Stats are clamped, the name is re-resolved, and a dead pet's mood is
    /// forced to [`Mood::Dead`] so a hand-edited save cannot contradict
    /// itself.
    ///
    /// # Errors
    ///
    /// [`SnapshotError::UnsupportedVersion`] if the snapshot is newer than
    /// this build understands.
    pub fn from_snapshot(
        snapshot: PetSnapshot,
        now: DateTime<Utc>,
        config: &CareConfig,
    ) -> Result<Self, SnapshotError> {
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
            });
        }
        let now = instant(now);

        let pet = Self {
            name: resolve_name(Some(snapshot.name.as_str()), config),
            birth: instant(snapshot.birth_timestamp),
            last_update: instant(snapshot.last_update_timestamp),
            last_energy_recovery: snapshot
                .last_energy_recovery_timestamp
                .map_or(now, instant),
            hunger: clamp_stat(snapshot.hunger),
            happiness: clamp_stat(snapshot.happiness),
            energy: clamp_stat(snapshot.energy),
            cleanliness: clamp_stat(snapshot.cleanliness),
            mood: if snapshot.is_alive {
                snapshot.mood
            } else {
                Mood::Dead
            },
            is_sleeping: snapshot.is_sleeping,
            age_days: if snapshot.age_days.is_finite() {
                snapshot.age_days.max(0.0)
            } else {
                0.0
            },
            weight: clamp_weight(snapshot.weight, config),
            stage: snapshot.stage,
            is_alive: snapshot.is_alive,
            money: snapshot.money.unwrap_or(config.starting_money),
            inventory: snapshot.inventory,
            taps_today: snapshot.taps_today.min(config.daily_tap_cap),
            last_tap_day: snapshot
                .last_tap_day
                .unwrap_or_else(|| config.calendar_day(now)),
        };
        debug!(
            name = %pet.name,
            version = snapshot.version,
            alive = pet.is_alive,
            "Pet restored from snapshot"
        );
        Ok(pet)
    }
}

/// Weight within `0..=config.max_weight`; non-finite values become the
/// starting weight.
fn clamp_weight(weight: f64, config: &CareConfig) -> f64 {
    if weight.is_finite() {
        weight.clamp(0.0, config.max_weight)
    } else {
        config.starting_weight
    }
}

/// Serialize the pet to snapshot JSON.
///
/// # Errors
///
/// [`SnapshotError::Json`] if serialization fails.
pub fn encode(pet: &Pet) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&pet.snapshot())?)
}

/// Parse snapshot JSON loaded at `now` back into a pet.
///
/// # Errors
///
/// [`SnapshotError::Json`] for malformed input, or
/// [`SnapshotError::UnsupportedVersion`] for a snapshot from a newer build.
pub fn decode(json: &str, now: DateTime<Utc>, config: &CareConfig) -> Result<Pet, SnapshotError> {
    let snapshot: PetSnapshot = serde_json::from_str(json)?;
    Pet::from_snapshot(snapshot, now, config)
}
