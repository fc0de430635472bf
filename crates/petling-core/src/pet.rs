//! The pet entity.
//!
//! [`Pet`] owns every piece of simulation state. Its fields are only
//! writable inside this crate so that each mutation passes through the
//! engine functions that clamp stats and recompute mood and mortality.
//! Hosts read it through accessors or a [`PetView`].

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use petling_types::{InventoryEntry, Mood, PetView, Stage};
use tracing::debug;

use crate::config::CareConfig;
use crate::vitals;

/// A virtual pet.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    pub(crate) name: String,
    pub(crate) birth: DateTime<Utc>,
    pub(crate) last_update: DateTime<Utc>,
    pub(crate) last_energy_recovery: DateTime<Utc>,
    pub(crate) hunger: f64,
    pub(crate) happiness: f64,
    pub(crate) energy: f64,
    pub(crate) cleanliness: f64,
    pub(crate) mood: Mood,
    pub(crate) is_sleeping: bool,
    pub(crate) age_days: f64,
    pub(crate) weight: f64,
    pub(crate) stage: Stage,
    pub(crate) is_alive: bool,
    pub(crate) money: u64,
    pub(crate) inventory: Vec<InventoryEntry>,
    pub(crate) taps_today: u32,
    pub(crate) last_tap_day: NaiveDate,
}

impl Pet {
    /// Create a new pet born at `now`.
    ///
    /// The name is trimmed; a missing name or one shorter than
    /// `config.min_name_len` characters is replaced by `config.default_name`.
    pub fn new(name: Option<&str>, now: DateTime<Utc>, config: &CareConfig) -> Self {
        let now = instant(now);
        let name = resolve_name(name, config);
        debug!(name = %name, "Pet created");

        Self {
            name,
            birth: now,
            last_update: now,
            last_energy_recovery: now,
            hunger: vitals::clamp_stat(config.starting_hunger),
            happiness: vitals::clamp_stat(config.starting_happiness),
            energy: vitals::clamp_stat(config.starting_energy),
            cleanliness: vitals::clamp_stat(config.starting_cleanliness),
            mood: Mood::Happy,
            is_sleeping: false,
            age_days: 0.0,
            weight: config.starting_weight,
            stage: Stage::Egg,
            is_alive: true,
            money: config.starting_money,
            inventory: Vec::new(),
            taps_today: 0,
            last_tap_day: config.calendar_day(now),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When the pet was created.
    pub const fn birth(&self) -> DateTime<Utc> {
        self.birth
    }

    /// When the pet was last recomputed.
    pub const fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    /// When passive income was last paid out, or sleep last began.
    pub const fn last_energy_recovery(&self) -> DateTime<Utc> {
        self.last_energy_recovery
    }

    /// Hunger, 0--100. Higher is hungrier.
    pub const fn hunger(&self) -> f64 {
        self.hunger
    }

    /// Happiness, 0--100.
    pub const fn happiness(&self) -> f64 {
        self.happiness
    }

    /// Energy, 0--100.
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Cleanliness, 0--100.
    pub const fn cleanliness(&self) -> f64 {
        self.cleanliness
    }

    /// Mood at the last recomputation.
    pub const fn mood(&self) -> Mood {
        self.mood
    }

    /// Whether the pet is asleep.
    pub const fn is_sleeping(&self) -> bool {
        self.is_sleeping
    }

    /// Age in days at the last recomputation.
    pub const fn age_days(&self) -> f64 {
        self.age_days
    }

    /// Weight.
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Life stage.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the pet is alive.
    pub const fn is_alive(&self) -> bool {
        self.is_alive
    }

    /// Coin balance.
    pub const fn money(&self) -> u64 {
        self.money
    }

    /// Acquired items, oldest first.
    pub fn inventory(&self) -> &[InventoryEntry] {
        &self.inventory
    }

    /// Taps used on [`Pet::last_tap_day`].
    pub const fn taps_today(&self) -> u32 {
        self.taps_today
    }

    /// Calendar day the tap counter belongs to.
    pub const fn last_tap_day(&self) -> NaiveDate {
        self.last_tap_day
    }

    /// Taps still rewarded today.
    pub const fn taps_left(&self, config: &CareConfig) -> u32 {
        config.daily_tap_cap.saturating_sub(self.taps_today)
    }

    /// Build the read-only view a renderer consumes.
    pub fn view(&self, config: &CareConfig) -> PetView {
        PetView {
            name: self.name.clone(),
            hunger: self.hunger,
            happiness: self.happiness,
            energy: self.energy,
            cleanliness: self.cleanliness,
            mood: self.mood,
            stage: self.stage,
            age_days: self.age_days,
            weight: self.weight,
            is_alive: self.is_alive,
            is_sleeping: self.is_sleeping,
            money: self.money,
            inventory_count: u32::try_from(self.inventory.len()).unwrap_or(u32::MAX),
            taps_left: self.taps_left(config),
            recovery_minutes: vitals::recovery_minutes(self, config),
        }
    }
}

/// Pick the display name for a new pet.
pub fn resolve_name(requested: Option<&str>, config: &CareConfig) -> String {
    match requested.map(str::trim) {
        Some(name) if name.chars().count() >= config.min_name_len.max(1) => name.to_owned(),
        _ => config.default_name.trim().to_owned(),
    }
}

/// Normalize an instant to whole milliseconds, the snapshot resolution.
pub(crate) fn instant(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(3)
}
