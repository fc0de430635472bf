//! Configuration loading and typed config structures for Petling.
//!
//! The canonical configuration lives in `petling-config.yaml` at the
//! project root. Every field has a default matching the reference game
//! balance, so an empty file (or no file at all) yields a playable setup.
//!
//! [`CareConfig`] bundles every tunable of the pet model -- decay rates,
//! thresholds, rewards, caps -- so that callers (the host, tests) can
//! override defaults without touching engine code.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use petling_types::{ItemKind, ShopItem};
use serde::Deserialize;

/// Largest accepted distance from UTC, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is outside its accepted range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

/// Top-level Petling configuration.
///
/// Mirrors the structure of `petling-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PetlingConfig {
    /// Pet model tunables.
    #[serde(default)]
    pub care: CareConfig,

    /// Where snapshots are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Host timer periods.
    #[serde(default)]
    pub timers: TimerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Purchasable items.
    #[serde(default = "default_shop")]
    pub shop: Vec<ShopItem>,
}

impl Default for PetlingConfig {
    fn default() -> Self {
        Self {
            care: CareConfig::default(),
            storage: StorageConfig::default(),
            timers: TimerConfig::default(),
            logging: LoggingConfig::default(),
            shop: default_shop(),
        }
    }
}

impl PetlingConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override storage settings:
    /// - `PETLING_SAVE_PATH` overrides `storage.save_path`
    /// - `PETLING_REDIS_URL` overrides `storage.remote_url`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.storage.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.care.validate()?;
        self.timers.validate()?;
        if self.storage.key.trim().is_empty() {
            return Err(invalid("storage.key must not be empty"));
        }
        Ok(())
    }

    /// Find a catalog item by name, ignoring ASCII case.
    pub fn find_item(&self, name: &str) -> Option<&ShopItem> {
        let wanted = name.trim();
        self.shop
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(wanted))
    }
}

// ---------------------------------------------------------------------------
// Care
// ---------------------------------------------------------------------------

/// Tunables for the pet model.
///
/// Rates are per hour of real elapsed time. Stats live on a 0--100 scale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CareConfig {
    /// Hunger gained per hour while awake (default: 5).
    pub awake_hunger_per_hour: f64,
    /// Happiness lost per hour while awake (default: 3).
    pub awake_happiness_loss_per_hour: f64,
    /// Cleanliness lost per hour while awake (default: 2).
    pub awake_cleanliness_loss_per_hour: f64,
    /// Energy lost per hour while awake (default: 4).
    pub awake_energy_loss_per_hour: f64,
    /// Energy regained per hour while asleep (default: 10).
    pub asleep_energy_gain_per_hour: f64,
    /// Hunger gained per hour while asleep (default: 2).
    pub asleep_hunger_per_hour: f64,

    /// Age in days at which an egg hatches (default: 3).
    pub baby_at_days: f64,
    /// Age in days at which a baby becomes an adult (default: 7).
    pub adult_at_days: f64,

    /// Hunger above which the pet is hungry (default: 70).
    pub hungry_above: f64,
    /// Happiness below which the pet is sad (default: 30).
    pub sad_below: f64,
    /// Cleanliness below which the pet is dirty (default: 20).
    pub dirty_below: f64,

    /// Hunger of a new pet (default: 50).
    pub starting_hunger: f64,
    /// Happiness of a new pet (default: 70).
    pub starting_happiness: f64,
    /// Energy of a new pet (default: 80).
    pub starting_energy: f64,
    /// Cleanliness of a new pet (default: 90).
    pub starting_cleanliness: f64,
    /// Weight of a new pet (default: 5).
    pub starting_weight: f64,
    /// Coins of a new pet, also used for saves without a balance (default: 100).
    pub starting_money: u64,

    /// Hunger removed by a plain feed (default: 30).
    pub feed_amount: f64,
    /// Feed amount per unit of weight gained (default: 10).
    pub weight_gain_divisor: f64,
    /// Upper bound on weight (default: 20).
    pub max_weight: f64,

    /// Happiness gained by playing (default: 20).
    pub play_happiness_gain: f64,
    /// Energy spent by playing (default: 15).
    pub play_energy_cost: f64,
    /// Hunger gained by playing (default: 10).
    pub play_hunger_cost: f64,

    /// Level every stat is reset to on revival (default: 50).
    pub revive_stat_level: f64,

    /// Taps rewarded per calendar day (default: 5).
    pub daily_tap_cap: u32,
    /// Coins per rewarded tap (default: 2).
    pub tap_reward: u64,
    /// Coins per full hour of passive income (default: 5).
    pub income_per_hour: u64,

    /// Hunger removed by food without its own magnitude (default: 20).
    pub food_hunger_relief: f64,
    /// Happiness added by a toy without its own magnitude (default: 20).
    pub toy_happiness_gain: f64,

    /// Energy points assumed to recover per minute of sleep when
    /// estimating the time to full energy (default: 2).
    pub energy_recovery_per_minute: f64,

    /// Offset from UTC, in minutes, that decides where a calendar day
    /// starts for the tap counter (default: 0).
    pub utc_offset_minutes: i32,

    /// Name used when none, or a too-short one, is given (default: "Tammy").
    pub default_name: String,
    /// Minimum number of characters in a pet name (default: 2).
    pub min_name_len: usize,
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            awake_hunger_per_hour: 5.0,
            awake_happiness_loss_per_hour: 3.0,
            awake_cleanliness_loss_per_hour: 2.0,
            awake_energy_loss_per_hour: 4.0,
            asleep_energy_gain_per_hour: 10.0,
            asleep_hunger_per_hour: 2.0,
            baby_at_days: 3.0,
            adult_at_days: 7.0,
            hungry_above: 70.0,
            sad_below: 30.0,
            dirty_below: 20.0,
            starting_hunger: 50.0,
            starting_happiness: 70.0,
            starting_energy: 80.0,
            starting_cleanliness: 90.0,
            starting_weight: 5.0,
            starting_money: 100,
            feed_amount: 30.0,
            weight_gain_divisor: 10.0,
            max_weight: 20.0,
            play_happiness_gain: 20.0,
            play_energy_cost: 15.0,
            play_hunger_cost: 10.0,
            revive_stat_level: 50.0,
            daily_tap_cap: 5,
            tap_reward: 2,
            income_per_hour: 5,
            food_hunger_relief: 20.0,
            toy_happiness_gain: 20.0,
            energy_recovery_per_minute: 2.0,
            utc_offset_minutes: 0,
            default_name: "Tammy".to_owned(),
            min_name_len: 2,
        }
    }
}

impl CareConfig {
    /// The fixed offset used to split time into calendar days.
    ///
    /// Falls back to UTC when the configured offset is out of range;
    /// [`CareConfig::validate`] rejects such values at load time.
    pub fn day_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    /// The calendar day `now` falls on.
    pub fn calendar_day(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.day_offset()).date_naive()
    }

    /// Check the care tunables for unusable values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("awake_hunger_per_hour", self.awake_hunger_per_hour),
            ("awake_happiness_loss_per_hour", self.awake_happiness_loss_per_hour),
            ("awake_cleanliness_loss_per_hour", self.awake_cleanliness_loss_per_hour),
            ("awake_energy_loss_per_hour", self.awake_energy_loss_per_hour),
            ("asleep_energy_gain_per_hour", self.asleep_energy_gain_per_hour),
            ("asleep_hunger_per_hour", self.asleep_hunger_per_hour),
            ("baby_at_days", self.baby_at_days),
            ("adult_at_days", self.adult_at_days),
            ("feed_amount", self.feed_amount),
            ("play_happiness_gain", self.play_happiness_gain),
            ("play_energy_cost", self.play_energy_cost),
            ("play_hunger_cost", self.play_hunger_cost),
            ("food_hunger_relief", self.food_hunger_relief),
            ("toy_happiness_gain", self.toy_happiness_gain),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(&format!(
                    "care.{field} must be a finite, non-negative number"
                )));
            }
        }

        let stats = [
            ("hungry_above", self.hungry_above),
            ("sad_below", self.sad_below),
            ("dirty_below", self.dirty_below),
            ("starting_hunger", self.starting_hunger),
            ("starting_happiness", self.starting_happiness),
            ("starting_energy", self.starting_energy),
            ("starting_cleanliness", self.starting_cleanliness),
            ("revive_stat_level", self.revive_stat_level),
        ];
        for (field, value) in stats {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(&format!("care.{field} must lie in 0..=100")));
            }
        }

        if self.adult_at_days < self.baby_at_days {
            return Err(invalid("care.adult_at_days must not precede care.baby_at_days"));
        }
        if !(self.weight_gain_divisor.is_finite() && self.weight_gain_divisor > 0.0) {
            return Err(invalid("care.weight_gain_divisor must be positive"));
        }
        if !(self.energy_recovery_per_minute.is_finite() && self.energy_recovery_per_minute > 0.0)
        {
            return Err(invalid("care.energy_recovery_per_minute must be positive"));
        }
        if !(self.max_weight.is_finite() && self.max_weight >= self.starting_weight) {
            return Err(invalid("care.max_weight must be at least care.starting_weight"));
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(invalid("care.utc_offset_minutes must lie within one day of UTC"));
        }
        if self.default_name.trim().chars().count() < self.min_name_len.max(1) {
            return Err(invalid("care.default_name is shorter than care.min_name_len"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Where snapshots are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Local save file (the fallback tier).
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,

    /// Key under which the snapshot is stored remotely.
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// Redis-compatible URL of the remote tier. No remote tier when unset.
    #[serde(default)]
    pub remote_url: Option<String>,
}

impl StorageConfig {
    /// Override storage settings with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PETLING_SAVE_PATH") {
            self.save_path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("PETLING_REDIS_URL") {
            self.remote_url = Some(val).filter(|url| !url.trim().is_empty());
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            key: default_storage_key(),
            remote_url: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

/// Periods of the host's background triggers, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimerConfig {
    /// Autosave period.
    #[serde(default = "default_autosave_secs")]
    pub autosave_secs: u64,

    /// Passive income check period.
    #[serde(default = "default_passive_income_secs")]
    pub passive_income_secs: u64,

    /// Catch-up recomputation period.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl TimerConfig {
    /// Reject zero periods, which would spin the host loop.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the zero period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("autosave_secs", self.autosave_secs),
            ("passive_income_secs", self.passive_income_secs),
            ("refresh_secs", self.refresh_secs),
        ] {
            if value == 0 {
                return Err(invalid(&format!("timers.{field} must be at least 1")));
            }
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            autosave_secs: default_autosave_secs(),
            passive_income_secs: default_passive_income_secs(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

fn default_save_path() -> PathBuf {
    PathBuf::from("petling-save.json")
}

fn default_storage_key() -> String {
    "petling".to_owned()
}

const fn default_autosave_secs() -> u64 {
    30
}

const fn default_passive_income_secs() -> u64 {
    3600
}

const fn default_refresh_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_shop() -> Vec<ShopItem> {
    vec![
        ShopItem {
            name: "Apple".to_owned(),
            cost: 10,
            kind: ItemKind::Food,
            hunger: Some(20.0),
            happiness: None,
        },
        ShopItem {
            name: "Cake".to_owned(),
            cost: 25,
            kind: ItemKind::Food,
            hunger: Some(40.0),
            happiness: None,
        },
        ShopItem {
            name: "Ball".to_owned(),
            cost: 15,
            kind: ItemKind::Toy,
            hunger: None,
            happiness: Some(20.0),
        },
        ShopItem {
            name: "Golden Egg".to_owned(),
            cost: 150,
            kind: ItemKind::Collectible,
            hunger: None,
            happiness: None,
        },
    ]
}
