//! Time-advance: the catch-up recomputation applied to the pet.
//!
//! Every care action runs [`advance`] before and after its own effect, and
//! hosts run it on a timer, so the pet's state is always a function of the
//! wall-clock time elapsed since the last update:
//!
//! - Tap counter resets when a new calendar day has started
//! - Awake: hunger rises, happiness, cleanliness and energy fall
//! - Asleep: energy recovers, hunger rises slowly, the rest is frozen
//! - Age is recomputed from the birth instant
//! - Stage latches forward at the configured ages
//! - Mortality is checked on the clamped stats, then mood is derived
//!
//! The function is idempotent for a repeated `now`: zero elapsed time
//! changes nothing.

use chrono::{DateTime, TimeDelta, Utc};
use petling_types::{Mood, Stage};
use tracing::{debug, info};

use crate::config::CareConfig;
use crate::death::{DeathCause, check_death};
use crate::mood::derive_mood;
use crate::pet::{Pet, instant};

/// Milliseconds in one hour.
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Milliseconds in one day.
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Upper bound of every stat.
pub const STAT_MAX: f64 = 100.0;

/// What a single [`advance`] pass changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceReport {
    /// Hours of decay applied (0 when `now` is not after the last update).
    pub elapsed_hours: f64,
    /// Set when the pet died during this pass.
    pub death: Option<DeathCause>,
    /// Set when the stage moved forward during this pass.
    pub new_stage: Option<Stage>,
    /// Whether the daily tap counter was reset.
    pub taps_reset: bool,
}

impl Pet {
    /// Bring the pet up to date with `now`. See [`advance`].
    pub fn advance(&mut self, now: DateTime<Utc>, config: &CareConfig) -> AdvanceReport {
        advance(self, now, config)
    }
}

/// Bring the pet up to date with `now`.
///
/// # Order of operations
///
/// 1. Compute elapsed hours (clamped at zero against clock skew)
/// 2. Reset the tap counter on a new calendar day
/// 3. Apply awake or asleep decay (living pets only)
/// 4. Recompute age
/// 5. Advance the stage latch (living pets only)
/// 6. Check mortality, then derive mood
/// 7. Move `last_update` forward to `now`
pub fn advance(pet: &mut Pet, now: DateTime<Utc>, config: &CareConfig) -> AdvanceReport {
    let now = instant(now);
    let elapsed_hours = hours_between(pet.last_update, now);

    // 2. Daily tap reset on any change of calendar day.
    let today = config.calendar_day(now);
    let taps_reset = today != pet.last_tap_day;
    if taps_reset {
        pet.taps_today = 0;
        pet.last_tap_day = today;
    }

    let mut report = AdvanceReport {
        elapsed_hours,
        death: None,
        new_stage: None,
        taps_reset,
    };

    // 3. Decay
    if pet.is_alive {
        apply_decay(pet, elapsed_hours, config);
    }

    // 4. Age
    pet.age_days = days_between(pet.birth, now);

    if pet.is_alive {
        // 5. Growth
        report.new_stage = grow(pet, config);
        if let Some(stage) = report.new_stage {
            info!(name = %pet.name, %stage, age_days = pet.age_days, "Pet grew");
        }

        // 6. Mortality
        if let Some(cause) = check_death(pet) {
            pet.is_alive = false;
            report.death = Some(cause);
            info!(name = %pet.name, %cause, age_days = pet.age_days, "Pet died");
        }
    }
    pet.mood = if pet.is_alive {
        derive_mood(pet, config)
    } else {
        Mood::Dead
    };

    // 7. Never move the update instant backwards.
    if now > pet.last_update {
        pet.last_update = now;
    }

    debug!(
        name = %pet.name,
        elapsed_hours,
        hunger = pet.hunger,
        happiness = pet.happiness,
        energy = pet.energy,
        cleanliness = pet.cleanliness,
        mood = %pet.mood,
        "Pet advanced"
    );

    report
}

/// Apply `hours` of decay in the pet's current sleep regime.
fn apply_decay(pet: &mut Pet, hours: f64, config: &CareConfig) {
    if hours <= 0.0 {
        return;
    }
    if pet.is_sleeping {
        pet.energy = clamp_stat(config.asleep_energy_gain_per_hour.mul_add(hours, pet.energy));
        pet.hunger = clamp_stat(config.asleep_hunger_per_hour.mul_add(hours, pet.hunger));
    } else {
        pet.hunger = clamp_stat(config.awake_hunger_per_hour.mul_add(hours, pet.hunger));
        pet.happiness =
            clamp_stat(config.awake_happiness_loss_per_hour.mul_add(-hours, pet.happiness));
        pet.cleanliness =
            clamp_stat(config.awake_cleanliness_loss_per_hour.mul_add(-hours, pet.cleanliness));
        pet.energy = clamp_stat(config.awake_energy_loss_per_hour.mul_add(-hours, pet.energy));
    }
}

/// Move the stage forward if the pet is old enough. Each threshold is
/// checked on its own, so a long absence can skip straight to adult.
fn grow(pet: &mut Pet, config: &CareConfig) -> Option<Stage> {
    let before = pet.stage;
    if pet.stage == Stage::Egg && pet.age_days >= config.baby_at_days {
        pet.stage = Stage::Baby;
    }
    if pet.stage == Stage::Baby && pet.age_days >= config.adult_at_days {
        pet.stage = Stage::Adult;
    }
    (pet.stage != before).then_some(pet.stage)
}

/// Minutes of sleep until energy is full, rounded up. Zero while awake.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn recovery_minutes(pet: &Pet, config: &CareConfig) -> u32 {
    if !pet.is_sleeping || config.energy_recovery_per_minute <= 0.0 {
        return 0;
    }
    let minutes = ((STAT_MAX - pet.energy) / config.energy_recovery_per_minute).ceil();
    minutes.clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Clamp a stat into `0..=100`. NaN collapses to 0.
pub(crate) fn clamp_stat(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, STAT_MAX)
    }
}

/// Hours from `earlier` to `later`, never negative.
pub(crate) fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    non_negative_millis(later.signed_duration_since(earlier)) / MILLIS_PER_HOUR
}

/// Days from `earlier` to `later`, never negative.
fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    non_negative_millis(later.signed_duration_since(earlier)) / MILLIS_PER_DAY
}

#[allow(clippy::cast_precision_loss)]
fn non_negative_millis(delta: TimeDelta) -> f64 {
    delta.num_milliseconds().max(0) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(1_760_000_000_000).unwrap_or_default()
    }

    fn hours(h: i64) -> TimeDelta {
        TimeDelta::hours(h)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn test_pet() -> Pet {
        Pet::new(Some("Tammy"), t0(), &CareConfig::default())
    }

    #[test]
    fn awake_decay_per_hour() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        let report = advance(&mut pet, t0() + hours(2), &config);

        assert!(approx(report.elapsed_hours, 2.0));
        assert!(approx(pet.hunger, 60.0));
        assert!(approx(pet.happiness, 64.0));
        assert!(approx(pet.cleanliness, 86.0));
        assert!(approx(pet.energy, 72.0));
        assert_eq!(pet.mood, Mood::Happy);
        assert_eq!(pet.last_update, t0() + hours(2));
    }

    #[test]
    fn asleep_decay_freezes_happiness_and_cleanliness() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        pet.is_sleeping = true;
        pet.energy = 40.0;
        advance(&mut pet, t0() + hours(3), &config);

        assert!(approx(pet.energy, 70.0));
        assert!(approx(pet.hunger, 56.0));
        assert!(approx(pet.happiness, 70.0));
        assert!(approx(pet.cleanliness, 90.0));
        assert_eq!(pet.mood, Mood::Sleepy);
    }

    #[test]
    fn energy_capped_while_asleep() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        pet.is_sleeping = true;
        advance(&mut pet, t0() + hours(5), &config);
        assert!(approx(pet.energy, 100.0));
    }

    #[test]
    fn repeated_now_changes_nothing() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        advance(&mut pet, t0() + hours(4), &config);
        let before = pet.clone();
        let report = advance(&mut pet, t0() + hours(4), &config);

        assert_eq!(pet, before);
        assert!(approx(report.elapsed_hours, 0.0));
        assert!(!report.taps_reset);
        assert_eq!(report.death, None);
    }

    #[test]
    fn earlier_now_is_zero_elapsed() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        advance(&mut pet, t0() + hours(2), &config);
        let before = pet.clone();
        let report = advance(&mut pet, t0() + hours(1), &config);

        assert!(approx(report.elapsed_hours, 0.0));
        assert!(approx(pet.hunger, before.hunger));
        assert_eq!(pet.last_update, before.last_update);
    }

    #[test]
    fn ten_hours_awake_starves() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        let report = advance(&mut pet, t0() + hours(10), &config);

        assert!(approx(pet.hunger, 100.0));
        assert!(!pet.is_alive);
        assert_eq!(pet.mood, Mood::Dead);
        assert_eq!(report.death, Some(DeathCause::Starvation));
    }

    #[test]
    fn dead_pet_does_not_decay() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        advance(&mut pet, t0() + hours(10), &config);
        let frozen = (pet.hunger, pet.happiness, pet.energy, pet.cleanliness);

        let report = advance(&mut pet, t0() + hours(30), &config);
        assert_eq!(
            (pet.hunger, pet.happiness, pet.energy, pet.cleanliness),
            frozen
        );
        assert_eq!(report.death, None);
        assert_eq!(pet.mood, Mood::Dead);
        assert!(approx(pet.age_days, 30.0 / 24.0));
    }

    #[test]
    fn stage_latches_forward() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        pet.birth = t0() - TimeDelta::days(3);
        let report = advance(&mut pet, t0(), &config);
        assert_eq!(report.new_stage, Some(Stage::Baby));
        assert_eq!(pet.stage, Stage::Baby);

        pet.birth = t0() - TimeDelta::days(8);
        let report = advance(&mut pet, t0(), &config);
        assert_eq!(report.new_stage, Some(Stage::Adult));

        // A birth instant in the future cannot make the pet younger.
        pet.birth = t0() + TimeDelta::days(1);
        let report = advance(&mut pet, t0(), &config);
        assert_eq!(report.new_stage, None);
        assert_eq!(pet.stage, Stage::Adult);
    }

    #[test]
    fn long_absence_skips_to_adult() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        pet.birth = t0() - TimeDelta::days(10);
        let report = advance(&mut pet, t0(), &config);
        assert_eq!(report.new_stage, Some(Stage::Adult));
    }

    #[test]
    fn taps_reset_on_new_day_only() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        pet.taps_today = 5;

        let report = advance(&mut pet, t0() + hours(1), &config);
        let same_day = config.calendar_day(t0() + hours(1)) == config.calendar_day(t0());
        assert_eq!(report.taps_reset, !same_day);

        let mut pet = test_pet();
        pet.taps_today = 5;
        pet.is_sleeping = true;
        let report = advance(&mut pet, t0() + TimeDelta::days(1), &config);
        assert!(report.taps_reset);
        assert_eq!(pet.taps_today, 0);
        assert_eq!(pet.last_tap_day, config.calendar_day(t0() + TimeDelta::days(1)));
    }

    #[test]
    fn recovery_estimate_rounds_up() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        pet.energy = 60.0;
        assert_eq!(recovery_minutes(&pet, &config), 0);

        pet.is_sleeping = true;
        assert_eq!(recovery_minutes(&pet, &config), 20);
        pet.energy = 60.5;
        assert_eq!(recovery_minutes(&pet, &config), 20);
        pet.energy = 59.5;
        assert_eq!(recovery_minutes(&pet, &config), 21);
        pet.energy = 100.0;
        assert_eq!(recovery_minutes(&pet, &config), 0);
    }

    #[test]
    fn clamp_handles_nan() {
        assert!(approx(clamp_stat(f64::NAN), 0.0));
        assert!(approx(clamp_stat(-3.0), 0.0));
        assert!(approx(clamp_stat(140.0), 100.0));
    }
}
