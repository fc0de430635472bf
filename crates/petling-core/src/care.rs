//! Care actions: feed, play, sleep, clean, revive.
//!
//! Every action follows the same shape:
//! 1. Catch the pet up to `now` with [`advance`]
//! 2. Refuse if the pet cannot take the action (dead, asleep, ...)
//! 3. Apply the effect with stats clamped to `0..=100`
//! 4. Advance again at the same `now` so mood and mortality reflect the change
//!
//! A refused action leaves the pet exactly as the first advance left it.

use chrono::{DateTime, Utc};
use petling_types::{Mood, RejectionReason};
use tracing::{debug, info};

use crate::config::CareConfig;
use crate::pet::{Pet, instant};
use crate::vitals::{advance, clamp_stat};

/// Feed the pet.
///
/// Lowers hunger by `amount` (default `config.feed_amount`) and adds
/// `amount / config.weight_gain_divisor` to the weight, capped at
/// `config.max_weight`. Negative or non-finite amounts count as zero.
///
/// # Errors
///
/// [`RejectionReason::PetDead`] if the pet is dead.
pub fn feed(
    pet: &mut Pet,
    now: DateTime<Utc>,
    amount: Option<f64>,
    config: &CareConfig,
) -> Result<(), RejectionReason> {
    require_alive(pet, now, config)?;

    let amount = amount
        .unwrap_or(config.feed_amount)
        .max(0.0);
    let amount = if amount.is_finite() { amount } else { 0.0 };

    pet.hunger = clamp_stat(pet.hunger - amount);
    pet.weight = (pet.weight + amount / config.weight_gain_divisor).min(config.max_weight);
    debug!(name = %pet.name, amount, hunger = pet.hunger, weight = pet.weight, "Fed pet");

    advance(pet, now, config);
    Ok(())
}

/// Play with the pet: happier, more tired, hungrier.
///
/// # Errors
///
/// [`RejectionReason::PetDead`] if the pet is dead, or
/// [`RejectionReason::Sleeping`] while it sleeps.
pub fn play(pet: &mut Pet, now: DateTime<Utc>, config: &CareConfig) -> Result<(), RejectionReason> {
    require_alive(pet, now, config)?;
    if pet.is_sleeping {
        return Err(RejectionReason::Sleeping);
    }

    pet.happiness = clamp_stat(pet.happiness + config.play_happiness_gain);
    pet.energy = clamp_stat(pet.energy - config.play_energy_cost);
    pet.hunger = clamp_stat(pet.hunger + config.play_hunger_cost);
    debug!(
        name = %pet.name,
        happiness = pet.happiness,
        energy = pet.energy,
        hunger = pet.hunger,
        "Played with pet"
    );

    advance(pet, now, config);
    Ok(())
}

/// Put the pet to sleep or wake it up. Returns the new sleep state.
///
/// Falling asleep restarts the recovery clock at `now`.
///
/// # Errors
///
/// [`RejectionReason::PetDead`] if the pet is dead.
pub fn toggle_sleep(
    pet: &mut Pet,
    now: DateTime<Utc>,
    config: &CareConfig,
) -> Result<bool, RejectionReason> {
    require_alive(pet, now, config)?;

    pet.is_sleeping = !pet.is_sleeping;
    if pet.is_sleeping {
        pet.last_energy_recovery = instant(now);
    }
    debug!(name = %pet.name, sleeping = pet.is_sleeping, "Toggled sleep");

    advance(pet, now, config);
    Ok(pet.is_sleeping)
}

/// Clean the pet. Cleanliness is restored to full.
///
/// # Errors
///
/// [`RejectionReason::PetDead`] if the pet is dead.
pub fn clean(pet: &mut Pet, now: DateTime<Utc>, config: &CareConfig) -> Result<(), RejectionReason> {
    require_alive(pet, now, config)?;

    pet.cleanliness = crate::vitals::STAT_MAX;
    debug!(name = %pet.name, "Cleaned pet");

    advance(pet, now, config);
    Ok(())
}

/// Bring a dead pet back to life.
///
/// Every stat is reset to `config.revive_stat_level` and the pet wakes up
/// happy. Stage, weight, age, money and inventory are kept.
///
/// # Errors
///
/// [`RejectionReason::AlreadyAlive`] if the pet is alive.
pub fn revive(pet: &mut Pet, now: DateTime<Utc>, config: &CareConfig) -> Result<(), RejectionReason> {
    advance(pet, now, config);
    if pet.is_alive {
        return Err(RejectionReason::AlreadyAlive);
    }

    let level = clamp_stat(config.revive_stat_level);
    pet.hunger = level;
    pet.happiness = level;
    pet.energy = level;
    pet.cleanliness = level;
    pet.is_sleeping = false;
    pet.is_alive = true;
    pet.mood = Mood::Happy;
    info!(name = %pet.name, stage = %pet.stage, "Pet revived");

    advance(pet, now, config);
    Ok(())
}

/// Advance the pet and refuse if it is dead.
pub(crate) fn require_alive(
    pet: &mut Pet,
    now: DateTime<Utc>,
    config: &CareConfig,
) -> Result<(), RejectionReason> {
    advance(pet, now, config);
    if pet.is_alive {
        Ok(())
    } else {
        Err(RejectionReason::PetDead)
    }
}
