//! Scenario tests for the `petling-core` engine.
//!
//! Each test drives a pet through the public API only, with an explicit
//! clock, and checks the behavior a player would observe.

// Scenario tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::missing_panics_doc
)]

use chrono::{DateTime, TimeDelta, Utc};
use petling_core::care::{clean, feed, play, revive, toggle_sleep};
use petling_core::economy::{buy_item, collect_passive_income, tap};
use petling_core::snapshot::{decode, encode};
use petling_core::vitals::recovery_minutes;
use petling_core::{CareConfig, DeathCause, Pet, PetlingConfig};
use petling_types::{Mood, RejectionReason, Stage};

/// 2025-10-09T08:53:20Z
fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(1_760_000_000_000).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn assert_stats_in_range(pet: &Pet) {
    for stat in [pet.hunger(), pet.happiness(), pet.energy(), pet.cleanliness()] {
        assert!((0.0..=100.0).contains(&stat), "stat out of range: {stat}");
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn new_pet_tammy() {
    let config = CareConfig::default();
    let pet = Pet::new(Some("Tammy"), t0(), &config);

    assert_eq!(pet.name(), "Tammy");
    assert!(approx(pet.hunger(), 50.0));
    assert!(approx(pet.happiness(), 70.0));
    assert!(approx(pet.energy(), 80.0));
    assert!(approx(pet.cleanliness(), 90.0));
    assert_eq!(pet.stage(), Stage::Egg);
    assert_eq!(pet.money(), 100);
    assert!(pet.is_alive());
    assert_eq!(pet.mood(), Mood::Happy);
}

#[test]
fn ten_hours_neglect_is_fatal() {
    let config = CareConfig::default();
    let mut pet = Pet::new(Some("Tammy"), t0(), &config);

    let report = pet.advance(t0() + TimeDelta::hours(10), &config);

    assert!(approx(pet.hunger(), 100.0));
    assert!(!pet.is_alive());
    assert_eq!(pet.mood(), Mood::Dead);
    assert_eq!(report.death, Some(DeathCause::Starvation));
}

#[test]
fn death_then_revival() {
    let config = CareConfig::default();
    let mut pet = Pet::new(None, t0(), &config);
    let later = t0() + TimeDelta::hours(11);
    pet.advance(later, &config);

    assert_eq!(feed(&mut pet, later, None, &config), Err(RejectionReason::PetDead));
    assert_eq!(revive(&mut pet, later, &config), Ok(()));
    assert!(pet.is_alive());
    assert!(approx(pet.hunger(), 50.0));
    assert_eq!(pet.mood(), Mood::Happy);
    assert_eq!(revive(&mut pet, later, &config), Err(RejectionReason::AlreadyAlive));
}

#[test]
fn a_week_of_care_reaches_adulthood() {
    let config = CareConfig::default();
    let mut pet = Pet::new(Some("Mochi"), t0(), &config);
    let mut last_stage = pet.stage();
    let mut now = t0();

    // Every four hours: feed and clean, play when rested. Twelve hours of
    // sleep each day.
    for step in 0..(8 * 6) {
        now += TimeDelta::hours(4);
        let night = step % 6 >= 3;
        if night != pet.is_sleeping() {
            toggle_sleep(&mut pet, now, &config).unwrap();
        }
        feed(&mut pet, now, Some(25.0), &config).unwrap();
        if !pet.is_sleeping() && pet.energy() > 40.0 {
            play(&mut pet, now, &config).unwrap();
        }
        clean(&mut pet, now, &config).unwrap();

        assert!(pet.is_alive(), "pet died at step {step}");
        assert!(pet.stage() >= last_stage, "stage regressed at step {step}");
        assert_stats_in_range(&pet);
        last_stage = pet.stage();
    }
    assert_eq!(pet.stage(), Stage::Adult);
}

// =============================================================================
// Care
// =============================================================================

#[test]
fn feed_thirty() {
    let config = CareConfig::default();
    let mut pet = Pet::new(None, t0(), &config);
    feed(&mut pet, t0(), Some(30.0), &config).unwrap();
    assert!(approx(pet.hunger(), 20.0));
    assert!(approx(pet.weight(), 8.0));
}

#[test]
fn advance_is_idempotent() {
    let config = CareConfig::default();
    let mut pet = Pet::new(None, t0(), &config);
    let now = t0() + TimeDelta::minutes(95);
    pet.advance(now, &config);
    let once = pet.clone();
    pet.advance(now, &config);
    assert_eq!(pet, once);
}

#[test]
fn recovery_estimate_while_asleep() {
    let config = CareConfig::default();
    let mut pet = Pet::new(None, t0(), &config);
    // Awake for five hours: energy 80 - 20 = 60.
    let now = t0() + TimeDelta::hours(5);
    toggle_sleep(&mut pet, now, &config).unwrap();

    assert!(approx(pet.energy(), 60.0));
    assert_eq!(recovery_minutes(&pet, &config), 20);
    assert_eq!(pet.view(&config).recovery_minutes, 20);
}

// =============================================================================
// Economy
// =============================================================================

#[test]
fn taps_reset_on_the_next_day() {
    let config = CareConfig::default();
    let mut pet = Pet::new(None, t0(), &config);
    toggle_sleep(&mut pet, t0(), &config).unwrap();

    for _ in 0..5 {
        tap(&mut pet, t0(), &config).unwrap();
    }
    assert_eq!(pet.money(), 110);
    assert_eq!(
        tap(&mut pet, t0(), &config),
        Err(RejectionReason::DailyTapLimit { cap: 5 })
    );
    assert_eq!(pet.money(), 110);
    assert_eq!(pet.view(&config).taps_left, 0);

    // Asleep overnight so the pet survives until tomorrow.
    let tomorrow = t0() + TimeDelta::hours(24);
    assert_eq!(tap(&mut pet, tomorrow, &config), Ok(2));
    assert_eq!(pet.taps_today(), 1);
    assert_eq!(pet.money(), 112);
}

#[test]
fn golden_egg_is_too_expensive() {
    let config = PetlingConfig::default();
    let mut pet = Pet::new(None, t0(), &config.care);
    let egg = config.find_item("Golden Egg").unwrap();

    assert_eq!(
        buy_item(&mut pet, t0(), egg, &config.care),
        Err(RejectionReason::InsufficientFunds {
            cost: 150,
            balance: 100
        })
    );
    assert_eq!(pet.money(), 100);
}

#[test]
fn shopping_spree_from_the_default_catalog() {
    let config = PetlingConfig::default();
    let care = &config.care;
    let mut pet = Pet::new(None, t0(), care);

    for name in ["apple", "BALL", "Cake"] {
        buy_item(&mut pet, t0(), config.find_item(name).unwrap(), care).unwrap();
    }
    assert_eq!(pet.money(), 50);
    assert!(approx(pet.hunger(), 0.0));
    assert!(approx(pet.happiness(), 90.0));
    assert!(pet.inventory().is_empty());
}

#[test]
fn passive_income_accrues_hourly() {
    let config = CareConfig::default();
    let mut pet = Pet::new(None, t0(), &config);

    let later = t0() + TimeDelta::minutes(3 * 60 + 20);
    assert_eq!(collect_passive_income(&mut pet, later, &config), Ok(15));
    assert_eq!(
        collect_passive_income(&mut pet, later + TimeDelta::minutes(30), &config),
        Err(RejectionReason::IncomeNotReady)
    );
    assert_eq!(pet.money(), 115);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn snapshot_survives_a_restart() {
    let config = PetlingConfig::default();
    let care = &config.care;
    let mut pet = Pet::new(Some("Pico"), t0(), care);
    let now = t0() + TimeDelta::minutes(42);
    tap(&mut pet, now, care).unwrap();
    feed(&mut pet, now, Some(12.5), care).unwrap();

    let json = encode(&pet).unwrap();
    let mut restored = decode(&json, now + TimeDelta::hours(2), care).unwrap();

    assert_eq!(restored.name(), "Pico");
    assert_eq!(restored.money(), pet.money());
    assert_eq!(restored.taps_today(), 1);
    assert!((restored.hunger() - pet.hunger()).abs() < 1e-6);
    assert!((restored.weight() - pet.weight()).abs() < 1e-6);
    assert_eq!(restored.last_update(), pet.last_update());

    // Catching up after the restart applies the two hours of downtime.
    let report = restored.advance(now + TimeDelta::hours(2), care);
    assert!(approx(report.elapsed_hours, 2.0));
    assert!(approx(restored.hunger(), pet.hunger() + 10.0));
}
