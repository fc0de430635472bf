//! Coin economy: daily taps, shop purchases, and passive income.
//!
//! Balances are unsigned integers and every credit saturates, so no
//! sequence of actions can overflow or drive the balance negative.

use chrono::{DateTime, Utc};
use petling_types::{InventoryEntry, ItemKind, RejectionReason, ShopItem};
use tracing::{debug, info};

use crate::care::require_alive;
use crate::config::CareConfig;
use crate::pet::{Pet, instant};
use crate::vitals::{advance, clamp_stat};

/// Milliseconds in one hour.
const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Name given to a collectible that arrives without one.
const FALLBACK_ITEM_NAME: &str = "Item";

/// Earn coins by tapping. Returns the coins credited.
///
/// At most `config.daily_tap_cap` taps are rewarded per calendar day; the
/// counter resets during the advance once a new day starts.
///
/// # Errors
///
/// [`RejectionReason::PetDead`] if the pet is dead, or
/// [`RejectionReason::DailyTapLimit`] once today's taps are used up.
pub fn tap(pet: &mut Pet, now: DateTime<Utc>, config: &CareConfig) -> Result<u64, RejectionReason> {
    require_alive(pet, now, config)?;
    if pet.taps_today >= config.daily_tap_cap {
        return Err(RejectionReason::DailyTapLimit {
            cap: config.daily_tap_cap,
        });
    }

    pet.taps_today = pet.taps_today.saturating_add(1);
    pet.money = pet.money.saturating_add(config.tap_reward);
    debug!(
        name = %pet.name,
        taps_today = pet.taps_today,
        money = pet.money,
        "Tap rewarded"
    );

    advance(pet, now, config);
    Ok(config.tap_reward)
}

/// Buy a catalog item and apply its effect.
///
/// - Food lowers hunger by `item.hunger` (default `config.food_hunger_relief`)
/// - Toys raise happiness by `item.happiness` (default `config.toy_happiness_gain`)
/// - Collectibles are appended to the inventory stamped with `now`
///
/// Checks run in that order: alive, known item type, affordable. A refused
/// purchase charges nothing.
///
/// # Errors
///
/// [`RejectionReason::PetDead`], [`RejectionReason::UnknownItemType`], or
/// [`RejectionReason::InsufficientFunds`].
pub fn buy_item(
    pet: &mut Pet,
    now: DateTime<Utc>,
    item: &ShopItem,
    config: &CareConfig,
) -> Result<(), RejectionReason> {
    require_alive(pet, now, config)?;
    if item.kind == ItemKind::Unknown {
        return Err(RejectionReason::UnknownItemType);
    }
    let balance = pet.money;
    let remaining = balance
        .checked_sub(item.cost)
        .ok_or(RejectionReason::InsufficientFunds {
            cost: item.cost,
            balance,
        })?;
    pet.money = remaining;

    match item.kind {
        ItemKind::Food => {
            let relief = non_negative(item.hunger.unwrap_or(config.food_hunger_relief));
            pet.hunger = clamp_stat(pet.hunger - relief);
        }
        ItemKind::Toy => {
            let gain = non_negative(item.happiness.unwrap_or(config.toy_happiness_gain));
            pet.happiness = clamp_stat(pet.happiness + gain);
        }
        ItemKind::Collectible => {
            let name = item.name.trim();
            pet.inventory.push(InventoryEntry {
                name: if name.is_empty() {
                    FALLBACK_ITEM_NAME.to_owned()
                } else {
                    name.to_owned()
                },
                kind: ItemKind::Collectible,
                acquired_at: instant(now),
            });
        }
        ItemKind::Unknown => {}
    }
    info!(
        name = %pet.name,
        item = %item.name,
        kind = %item.kind,
        cost = item.cost,
        money = pet.money,
        "Item bought"
    );

    advance(pet, now, config);
    Ok(())
}

/// Pay out passive income for every full hour since the last payout.
/// Returns the coins credited.
///
/// This does not advance the pet and does not require it to be alive.
/// The payout clock shares `last_energy_recovery` with sleep, so falling
/// asleep restarts it as well.
///
/// # Errors
///
/// [`RejectionReason::IncomeNotReady`] when less than one hour has passed.
pub fn collect_passive_income(
    pet: &mut Pet,
    now: DateTime<Utc>,
    config: &CareConfig,
) -> Result<u64, RejectionReason> {
    let now = instant(now);
    let elapsed_ms = now
        .signed_duration_since(pet.last_energy_recovery)
        .num_milliseconds();
    let hours = elapsed_ms
        .checked_div(MILLIS_PER_HOUR)
        .and_then(|h| u64::try_from(h).ok())
        .unwrap_or(0);
    if hours == 0 {
        return Err(RejectionReason::IncomeNotReady);
    }

    let credited = config.income_per_hour.saturating_mul(hours);
    pet.money = pet.money.saturating_add(credited);
    pet.last_energy_recovery = now;
    info!(name = %pet.name, hours, credited, money = pet.money, "Passive income paid");
    Ok(credited)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(1_760_000_000_000).unwrap_or_default()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn test_pet() -> Pet {
        Pet::new(Some("Tammy"), t0(), &CareConfig::default())
    }

    fn item(name: &str, cost: u64, kind: ItemKind) -> ShopItem {
        ShopItem {
            name: name.to_owned(),
            cost,
            kind,
            hunger: None,
            happiness: None,
        }
    }

    #[test]
    fn five_taps_then_limit() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        for _ in 0..5 {
            assert_eq!(tap(&mut pet, t0(), &config), Ok(2));
        }
        assert_eq!(pet.money(), 110);
        assert_eq!(
            tap(&mut pet, t0(), &config),
            Err(RejectionReason::DailyTapLimit { cap: 5 })
        );
        assert_eq!(pet.money(), 110);
        assert_eq!(pet.taps_today(), 5);
    }

    #[test]
    fn tap_leaves_pet_caught_up() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        let later = t0() + TimeDelta::minutes(90);
        assert_eq!(tap(&mut pet, later, &config), Ok(2));
        assert_eq!(pet.last_update(), later);

        let tapped = pet.clone();
        advance(&mut pet, later, &config);
        assert_eq!(pet, tapped);
    }

    #[test]
    fn dead_pet_cannot_tap_or_buy() {
        let config = CareConfig::default();
        let later = t0() + TimeDelta::hours(10);
        let mut pet = test_pet();
        assert_eq!(tap(&mut pet, later, &config), Err(RejectionReason::PetDead));
        assert_eq!(
            buy_item(&mut pet, later, &item("Apple", 10, ItemKind::Food), &config),
            Err(RejectionReason::PetDead)
        );
        assert_eq!(pet.money(), 100);
    }

    #[test]
    fn expensive_item_is_refused() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        let egg = item("Golden Egg", 150, ItemKind::Collectible);
        assert_eq!(
            buy_item(&mut pet, t0(), &egg, &config),
            Err(RejectionReason::InsufficientFunds {
                cost: 150,
                balance: 100
            })
        );
        assert_eq!(pet.money(), 100);
        assert!(pet.inventory().is_empty());
    }

    #[test]
    fn unknown_item_type_is_refused_before_charging() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        let ribbon = item("Ribbon", 500, ItemKind::Unknown);
        assert_eq!(
            buy_item(&mut pet, t0(), &ribbon, &config),
            Err(RejectionReason::UnknownItemType)
        );
        assert_eq!(pet.money(), 100);
    }

    #[test]
    fn food_and_toys_apply_their_magnitudes() {
        let config = CareConfig::default();
        let mut pet = test_pet();

        let mut cake = item("Cake", 25, ItemKind::Food);
        cake.hunger = Some(40.0);
        assert_eq!(buy_item(&mut pet, t0(), &cake, &config), Ok(()));
        assert!(approx(pet.hunger(), 10.0));

        assert_eq!(buy_item(&mut pet, t0(), &item("Ball", 15, ItemKind::Toy), &config), Ok(()));
        assert!(approx(pet.happiness(), 90.0));

        assert_eq!(buy_item(&mut pet, t0(), &item("Bun", 10, ItemKind::Food), &config), Ok(()));
        assert!(approx(pet.hunger(), 0.0));
        assert_eq!(pet.money(), 50);
    }

    #[test]
    fn collectible_lands_in_inventory() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        let now = t0() + TimeDelta::minutes(5);
        assert_eq!(buy_item(&mut pet, now, &item("Gem", 40, ItemKind::Collectible), &config), Ok(()));
        assert_eq!(buy_item(&mut pet, now, &item("  ", 10, ItemKind::Collectible), &config), Ok(()));

        let names: Vec<&str> = pet.inventory().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Gem", "Item"]);
        assert_eq!(pet.inventory().first().map(|e| e.acquired_at), Some(now));
        assert_eq!(pet.money(), 50);
    }

    #[test]
    fn passive_income_counts_whole_hours() {
        let config = CareConfig::default();
        let mut pet = test_pet();

        let early = t0() + TimeDelta::minutes(59);
        assert_eq!(
            collect_passive_income(&mut pet, early, &config),
            Err(RejectionReason::IncomeNotReady)
        );
        assert_eq!(pet.last_energy_recovery(), t0());

        let later = t0() + TimeDelta::minutes(150);
        assert_eq!(collect_passive_income(&mut pet, later, &config), Ok(10));
        assert_eq!(pet.money(), 110);
        assert_eq!(pet.last_energy_recovery(), later);
    }

    #[test]
    fn passive_income_pays_the_dead() {
        let config = CareConfig::default();
        let mut pet = test_pet();
        let later = t0() + TimeDelta::hours(12);
        advance(&mut pet, later, &config);
        assert!(!pet.is_alive());
        assert_eq!(collect_passive_income(&mut pet, later, &config), Ok(60));
    }
}
