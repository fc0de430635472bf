//! The application context: configuration plus the (optional) pet.
//!
//! Every trigger the host reacts to, whether a player command or a timer,
//! goes through a [`Session`] method that takes `now` explicitly and
//! returns the text to show the player.

use chrono::{DateTime, Utc};
use petling_core::care::{clean, feed, play, revive, toggle_sleep};
use petling_core::economy::{buy_item, collect_passive_income, tap};
use petling_core::{Pet, PetlingConfig};
use petling_types::{PetView, RejectionReason};
use tracing::{debug, info};

use crate::command::{Command, HELP};

/// Shown whenever a command needs a pet and there is none.
const NO_PET: &str = "You have no pet yet. Type `new <name>` to hatch one.";

/// Owns the pet and the configuration for the lifetime of the host.
#[derive(Debug)]
pub struct Session {
    config: PetlingConfig,
    pet: Option<Pet>,
}

impl Session {
    /// Start a session, with a previously saved pet if there is one.
    pub const fn new(config: PetlingConfig, pet: Option<Pet>) -> Self {
        Self { config, pet }
    }

    /// The pet, if one has been hatched or loaded.
    pub const fn pet(&self) -> Option<&Pet> {
        self.pet.as_ref()
    }

    /// Execute a player command. `save` and `quit` are handled by the host
    /// loop and produce no reply here.
    pub fn execute(&mut self, command: Command, now: DateTime<Utc>) -> String {
        match command {
            Command::New(name) => self.hatch(name.as_deref(), now),
            Command::Help => HELP.to_owned(),
            Command::Shop => self.shop_listing(),
            Command::Save | Command::Quit => String::new(),
            other => self.act(other, now),
        }
    }

    fn hatch(&mut self, name: Option<&str>, now: DateTime<Utc>) -> String {
        let pet = Pet::new(name, now, &self.config.care);
        let reply = format!("Say hello to {}, a brand new egg!", pet.name());
        info!(name = %pet.name(), "Pet hatched");
        self.pet = Some(pet);
        reply
    }

    fn act(&mut self, command: Command, now: DateTime<Utc>) -> String {
        let care = &self.config.care;
        let Some(pet) = self.pet.as_mut() else {
            return NO_PET.to_owned();
        };
        let name = pet.name().to_owned();
        debug!(name = %name, ?command, "Executing command");

        let outcome = match command {
            Command::Feed(amount) => {
                feed(pet, now, amount, care).map(|()| format!("{name} munches happily."))
            }
            Command::Play => play(pet, now, care).map(|()| format!("{name} had fun playing!")),
            Command::Sleep => toggle_sleep(pet, now, care).map(|asleep| {
                if asleep {
                    format!("{name} curls up and falls asleep.")
                } else {
                    format!("{name} wakes up.")
                }
            }),
            Command::Clean => clean(pet, now, care).map(|()| format!("{name} is squeaky clean.")),
            Command::Revive => revive(pet, now, care).map(|()| format!("{name} is back!")),
            Command::Tap => tap(pet, now, care).map(|coins| {
                format!(
                    "+{coins} coins ({} taps left today).",
                    pet.taps_left(care)
                )
            }),
            Command::Buy(item_name) => match self.config.find_item(&item_name) {
                Some(item) => buy_item(pet, now, item, care).map(|()| {
                    format!("You bought {} for {} coins.", item.name, item.cost)
                }),
                None => Ok(format!("The shop has no `{item_name}`.")),
            },
            Command::Status => {
                pet.advance(now, care);
                Ok(render_status(&pet.view(care)))
            }
            Command::View => {
                pet.advance(now, care);
                Ok(serde_json::to_string_pretty(&pet.view(care))
                    .unwrap_or_else(|e| format!("Could not render the pet: {e}")))
            }
            Command::New(_)
            | Command::Help
            | Command::Shop
            | Command::Save
            | Command::Quit => Ok(String::new()),
        };

        outcome.unwrap_or_else(|reason| explain(&name, &reason))
    }

    /// Catch the pet up to `now`. Returns a notice when it grew or died.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Option<String> {
        let pet = self.pet.as_mut()?;
        let report = pet.advance(now, &self.config.care);

        if let Some(cause) = report.death {
            Some(format!(
                "Oh no! {} has died of {cause}. Type `revive` to bring it back.",
                pet.name()
            ))
        } else {
            report
                .new_stage
                .map(|stage| format!("{} has grown into a {stage}!", pet.name()))
        }
    }

    /// Pay out passive income when at least an hour has accrued. Returns a
    /// notice with the amount.
    pub fn collect_income(&mut self, now: DateTime<Utc>) -> Option<String> {
        let pet = self.pet.as_mut()?;
        match collect_passive_income(pet, now, &self.config.care) {
            Ok(coins) => Some(format!(
                "{} earned {coins} coins while you were away.",
                pet.name()
            )),
            Err(reason) => {
                debug!(name = %pet.name(), %reason, "No passive income yet");
                None
            }
        }
    }

    fn shop_listing(&self) -> String {
        let lines: Vec<String> = self
            .config
            .shop
            .iter()
            .map(|item| format!("  {:<12} {:>5} coins  ({})", item.name, item.cost, item.kind))
            .collect();
        format!("Shop:\n{}", lines.join("\n"))
    }
}

/// Turn a refusal into something the player can act on.
fn explain(name: &str, reason: &RejectionReason) -> String {
    match reason {
        RejectionReason::PetDead => format!("{name} has died. Type `revive` first."),
        RejectionReason::AlreadyAlive => format!("{name} is alive and well."),
        RejectionReason::InsufficientFunds { cost, balance } => {
            format!("That costs {cost} coins and you only have {balance}.")
        }
        RejectionReason::DailyTapLimit { cap } => {
            format!("You have used all {cap} taps for today. Come back tomorrow!")
        }
        RejectionReason::Sleeping => format!("Shh, {name} is sleeping."),
        RejectionReason::UnknownItemType => "That item cannot be used.".to_owned(),
        RejectionReason::IncomeNotReady => "No income yet.".to_owned(),
    }
}

/// Render the pet for the terminal.
pub fn render_status(view: &PetView) -> String {
    let mut out = format!(
        "{} the {} ({})\n  hunger {:.0}  happiness {:.0}  energy {:.0}  cleanliness {:.0}\n  \
         age {:.1} days  weight {:.1}  coins {}  items {}\n  taps left today: {}",
        view.name,
        view.stage,
        view.mood,
        view.hunger,
        view.happiness,
        view.energy,
        view.cleanliness,
        view.age_days,
        view.weight,
        view.money,
        view.inventory_count,
        view.taps_left,
    );
    if !view.is_alive {
        out.push_str("\n  (not alive)");
    } else if view.is_sleeping {
        out.push_str("\n  asleep, fully rested in ");
        out.push_str(&format_recovery(view.recovery_minutes));
    }
    out
}

/// Format minutes as `Xh Ym`.
pub fn format_recovery(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(1_760_000_000_000).unwrap()
    }

    fn session() -> Session {
        Session::new(PetlingConfig::default(), None)
    }

    #[test]
    fn commands_need_a_pet() {
        let mut session = session();
        assert_eq!(session.execute(Command::Feed(None), t0()), NO_PET);
        assert_eq!(session.refresh(t0()), None);
        assert_eq!(session.collect_income(t0()), None);
    }

    #[test]
    fn hatch_feed_and_tap() {
        let mut session = session();
        let reply = session.execute(Command::New(Some("Mochi".to_owned())), t0());
        assert!(reply.contains("Mochi"));

        session.execute(Command::Feed(Some(30.0)), t0());
        let hunger = session.pet().map(Pet::hunger).unwrap();
        assert!((hunger - 20.0).abs() < 1e-9);

        let reply = session.execute(Command::Tap, t0());
        assert_eq!(reply, "+2 coins (4 taps left today).");
    }

    #[test]
    fn refusals_are_explained() {
        let mut session = session();
        session.execute(Command::New(None), t0());
        let reply = session.execute(Command::Buy("golden egg".to_owned()), t0());
        assert_eq!(reply, "That costs 150 coins and you only have 100.");
        let reply = session.execute(Command::Buy("unicorn".to_owned()), t0());
        assert_eq!(reply, "The shop has no `unicorn`.");
    }

    #[test]
    fn refresh_reports_death() {
        let mut session = session();
        session.execute(Command::New(Some("Tammy".to_owned())), t0());
        let notice = session.refresh(t0() + TimeDelta::hours(10));
        assert_eq!(
            notice.as_deref(),
            Some("Oh no! Tammy has died of starvation. Type `revive` to bring it back.")
        );
        assert_eq!(session.refresh(t0() + TimeDelta::hours(11)), None);
    }

    #[test]
    fn income_after_an_hour() {
        let mut session = session();
        session.execute(Command::New(None), t0());
        assert_eq!(session.collect_income(t0() + TimeDelta::minutes(30)), None);
        let notice = session.collect_income(t0() + TimeDelta::minutes(61));
        assert_eq!(
            notice.as_deref(),
            Some("Tammy earned 5 coins while you were away.")
        );
    }

    #[test]
    fn recovery_format() {
        assert_eq!(format_recovery(20), "0h 20m");
        assert_eq!(format_recovery(135), "2h 15m");
    }

    #[test]
    fn sleeping_status_shows_recovery() {
        let mut session = session();
        session.execute(Command::New(None), t0() - TimeDelta::hours(5));
        session.execute(Command::Sleep, t0());
        let status = session.execute(Command::Status, t0());
        assert!(status.contains("asleep, fully rested in 0h 20m"), "{status}");
    }
}
