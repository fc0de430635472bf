//! Mortality rule for the pet.
//!
//! A pet dies the moment any of these holds after stats are clamped:
//! - hunger reaches 100
//! - happiness reaches 0
//! - energy reaches 0
//!
//! Death is terminal until an explicit revival.

use crate::pet::Pet;

/// The cause of a pet's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// Hunger reached the maximum.
    Starvation,
    /// Happiness reached zero.
    Heartbreak,
    /// Energy reached zero.
    Exhaustion,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Starvation => write!(f, "starvation"),
            Self::Heartbreak => write!(f, "heartbreak"),
            Self::Exhaustion => write!(f, "exhaustion"),
        }
    }
}

/// Check whether the pet's stats meet a death condition.
///
/// Returns `Some(cause)` for the first condition that holds, checked in
/// the order hunger, happiness, energy. This only inspects the stats; it
/// does not look at or change the alive flag.
pub fn check_death(pet: &Pet) -> Option<DeathCause> {
    if pet.hunger >= 100.0 {
        return Some(DeathCause::Starvation);
    }
    if pet.happiness <= 0.0 {
        return Some(DeathCause::Heartbreak);
    }
    if pet.energy <= 0.0 {
        return Some(DeathCause::Exhaustion);
    }
    None
}
