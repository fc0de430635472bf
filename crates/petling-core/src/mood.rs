//! Mood derivation.
//!
//! Mood is a strict priority chain over the pet's state; the first
//! matching rule wins:
//!
//! ```text
//! dead > sleepy > hungry > sad > dirty > happy
//! ```

use petling_types::Mood;

use crate::config::CareConfig;
use crate::pet::Pet;

/// Derive the mood for the pet's current state.
pub fn derive_mood(pet: &Pet, config: &CareConfig) -> Mood {
    if !pet.is_alive {
        Mood::Dead
    } else if pet.is_sleeping {
        Mood::Sleepy
    } else if pet.hunger > config.hungry_above {
        Mood::Hungry
    } else if pet.happiness < config.sad_below {
        Mood::Sad
    } else if pet.cleanliness < config.dirty_below {
        Mood::Dirty
    } else {
        Mood::Happy
    }
}
