//! Save and load the pet through any [`PetStore`].
//!
//! Saving reports failures to the caller, which logs them and keeps the
//! pet running in memory. Loading never fails: an unreachable tier, a
//! corrupt document, or a snapshot from a newer build all degrade to
//! "no saved pet" with a warning.

use chrono::{DateTime, Utc};
use petling_core::snapshot::{decode, encode};
use petling_core::{CareConfig, Pet};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::port::PetStore;

/// Encode the pet and write it to `store`.
///
/// # Errors
///
/// Returns [`StoreError::Snapshot`] if encoding fails, or whatever the
/// store reports for the write.
pub async fn save_pet<S: PetStore>(store: &S, pet: &Pet) -> Result<(), StoreError> {
    let json = encode(pet)?;
    store.save(&json).await?;
    info!(
        name = %pet.name(),
        tier = store.tier(),
        bytes = json.len(),
        "Pet saved"
    );
    Ok(())
}

/// Read and decode the saved pet, if there is a usable one.
pub async fn load_pet<S: PetStore>(
    store: &S,
    now: DateTime<Utc>,
    config: &CareConfig,
) -> Option<Pet> {
    let json = match store.load().await {
        Ok(Some(json)) => json,
        Ok(None) => {
            info!(tier = store.tier(), "No saved pet");
            return None;
        }
        Err(e) => {
            warn!(tier = store.tier(), error = %e, "Failed to load saved pet");
            return None;
        }
    };

    match decode(&json, now, config) {
        Ok(pet) => {
            info!(
                name = %pet.name(),
                tier = store.tier(),
                alive = pet.is_alive(),
                "Pet loaded"
            );
            Some(pet)
        }
        Err(e) => {
            warn!(tier = store.tier(), error = %e, "Saved pet is unreadable");
            None
        }
    }
}
