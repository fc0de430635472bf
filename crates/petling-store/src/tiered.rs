//! Dual-tier store: a durable remote tier backed by a local fallback.
//!
//! ```text
//! save ──> local ──> remote      Ok if either tier accepted the write
//! load ──> remote ─(miss/err)─> local
//! ```
//!
//! The remote tier is optional; without one the store behaves exactly
//! like its local tier.

use tracing::warn;

use crate::error::StoreError;
use crate::port::PetStore;

/// A remote tier `R` with a local fallback `L`.
#[derive(Debug)]
pub struct TieredStore<R, L> {
    remote: Option<R>,
    local: L,
}

impl<R: PetStore, L: PetStore> TieredStore<R, L> {
    /// Combine an optional remote tier with a local tier.
    pub const fn new(remote: Option<R>, local: L) -> Self {
        Self { remote, local }
    }

    /// The remote tier, if configured.
    pub const fn remote(&self) -> Option<&R> {
        self.remote.as_ref()
    }

    /// The local tier.
    pub const fn local(&self) -> &L {
        &self.local
    }
}

impl<R: PetStore, L: PetStore> PetStore for TieredStore<R, L> {
    fn tier(&self) -> &'static str {
        "tiered"
    }

    async fn save(&self, json: &str) -> Result<(), StoreError> {
        let local = self.local.save(json).await;
        if let Err(e) = &local {
            warn!(tier = self.local.tier(), error = %e, "Local save failed");
        }

        let Some(remote) = &self.remote else {
            return local;
        };
        match (remote.save(json).await, local) {
            (Ok(()), _) => Ok(()),
            (Err(e), Ok(())) => {
                warn!(tier = remote.tier(), error = %e, "Remote save failed, kept local copy");
                Ok(())
            }
            (Err(remote_err), Err(local_err)) => Err(StoreError::AllTiersFailed {
                remote: remote_err.to_string(),
                local: local_err.to_string(),
            }),
        }
    }

    async fn load(&self) -> Result<Option<String>, StoreError> {
        let Some(remote) = &self.remote else {
            return self.local.load().await;
        };

        let remote_err = match remote.load().await {
            Ok(Some(json)) => return Ok(Some(json)),
            Ok(None) => None,
            Err(e) => {
                warn!(tier = remote.tier(), error = %e, "Remote load failed, trying local");
                Some(e)
            }
        };

        match (self.local.load().await, remote_err) {
            (Ok(found), _) => Ok(found),
            (Err(local_err), None) => Err(local_err),
            (Err(local_err), Some(remote_err)) => Err(StoreError::AllTiersFailed {
                remote: remote_err.to_string(),
                local: local_err.to_string(),
            }),
        }
    }
}
