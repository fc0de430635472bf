//! In-memory tier for tests and remote-less runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::StoreError;
use crate::port::PetStore;

/// Snapshot kept in process memory.
///
/// Can be armed with [`MemoryStore::set_failing`] to make every call fail,
/// which stands in for an unreachable tier.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `json`.
    pub fn with_contents(json: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(json.into())),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent save and load fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// The stored document, if any.
    pub fn contents(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::Relaxed) {
            Err(StoreError::Unavailable("memory store is switched off".to_owned()))
        } else {
            Ok(())
        }
    }
}

impl PetStore for MemoryStore {
    fn tier(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, json: &str) -> Result<(), StoreError> {
        self.check()?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(json.to_owned());
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.contents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn armed_store_fails() {
        let store = MemoryStore::with_contents("{}");
        store.set_failing(true);
        assert!(matches!(store.load().await, Err(StoreError::Unavailable(_))));
        assert!(store.save("[]").await.is_err());

        store.set_failing(false);
        assert_eq!(store.load().await.ok().flatten().as_deref(), Some("{}"));
    }
}
