//! The persistence port.
//!
//! A [`PetStore`] keeps one snapshot document: the JSON text produced by
//! the core snapshot codec. Stores do not look inside the document, so
//! every tier is interchangeable and callers never branch on which one
//! served the data.

use std::future::Future;

use crate::error::StoreError;

/// A backing store for the pet snapshot.
pub trait PetStore: Send + Sync {
    /// Short tier name used in log fields.
    fn tier(&self) -> &'static str;

    /// Replace the stored snapshot with `json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    fn save(&self, json: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Read the stored snapshot. `Ok(None)` means nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read fails.
    fn load(&self) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;
}
