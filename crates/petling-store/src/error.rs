//! Error types for the persistence layer.
//!
//! All errors are propagated via [`StoreError`] which wraps the underlying
//! I/O, [`fred`] and snapshot errors with the tier that produced them.

use petling_core::SnapshotError;

/// Errors that can occur while saving or loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A local file operation failed.
    #[error("file store error: {0}")]
    Io(#[from] std::io::Error),

    /// A Redis-compatible remote operation failed.
    #[error("remote store error: {0}")]
    Remote(#[from] fred::error::Error),

    /// The pet could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A configuration error, such as an unparsable remote URL.
    #[error("configuration error: {0}")]
    Config(String),

    /// The tier is switched off or unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Every configured tier failed.
    #[error("all storage tiers failed (remote: {remote}; local: {local})")]
    AllTiersFailed {
        /// Failure reported by the remote tier.
        remote: String,
        /// Failure reported by the local tier.
        local: String,
    },
}
