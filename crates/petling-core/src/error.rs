//! Error types for the petling-core crate.
//!
//! Domain refusals (dead pet, empty wallet, tap cap) are not errors: they
//! come back as [`RejectionReason`](petling_types::RejectionReason) values.
//! This module covers the faults that can occur while turning stored bytes
//! back into a pet.

use petling_types::SNAPSHOT_VERSION;

/// Errors that can occur when encoding or decoding a pet snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot is not valid JSON or does not match the schema.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot was written by a newer build.
    #[error("snapshot version {found} is newer than supported version {SNAPSHOT_VERSION}")]
    UnsupportedVersion {
        /// The version found in the snapshot.
        found: u32,
    },
}
