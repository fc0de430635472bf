//! Error types for the host binary.
//!
//! [`HostError`] is the top-level error type that wraps all possible
//! failure modes during startup. Failures inside the command loop,
//! unreadable input included, are reported to the player and logged instead.

/// Top-level error for the host binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: petling_core::config::ConfigError,
    },
}
