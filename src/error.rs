//! Error types for configuration, device setup, and delivery.

use thiserror::Error;

/// Errors surfaced by the synthesis and delivery engine.
///
/// `Config` and `Device` are always fatal and reported before or while the
/// sink is opened. `Underflow` is fatal in blocking mode: retrying would
/// only mask a systemic timing problem.
#[derive(Debug, Error)]
pub enum Error {
    /// The session configuration cannot produce a valid stream.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The audio device could not be opened or configured.
    #[error("audio device error: {0}")]
    Device(String),

    /// A blocking write could not keep the device fed in time.
    #[error("output underflow: device was not kept fed")]
    Underflow,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
