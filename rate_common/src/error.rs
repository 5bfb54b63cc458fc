//! Error types shared between the channel, the client and the feed simulator.
//!
//! The `RateError` enum unifies the failure cases of decoding wire frames,
//! resolving asset symbols and talking to the transport,
//! allowing every crate to propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the whole workspace.
#[derive(Error, Debug)]
pub enum RateError {
    /// I/O error originating from the standard library or sockets.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding a JSON envelope via serde_json.
    #[error("JSON decode/encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// A wire pair without the `BASE-QUOTE` separator.
    #[error("Malformed currency pair: {0}")]
    MalformedPair(String),

    /// The base side of a pair is not a known crypto asset.
    #[error("Unrecognized crypto asset: {0}")]
    UnrecognizedAsset(String),

    /// A price string that is not a valid decimal.
    #[error("Invalid rate: {0}")]
    InvalidRate(#[from] rust_decimal::Error),

    /// The transport refused or failed to send a message.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for RateError {
    fn from(err: PoisonError<T>) -> Self {
        RateError::MutexLock(err.to_string())
    }
}
