//! Journal error types.

use thiserror::Error;

/// Errors that can occur while persisting or loading a run report
#[derive(Debug, Error)]
pub enum JournalError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Report version is not supported by this version
    #[error("Unsupported report version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
