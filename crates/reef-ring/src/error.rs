//! Error types for ring operations.

/// Errors that can occur when mutating or querying a ring.
///
/// Every variant signals caller misuse detected before any state change;
/// none are transient or retryable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RingError {
    /// The target is already registered on the ring.
    #[error("target already registered: {0}")]
    DuplicateTarget(String),

    /// The target is not registered on the ring.
    #[error("target not registered: {0}")]
    UnknownTarget(String),

    /// A lookup requested zero targets.
    #[error("requested target count must be at least 1")]
    InvalidCount,

    /// A lookup ran against a ring with no registered targets.
    #[error("no targets registered on the ring")]
    NoTargets,
}
