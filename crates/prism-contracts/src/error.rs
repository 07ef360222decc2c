//! Error types for the PRISM audit pipeline.
//!
//! All fallible operations return `PrismResult<T>`.  Variants carry enough
//! context to be reported to an operator without ever echoing the sensitive
//! value that caused them.

use thiserror::Error;

/// The unified error type for the PRISM audit crates.
#[derive(Debug, Error)]
pub enum PrismError {
    /// A payload still contains raw PII and was refused before anything was
    /// written.  `path` is the JSON path of the offending key or value.
    #[error("redaction violation: unredacted {kind} at {path}")]
    RedactionViolation { path: String, kind: String },

    /// The backing store could not be opened, read, written or flushed.
    ///
    /// Fatal to the triggering action: an action that cannot be audited is
    /// not complete.
    #[error("audit storage error: {reason}")]
    StorageError { reason: String },

    /// A stored entry does not hash, sign or link the way the chain requires.
    #[error("chain integrity error at entry {index}: {reason}")]
    ChainIntegrityError { index: u64, reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An audited action reported failure.  The failure itself was recorded.
    #[error("action failed: {reason}")]
    ActionFailed { reason: String },
}

impl PrismError {
    /// Shorthand used by the storage layer to wrap I/O errors with context.
    pub fn storage(context: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        PrismError::StorageError {
            reason: format!("{}: {}", context, err),
        }
    }
}

/// Convenience alias used throughout the PRISM crates.
pub type PrismResult<T> = Result<T, PrismError>;
