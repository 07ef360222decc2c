//! Verification results produced by the chain verifier.
//!
//! The verifier streams one `EntryVerdict` per stored line and folds them
//! into a `VerificationResult`.  A broken chain is reported here, not raised:
//! the caller decides whether it is a security incident.

use serde::{Deserialize, Serialize};

use crate::error::PrismError;

/// Outcome of checking a single stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Hash, signature and linkage all check out.
    Valid,
    /// The line is not a parseable log entry.
    Malformed,
    /// The recomputed hash differs from the stored `entry_hash`.
    HashMismatch,
    /// The signature does not verify against `entry_hash` under the key.
    SignatureMismatch,
    /// `prev_hash` does not equal the previous entry's hash.
    LinkBroken,
    /// `sequence` is not the expected next position.
    SequenceGap,
    /// The entry passes its own checks but follows an earlier divergence.
    Untrusted,
}

impl EntryStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, EntryStatus::Valid)
    }

    /// Human-readable description used in reports and integrity errors.
    pub fn describe(&self) -> &'static str {
        match self {
            EntryStatus::Valid => "valid",
            EntryStatus::Malformed => "line is not a valid log entry",
            EntryStatus::HashMismatch => "recomputed entry_hash does not match stored value",
            EntryStatus::SignatureMismatch => "signature does not verify under the signing key",
            EntryStatus::LinkBroken => "prev_hash does not match the preceding entry",
            EntryStatus::SequenceGap => "sequence is out of order",
            EntryStatus::Untrusted => "follows an earlier divergence",
        }
    }
}

/// The verdict for one stored entry, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryVerdict {
    /// 0-based position of the entry within the store.
    pub index: u64,
    /// The stored sequence number, when the line could be parsed.
    pub sequence: Option<u64>,
    pub status: EntryStatus,
}

/// The first point at which the chain stops checking out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    pub index: u64,
    pub status: EntryStatus,
}

/// Summary of a full verification pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Number of entries read from the store.
    pub entries: u64,
    /// True when every entry is `Valid`.
    pub intact: bool,
    /// The first non-valid entry, if any.
    pub first_divergence: Option<Divergence>,
    /// Number of entries that were not `Valid`.
    pub flagged: u64,
    /// `entry_hash` of the last entry when the chain is intact.  A compact
    /// commitment to the whole log.
    pub terminal_hash: Option<String>,
}

impl VerificationResult {
    /// Convert a broken chain into `ChainIntegrityError`.
    pub fn ensure_intact(self) -> Result<Self, PrismError> {
        match &self.first_divergence {
            None => Ok(self),
            Some(divergence) => Err(PrismError::ChainIntegrityError {
                index: divergence.index,
                reason: divergence.status.describe().to_string(),
            }),
        }
    }
}
