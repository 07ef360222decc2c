//! Log entry and chain anchor types.
//!
//! `LogEntry` is one line of `memory.jsonl`.  It wraps a redacted `Payload`
//! with its position in the chain, the hash linking it to its predecessor,
//! its own hash and an HMAC signature over that hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PrismError, PrismResult},
    payload::Payload,
};

/// A single signed entry in the hash chain.
///
/// Changing any hashed field (`sequence`, `timestamp`, `prev_hash`,
/// `payload`) invalidates `entry_hash`, and through it every later
/// `prev_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the chain.  Starts at the anchor sequence (0 for genesis).
    pub sequence: u64,

    /// Wall-clock time (UTC) the entry was appended.
    pub timestamp: DateTime<Utc>,

    /// Redacted event data.
    pub payload: Payload,

    /// `entry_hash` of the previous entry, or the anchor hash for the first.
    pub prev_hash: String,

    /// SHA-256 (hex) over sequence, timestamp, prev_hash and canonical payload.
    pub entry_hash: String,

    /// Base64 HMAC-SHA256 of `entry_hash` under the process signing key.
    pub signature: String,
}

impl LogEntry {
    /// The sentinel `prev_hash` of the first entry of a fresh chain.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// Where a chain file starts.
///
/// A fresh log starts at genesis.  When an external rotation procedure starts
/// a new file, that file is anchored at the last entry of its predecessor so
/// the historical chain stays unbroken across files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAnchor {
    pub prev_hash: String,
    pub sequence: u64,
}

impl ChainAnchor {
    pub fn genesis() -> Self {
        Self {
            prev_hash: LogEntry::GENESIS_HASH.to_string(),
            sequence: 0,
        }
    }

    /// Anchor a new file so it continues after `last`.
    ///
    /// Returns `ChainIntegrityError` when `last` already holds the final
    /// sequence number.
    pub fn after(last: &LogEntry) -> PrismResult<Self> {
        let sequence = last
            .sequence
            .checked_add(1)
            .ok_or_else(|| PrismError::ChainIntegrityError {
                index: last.sequence,
                reason: "sequence space exhausted; cannot anchor a continuation".to_string(),
            })?;
        Ok(Self {
            prev_hash: last.entry_hash.clone(),
            sequence,
        })
    }
}

impl Default for ChainAnchor {
    fn default() -> Self {
        Self::genesis()
    }
}
