//! Offline chain verification.
//!
//! `ChainVerifier` rebuilds the chain from the store and checks every entry
//! in insertion order.  Checks per entry, in this order:
//!
//! 1. **Hash** — the recomputed hash matches the stored `entry_hash`.
//! 2. **Signature** — the HMAC over `entry_hash` verifies under the key.
//! 3. **Linkage** — `prev_hash` equals the previous entry's recomputed hash
//!    (or the anchor hash for the first entry).
//! 4. **Order** — `sequence` is the expected next position.
//!
//! The hash check comes first and is independent of the signature: an
//! attacker holding the key still cannot make a tampered payload pass without
//! recomputing the hash, which then breaks the next entry's linkage.
//!
//! Verification never stops at a broken entry.  Every entry at or after the
//! first divergence is flagged, and entries that pass their own checks there
//! are reported as `Untrusted`.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use prism_contracts::{
    entry::{ChainAnchor, LogEntry},
    error::PrismResult,
    verification::{Divergence, EntryStatus, EntryVerdict, VerificationResult},
};

use crate::{
    chain::{recompute_hash, verify_signature},
    config::AuditConfig,
    key::SigningKey,
    store::{StoreReader, StoredLine},
};

/// Verifies a JSONL store against a signing key.
#[derive(Debug, Clone)]
pub struct ChainVerifier {
    path: PathBuf,
    key: SigningKey,
    anchor: ChainAnchor,
}

impl ChainVerifier {
    /// A verifier for the store at `path`, starting from genesis.
    pub fn new(path: impl Into<PathBuf>, key: SigningKey) -> Self {
        Self {
            path: path.into(),
            key,
            anchor: ChainAnchor::genesis(),
        }
    }

    /// A verifier for the store and anchor named by `config`.
    pub fn from_config(config: &AuditConfig, key: SigningKey) -> Self {
        Self::new(config.store_path.clone(), key).with_anchor(config.anchor())
    }

    /// Verify a rotated file that continues from `anchor`.
    pub fn with_anchor(mut self, anchor: ChainAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// A lazy, per-entry verification stream over the store.
    ///
    /// Each call re-opens the store, so the stream can be restarted.
    pub fn stream(&self) -> PrismResult<VerifyStream<'_>> {
        Ok(VerifyStream {
            lines: StoreReader::open(&self.path)?,
            key: &self.key,
            expected_prev: self.anchor.prev_hash.clone(),
            expected_sequence: Some(self.anchor.sequence),
            index: 0,
            diverged: false,
        })
    }

    /// Run the stream to completion and summarize it.
    ///
    /// A broken chain is reported through `VerificationResult::intact`, not
    /// as an error.  `Err(StorageError)` means the store could not be read.
    pub fn verify(&self) -> PrismResult<VerificationResult> {
        let mut stream = self.stream()?;
        let mut entries: u64 = 0;
        let mut flagged: u64 = 0;
        let mut first_divergence: Option<Divergence> = None;

        for verdict in stream.by_ref() {
            let verdict = verdict?;
            entries += 1;
            if !verdict.status.is_valid() {
                flagged += 1;
                if first_divergence.is_none() {
                    first_divergence = Some(Divergence {
                        index: verdict.index,
                        status: verdict.status,
                    });
                }
            }
        }

        let intact = first_divergence.is_none();
        let terminal_hash = (intact && entries > 0).then(|| stream.expected_prev.clone());

        match &first_divergence {
            None => info!(
                store = %self.path.display(),
                entries,
                "audit chain intact"
            ),
            Some(d) => warn!(
                store = %self.path.display(),
                entries,
                flagged,
                first_divergence = d.index,
                status = ?d.status,
                "audit chain integrity violated"
            ),
        }

        Ok(VerificationResult {
            entries,
            intact,
            first_divergence,
            flagged,
            terminal_hash,
        })
    }
}

/// Streaming iterator of `EntryVerdict`s in insertion order.
pub struct VerifyStream<'a> {
    lines: StoreReader,
    key: &'a SigningKey,
    /// Recomputed hash of the previous entry (the anchor hash at the start).
    expected_prev: String,
    /// `None` once the sequence space is exhausted; any further entry is out
    /// of order.
    expected_sequence: Option<u64>,
    index: u64,
    diverged: bool,
}

impl VerifyStream<'_> {
    fn check(&mut self, entry: &LogEntry) -> EntryStatus {
        let recomputed = recompute_hash(entry);

        let status = if recomputed != entry.entry_hash {
            EntryStatus::HashMismatch
        } else if !verify_signature(self.key, &entry.entry_hash, &entry.signature) {
            EntryStatus::SignatureMismatch
        } else if entry.prev_hash != self.expected_prev {
            EntryStatus::LinkBroken
        } else if Some(entry.sequence) != self.expected_sequence {
            EntryStatus::SequenceGap
        } else {
            EntryStatus::Valid
        };

        self.expected_prev = recomputed;
        status
    }
}

impl Iterator for VerifyStream<'_> {
    type Item = PrismResult<EntryVerdict>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };

        let (sequence, mut status) = match line {
            StoredLine::Entry(entry) => (Some(entry.sequence), self.check(&entry)),
            StoredLine::Malformed(reason) => {
                debug!(index = self.index, reason = %reason, "malformed audit line");
                (None, EntryStatus::Malformed)
            }
        };

        if self.diverged && status.is_valid() {
            status = EntryStatus::Untrusted;
        }
        if !status.is_valid() {
            self.diverged = true;
        }

        debug!(index = self.index, ?sequence, status = ?status, "verified audit entry");

        let verdict = EntryVerdict {
            index: self.index,
            sequence,
            status,
        };
        self.index += 1;
        self.expected_sequence = self.expected_sequence.and_then(|s| s.checked_add(1));

        Some(Ok(verdict))
    }
}
