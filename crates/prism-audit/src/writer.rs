//! The durable JSONL audit writer.
//!
//! `FileAuditWriter` is the production implementation of `AuditSink`.  It
//! owns the store file in append mode and keeps the chain head (last hash,
//! next sequence) behind a `Mutex`, so every append reads the head and
//! advances it under the same lock.  Two threads can share one writer through
//! an `Arc` without forking the chain.
//!
//! Each entry is written as a single buffer (`json + "\n"`) with one append
//! and then `sync_data`, so readers see either a whole line or a
//! newline-less tail they must ignore.
//!
//! Across processes, a writer holds an exclusive advisory lock on the store
//! for its whole lifetime.  A second writer on the same store is refused at
//! `open`.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{info, warn};

use prism_contracts::{
    entry::{ChainAnchor, LogEntry},
    error::{PrismError, PrismResult},
    payload::Payload,
};
use prism_core::traits::{AuditSink, Redactor};

use crate::{
    chain::{hash_entry, sign},
    config::AuditConfig,
    key::SigningKey,
    store::{StoreReader, StoredLine},
};

// ── Internal mutable state ────────────────────────────────────────────────────

/// The chain head and the open store handle.
pub(crate) struct WriterState {
    /// Append handle.  Holds the store's exclusive lock until dropped.
    pub(crate) file: File,

    /// `entry_hash` of the last committed entry, or the anchor hash.
    last_hash: String,

    /// Sequence number the next entry receives.
    next_sequence: u64,

    /// Set when a write failed part-way.  The store may now end in a torn
    /// line, so nothing more is appended until the store is reopened.
    poisoned: bool,
}

// ── Public writer ─────────────────────────────────────────────────────────────

/// Append-only, signed, hash-chained writer over a JSONL file.
pub struct FileAuditWriter {
    path: PathBuf,
    key: SigningKey,
    guard: Arc<dyn Redactor>,
    pub(crate) state: Mutex<WriterState>,
}

impl FileAuditWriter {
    /// Open the store named by `config`, recovering the chain head from its
    /// last line.
    ///
    /// `guard` is the redaction check every payload must pass before it is
    /// written.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the file or its parent directory cannot be created,
    ///   opened or read, or if another writer already holds the store.
    /// - `ChainIntegrityError` if the store ends in a torn line or its last
    ///   line is not a valid entry, or its last sequence cannot be followed.
    pub fn open(config: &AuditConfig, key: SigningKey, guard: Arc<dyn Redactor>) -> PrismResult<Self> {
        let path = config.store_path.clone();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PrismError::storage(format!("create directory '{}'", parent.display()), e)
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| PrismError::storage(format!("open '{}' for append", path.display()), e))?;

        // Lock before reading the head, so no other writer can move it between
        // recovery and our first append.
        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(PrismError::StorageError {
                    reason: format!("'{}' is held by another audit writer", path.display()),
                })
            }
            Err(TryLockError::Error(e)) => {
                return Err(PrismError::storage(format!("lock '{}'", path.display()), e))
            }
        }

        let (last_hash, next_sequence) = recover_head(&path, config.anchor())?;

        info!(
            store = %path.display(),
            next_sequence,
            last_hash = %last_hash,
            "audit writer opened"
        );

        Ok(Self {
            path,
            key,
            guard,
            state: Mutex::new(WriterState {
                file,
                last_hash,
                next_sequence,
                poisoned: false,
            }),
        })
    }

    /// Append one payload as a new signed entry.
    ///
    /// Returns only after the line has been flushed to disk.
    ///
    /// # Errors
    ///
    /// - `RedactionViolation` if the guard finds raw PII.  Nothing is written.
    /// - `StorageError` if serialization, the write or the flush fails, or if
    ///   an earlier write failed.  The chain head does not advance.
    /// - `ChainIntegrityError` if the sequence space is exhausted.
    pub fn append(&self, payload: &Payload) -> PrismResult<LogEntry> {
        if let Err(e) = self.guard.check(payload) {
            warn!(store = %self.path.display(), error = %e, "refusing unredacted payload");
            return Err(e);
        }

        let mut state = self.lock_state()?;

        if state.poisoned {
            return Err(PrismError::StorageError {
                reason: format!(
                    "a previous write to '{}' failed; reopen the store before appending",
                    self.path.display()
                ),
            });
        }

        let sequence = state.next_sequence;
        let Some(following) = sequence.checked_add(1) else {
            return Err(PrismError::ChainIntegrityError {
                index: sequence,
                reason: "sequence space exhausted; rotate to a new store".to_string(),
            });
        };
        let prev_hash = state.last_hash.clone();
        let timestamp = Utc::now();

        let entry_hash = hash_entry(sequence, &timestamp, &prev_hash, payload);
        let signature = sign(&self.key, &entry_hash);

        let entry = LogEntry {
            sequence,
            timestamp,
            payload: payload.clone(),
            prev_hash,
            entry_hash,
            signature,
        };

        let mut line = serde_json::to_vec(&entry)
            .map_err(|e| PrismError::storage("serialize audit entry", e))?;
        line.push(b'\n');

        let file = &mut state.file;
        let written = file.write_all(&line).and_then(|_| file.sync_data());

        if let Err(e) = written {
            state.poisoned = true;
            warn!(
                store = %self.path.display(),
                sequence,
                error = %e,
                "audit append failed; writer poisoned"
            );
            return Err(PrismError::storage(
                format!("append to '{}'", self.path.display()),
                e,
            ));
        }

        state.last_hash = entry.entry_hash.clone();
        state.next_sequence = following;

        info!(sequence, entry_hash = %entry.entry_hash, "audit entry appended");

        Ok(entry)
    }

    /// `entry_hash` of the last committed entry (or the anchor hash).
    pub fn last_hash(&self) -> PrismResult<String> {
        Ok(self.lock_state()?.last_hash.clone())
    }

    /// Sequence number the next entry will receive.
    pub fn next_sequence(&self) -> PrismResult<u64> {
        Ok(self.lock_state()?.next_sequence)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_state(&self) -> PrismResult<std::sync::MutexGuard<'_, WriterState>> {
        self.state.lock().map_err(|e| PrismError::StorageError {
            reason: format!("audit writer lock poisoned: {}", e),
        })
    }
}

// ── AuditSink impl ────────────────────────────────────────────────────────────

impl AuditSink for FileAuditWriter {
    fn append(&self, payload: &Payload) -> PrismResult<LogEntry> {
        FileAuditWriter::append(self, payload)
    }
}

// ── Recovery ──────────────────────────────────────────────────────────────────

/// Scan the store and return `(last_hash, next_sequence)`.
///
/// An empty or missing store starts at `anchor`.
fn recover_head(path: &Path, anchor: ChainAnchor) -> PrismResult<(String, u64)> {
    let mut reader = StoreReader::open(path)?;
    let mut last: Option<LogEntry> = None;
    let mut index: u64 = 0;
    let mut malformed_at: Option<u64> = None;

    for line in reader.by_ref() {
        match line? {
            StoredLine::Entry(entry) => {
                last = Some(entry);
                malformed_at = None;
            }
            StoredLine::Malformed(_) => malformed_at = Some(index),
        }
        index += 1;
    }

    if reader.has_torn_tail() {
        return Err(PrismError::ChainIntegrityError {
            index,
            reason: format!("'{}' ends with an incomplete line", path.display()),
        });
    }

    if let Some(index) = malformed_at {
        return Err(PrismError::ChainIntegrityError {
            index,
            reason: "last line is not a valid log entry; cannot link to it".to_string(),
        });
    }

    match last {
        Some(entry) => {
            let next = entry.sequence.checked_add(1).ok_or_else(|| {
                PrismError::ChainIntegrityError {
                    index: index - 1,
                    reason: format!("last sequence {} cannot be followed", entry.sequence),
                }
            })?;
            Ok((entry.entry_hash, next))
        }
        None => Ok((anchor.prev_hash, anchor.sequence)),
    }
}
