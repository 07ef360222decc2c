//! # prism-audit
//!
//! Signed, SHA-256 hash-chained, append-only audit log for the PRISM
//! orchestrator.
//!
//! ## Overview
//!
//! Every auditable action is written to `memory.jsonl` as one JSON line.  The
//! line links to the previous one through its hash and carries an
//! HMAC-SHA256 signature of its own hash.  Editing any entry, even a single
//! byte, is detected by `ChainVerifier`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prism_audit::{AuditConfig, ChainVerifier, FileAuditWriter};
//! use prism_redact::PiiRedactor;
//!
//! let config = AuditConfig::from_file(Path::new("audit.toml"))?;
//! let key = config.resolve_signing_key()?;
//!
//! let writer = FileAuditWriter::open(&config, key.clone(), Arc::new(PiiRedactor::new()?))?;
//! writer.append(&payload)?;
//!
//! let result = ChainVerifier::from_config(&config, key).verify()?;
//! assert!(result.intact);
//! ```

pub mod chain;
pub mod config;
pub mod key;
pub mod store;
pub mod verifier;
pub mod writer;

pub use chain::{hash_entry, recompute_hash, sign, verify_signature};
pub use config::AuditConfig;
pub use key::SigningKey;
pub use store::{tail, StoreReader, StoredLine};
pub use verifier::{ChainVerifier, VerifyStream};
pub use writer::FileAuditWriter;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs::{File, OpenOptions};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::thread;

    use tempfile::TempDir;

    use prism_contracts::{
        entry::{ChainAnchor, LogEntry},
        error::PrismError,
        payload::Payload,
        verification::EntryStatus,
    };
    use prism_redact::PiiRedactor;

    use super::{
        chain::{recompute_hash, sign},
        tail, AuditConfig, ChainVerifier, FileAuditWriter, SigningKey, StoreReader,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn key() -> SigningKey {
        SigningKey::new("test-signing-key").unwrap()
    }

    fn store(dir: &TempDir) -> PathBuf {
        dir.path().join("memory.jsonl")
    }

    fn open_writer(path: &Path) -> FileAuditWriter {
        FileAuditWriter::open(
            &AuditConfig::new(path),
            key(),
            Arc::new(PiiRedactor::new().unwrap()),
        )
        .unwrap()
    }

    fn action(action: &str, actor: &str) -> Payload {
        Payload::new().with("action", action).with("actor", actor)
    }

    fn write_n(path: &Path, n: usize) -> Vec<LogEntry> {
        let writer = open_writer(path);
        (0..n)
            .map(|i| writer.append(&action(&format!("step-{}", i), "bot-1")).unwrap())
            .collect()
    }

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Parse the store, let `f` edit the entries, write them back.
    fn rewrite(path: &Path, f: impl FnOnce(&mut Vec<LogEntry>)) {
        let mut entries: Vec<LogEntry> = read_lines(path)
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        f(&mut entries);
        let mut out = String::new();
        for entry in &entries {
            out.push_str(&serde_json::to_string(entry).unwrap());
            out.push('\n');
        }
        std::fs::write(path, out).unwrap();
    }

    fn statuses(verifier: &ChainVerifier) -> Vec<EntryStatus> {
        verifier
            .stream()
            .unwrap()
            .map(|v| v.unwrap().status)
            .collect()
    }

    // ── Append and verify ─────────────────────────────────────────────────────

    /// Two appended actions verify as an intact, linked chain.
    #[test]
    fn test_route_then_complete_is_intact() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        let writer = open_writer(&path);

        let first = writer.append(&action("route_task", "bot-1")).unwrap();
        let second = writer.append(&action("complete_task", "bot-1")).unwrap();

        let result = ChainVerifier::new(&path, key()).verify().unwrap();
        assert_eq!(result.entries, 2);
        assert!(result.intact);
        assert_eq!(result.first_divergence, None);
        assert_eq!(second.prev_hash, first.entry_hash);
        assert_eq!(result.terminal_hash.as_deref(), Some(second.entry_hash.as_str()));
    }

    /// The first entry of a fresh store links to the genesis sentinel.
    #[test]
    fn test_genesis_hash() {
        let dir = TempDir::new().unwrap();
        let entries = write_n(&store(&dir), 1);
        assert_eq!(entries[0].prev_hash, LogEntry::GENESIS_HASH);
        assert_eq!(entries[0].sequence, 0);
    }

    /// N appends stream back as N valid verdicts in insertion order.
    #[test]
    fn test_stream_enumerates_in_order() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        let written = write_n(&path, 12);

        let verdicts: Vec<_> = ChainVerifier::new(&path, key())
            .stream()
            .unwrap()
            .map(Result::unwrap)
            .collect();

        assert_eq!(verdicts.len(), 12);
        for (i, verdict) in verdicts.iter().enumerate() {
            assert_eq!(verdict.index, i as u64);
            assert_eq!(verdict.sequence, Some(i as u64));
            assert_eq!(verdict.status, EntryStatus::Valid);
        }
        for pair in written.windows(2) {
            assert_eq!(pair[1].prev_hash, pair[0].entry_hash);
        }
    }

    /// Each persisted line carries the required fields.
    #[test]
    fn test_line_format() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 1);

        let line: serde_json::Value = serde_json::from_str(&read_lines(&path)[0]).unwrap();
        for field in ["sequence", "timestamp", "payload", "prev_hash", "entry_hash", "signature"] {
            assert!(line.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(line["payload"]["action"], "step-0");
    }

    /// A missing store is an empty, intact chain.
    #[test]
    fn test_verify_missing_store() {
        let dir = TempDir::new().unwrap();
        let result = ChainVerifier::new(store(&dir), key()).verify().unwrap();
        assert_eq!(result.entries, 0);
        assert!(result.intact);
        assert_eq!(result.terminal_hash, None);
    }

    /// Verifying an unchanged store twice gives identical results.
    #[test]
    fn test_verify_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 5);

        let verifier = ChainVerifier::new(&path, key());
        assert_eq!(verifier.verify().unwrap(), verifier.verify().unwrap());
    }

    // ── Tamper detection ──────────────────────────────────────────────────────

    /// Editing the first line's payload in the file breaks the chain at 0.
    #[test]
    fn test_edited_payload_detected_at_index_zero() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        let writer = open_writer(&path);
        writer.append(&action("route_task", "bot-1")).unwrap();
        writer.append(&action("complete_task", "bot-1")).unwrap();

        let lines = read_lines(&path);
        let edited = lines[0].replacen("route_task", "route_tasx", 1);
        assert_ne!(edited, lines[0]);
        std::fs::write(&path, format!("{}\n{}\n", edited, lines[1])).unwrap();

        let result = ChainVerifier::new(&path, key()).verify().unwrap();
        assert!(!result.intact);
        let divergence = result.first_divergence.unwrap();
        assert_eq!(divergence.index, 0);
        assert_eq!(divergence.status, EntryStatus::HashMismatch);
    }

    /// A tampered entry flags itself and everything after it.
    #[test]
    fn test_tamper_flags_all_subsequent_entries() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 5);

        rewrite(&path, |entries| {
            entries[2].payload.insert("actor", "bot-9");
        });

        let verifier = ChainVerifier::new(&path, key());
        assert_eq!(
            statuses(&verifier),
            vec![
                EntryStatus::Valid,
                EntryStatus::Valid,
                EntryStatus::HashMismatch,
                EntryStatus::LinkBroken,
                EntryStatus::Untrusted,
            ]
        );

        let result = verifier.verify().unwrap();
        assert_eq!(result.first_divergence.unwrap().index, 2);
        assert_eq!(result.flagged, 3);
        assert_eq!(result.terminal_hash, None);
    }

    /// Re-signing a tampered entry with the right key does not help when the
    /// stored hash was not recomputed: the hash check runs first.
    #[test]
    fn test_resigned_entry_with_stale_hash_fails_hash_check() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 3);

        rewrite(&path, |entries| {
            let e = &mut entries[1];
            e.payload.insert("action", "exfiltrate");
            e.signature = sign(&key(), &e.entry_hash);
        });

        let result = ChainVerifier::new(&path, key()).verify().unwrap();
        let divergence = result.first_divergence.unwrap();
        assert_eq!(divergence.index, 1);
        assert_eq!(divergence.status, EntryStatus::HashMismatch);
    }

    /// Even a key holder who fully rehashes and re-signs a middle entry
    /// breaks the next entry's linkage.
    #[test]
    fn test_rehashed_entry_breaks_next_link() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 3);

        rewrite(&path, |entries| {
            let e = &mut entries[1];
            e.payload.insert("action", "exfiltrate");
            e.entry_hash = recompute_hash(e);
            e.signature = sign(&key(), &e.entry_hash);
        });

        assert_eq!(
            statuses(&ChainVerifier::new(&path, key())),
            vec![EntryStatus::Valid, EntryStatus::Valid, EntryStatus::LinkBroken]
        );
    }

    /// A store verified under the wrong key fails on the signature.
    #[test]
    fn test_wrong_key_is_signature_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 2);

        let other = SigningKey::new("another-key").unwrap();
        let result = ChainVerifier::new(&path, other).verify().unwrap();
        assert!(!result.intact);
        assert_eq!(result.first_divergence.unwrap().status, EntryStatus::SignatureMismatch);
        assert_eq!(result.flagged, 2);
    }

    /// Swapping two lines is caught as a broken link.
    #[test]
    fn test_reordered_lines_detected() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 3);

        rewrite(&path, |entries| entries.swap(0, 1));

        let result = ChainVerifier::new(&path, key()).verify().unwrap();
        let divergence = result.first_divergence.unwrap();
        assert_eq!(divergence.status, EntryStatus::LinkBroken);
        assert_eq!(divergence.index, 0);
    }

    /// A deleted middle entry is caught.
    #[test]
    fn test_deleted_entry_detected() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 4);

        rewrite(&path, |entries| {
            entries.remove(1);
        });

        let result = ChainVerifier::new(&path, key()).verify().unwrap();
        assert_eq!(result.entries, 3);
        let divergence = result.first_divergence.unwrap();
        assert_eq!(divergence.index, 1);
        assert_eq!(divergence.status, EntryStatus::LinkBroken);
    }

    /// A garbage line is reported as malformed, not as an I/O error.
    #[test]
    fn test_malformed_line_flagged() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 2);

        let lines = read_lines(&path);
        std::fs::write(&path, format!("{}\nnot json\n{}\n", lines[0], lines[1])).unwrap();

        assert_eq!(
            statuses(&ChainVerifier::new(&path, key())),
            vec![EntryStatus::Valid, EntryStatus::Malformed, EntryStatus::SequenceGap]
        );
    }

    // ── Redaction guard ───────────────────────────────────────────────────────

    /// An email address in the payload is refused and nothing is written.
    #[test]
    fn test_email_payload_rejected() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        let writer = open_writer(&path);
        writer.append(&action("route_task", "bot-1")).unwrap();

        let err = writer
            .append(&action("notify", "user@example.com"))
            .unwrap_err();

        match err {
            PrismError::RedactionViolation { path: field, kind } => {
                assert_eq!(field, "$.actor");
                assert_eq!(kind, "email");
            }
            other => panic!("expected RedactionViolation, got {:?}", other),
        }
        assert_eq!(read_lines(&path).len(), 1);
        assert_eq!(writer.next_sequence().unwrap(), 1);
    }

    // ── Writer recovery ───────────────────────────────────────────────────────

    /// A reopened writer continues the existing chain.
    #[test]
    fn test_reopen_resumes_chain() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        let first = write_n(&path, 2);

        let writer = open_writer(&path);
        assert_eq!(writer.next_sequence().unwrap(), 2);
        assert_eq!(writer.last_hash().unwrap(), first[1].entry_hash);

        let third = writer.append(&action("archive", "bot-2")).unwrap();
        assert_eq!(third.sequence, 2);
        assert_eq!(third.prev_hash, first[1].entry_hash);
        assert!(ChainVerifier::new(&path, key()).verify().unwrap().intact);
    }

    /// An in-flight (newline-less) tail is invisible to readers, and a writer
    /// refuses to extend it.
    #[test]
    fn test_torn_tail_ignored_by_reader_refused_by_writer() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 2);

        let mut contents = std::fs::read_to_string(&path).unwrap();
        contents.push_str(r#"{"sequence":2,"timestamp":"#);
        std::fs::write(&path, contents).unwrap();

        let result = ChainVerifier::new(&path, key()).verify().unwrap();
        assert!(result.intact);
        assert_eq!(result.entries, 2);

        let mut reader = StoreReader::open(&path).unwrap();
        assert_eq!(reader.by_ref().count(), 2);
        assert!(reader.has_torn_tail());

        let err = FileAuditWriter::open(
            &AuditConfig::new(&path),
            key(),
            Arc::new(PiiRedactor::new().unwrap()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, PrismError::ChainIntegrityError { index: 2, .. }));
    }

    /// The writer creates missing parent directories.
    #[test]
    fn test_open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit").join("2026").join("memory.jsonl");
        write_n(&path, 1);
        assert_eq!(read_lines(&path).len(), 1);
    }

    /// Rewrite the only entry of `path` with `sequence`, re-hashed and
    /// re-signed so it is valid on its own.
    fn resequence_only_entry(path: &Path, sequence: u64) -> LogEntry {
        let mut rewritten = None;
        rewrite(path, |entries| {
            let entry = &mut entries[0];
            entry.sequence = sequence;
            entry.entry_hash = recompute_hash(entry);
            entry.signature = sign(&key(), &entry.entry_hash);
            rewritten = Some(entry.clone());
        });
        rewritten.unwrap()
    }

    /// A failed write poisons the writer: the head does not advance, later
    /// appends are refused, and a reopened writer continues the intact chain.
    #[test]
    fn test_failed_write_poisons_writer() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        let writer = open_writer(&path);
        let first = writer.append(&action("route_task", "bot-1")).unwrap();

        // Swap in a read-only handle so the next write fails.
        writer.state.lock().unwrap().file = File::open(&path).unwrap();
        let err = writer.append(&action("complete_task", "bot-1")).err().unwrap();
        assert!(matches!(err, PrismError::StorageError { .. }));
        assert_eq!(writer.next_sequence().unwrap(), 1);
        assert_eq!(writer.last_hash().unwrap(), first.entry_hash);

        // A usable handle again; the writer still refuses.
        writer.state.lock().unwrap().file =
            OpenOptions::new().append(true).open(&path).unwrap();
        let err = writer.append(&action("complete_task", "bot-1")).err().unwrap();
        assert!(matches!(err, PrismError::StorageError { .. }));
        assert_eq!(read_lines(&path).len(), 1);
        drop(writer);

        let reopened = open_writer(&path);
        let second = reopened.append(&action("complete_task", "bot-1")).unwrap();
        assert_eq!(second.sequence, 1);
        assert_eq!(second.prev_hash, first.entry_hash);
        assert!(ChainVerifier::new(&path, key()).verify().unwrap().intact);
    }

    /// Only one writer may hold a store at a time; the lock goes with it.
    #[test]
    fn test_second_writer_on_same_store_refused() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        let holder = open_writer(&path);
        holder.append(&action("route_task", "bot-1")).unwrap();

        let err = FileAuditWriter::open(
            &AuditConfig::new(&path),
            key(),
            Arc::new(PiiRedactor::new().unwrap()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, PrismError::StorageError { .. }));

        holder.append(&action("complete_task", "bot-1")).unwrap();
        drop(holder);

        let next = open_writer(&path);
        assert_eq!(next.next_sequence().unwrap(), 2);
        next.append(&action("archive", "bot-1")).unwrap();

        let result = ChainVerifier::new(&path, key()).verify().unwrap();
        assert!(result.intact);
        assert_eq!(result.entries, 3);
    }

    /// A store whose last entry holds `u64::MAX` cannot be extended, but still
    /// verifies under a matching anchor.
    #[test]
    fn test_exhausted_sequence_refused_at_open() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 1);
        let last = resequence_only_entry(&path, u64::MAX);

        let err = FileAuditWriter::open(
            &AuditConfig::new(&path),
            key(),
            Arc::new(PiiRedactor::new().unwrap()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, PrismError::ChainIntegrityError { index: 0, .. }));

        let anchor = ChainAnchor {
            prev_hash: LogEntry::GENESIS_HASH.to_string(),
            sequence: u64::MAX,
        };
        let verifier = ChainVerifier::new(&path, key()).with_anchor(anchor);
        assert_eq!(statuses(&verifier), vec![EntryStatus::Valid]);

        assert!(matches!(
            ChainAnchor::after(&last),
            Err(PrismError::ChainIntegrityError { .. })
        ));
    }

    /// An anchor at `u64::MAX` leaves no room to append; nothing is written.
    #[test]
    fn test_exhausted_anchor_refused_at_append() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        let mut config = AuditConfig::new(&path);
        config.anchor = Some(ChainAnchor {
            prev_hash: LogEntry::GENESIS_HASH.to_string(),
            sequence: u64::MAX,
        });

        let writer =
            FileAuditWriter::open(&config, key(), Arc::new(PiiRedactor::new().unwrap())).unwrap();
        let err = writer.append(&action("route_task", "bot-1")).err().unwrap();
        assert!(matches!(err, PrismError::ChainIntegrityError { .. }));
        assert_eq!(writer.next_sequence().unwrap(), u64::MAX);
        assert!(read_lines(&path).is_empty());
    }

    // ── Concurrency ───────────────────────────────────────────────────────────

    /// Appends from several threads through one writer never fork the chain.
    #[test]
    fn test_concurrent_appends_stay_linked() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        let writer = Arc::new(open_writer(&path));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let writer = Arc::clone(&writer);
                thread::spawn(move || {
                    for i in 0..25 {
                        writer
                            .append(&action(&format!("t{}-{}", t, i), &format!("bot-{}", t)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let result = ChainVerifier::new(&path, key()).verify().unwrap();
        assert_eq!(result.entries, 100);
        assert!(result.intact);
    }

    // ── Anchored chains ───────────────────────────────────────────────────────

    /// A rotated file anchored at its predecessor's tail verifies only with
    /// that anchor.
    #[test]
    fn test_anchored_file_continues_chain() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("memory-0001.jsonl");
        let last = write_n(&old, 3).pop().unwrap();

        let anchor = ChainAnchor::after(&last).unwrap();
        let rotated = dir.path().join("memory-0002.jsonl");
        let mut config = AuditConfig::new(&rotated);
        config.anchor = Some(anchor.clone());

        let writer =
            FileAuditWriter::open(&config, key(), Arc::new(PiiRedactor::new().unwrap())).unwrap();
        let first = writer.append(&action("route_task", "bot-3")).unwrap();
        assert_eq!(first.sequence, 3);
        assert_eq!(first.prev_hash, last.entry_hash);

        assert!(ChainVerifier::from_config(&config, key()).verify().unwrap().intact);

        let unanchored = ChainVerifier::new(&rotated, key()).verify().unwrap();
        assert_eq!(unanchored.first_divergence.unwrap().status, EntryStatus::LinkBroken);
    }

    // ── tail ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_tail_returns_most_recent_entries() {
        let dir = TempDir::new().unwrap();
        let path = store(&dir);
        write_n(&path, 6);

        let recent = tail(&path, 4).unwrap();
        let sequences: Vec<u64> = recent.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![2, 3, 4, 5]);

        assert_eq!(tail(&path, 10).unwrap().len(), 6);
        assert!(tail(&path, 0).unwrap().is_empty());
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    #[test]
    fn test_config_from_toml() {
        let toml = format!(
            r#"
            store_path = "/var/lib/prism/memory.jsonl"
            signing_key_env = "PRISM_TEST_KEY_FROM_TOML"

            [anchor]
            prev_hash = "{}"
            sequence = 120
        "#,
            "ab".repeat(32)
        );

        let config = AuditConfig::from_toml_str(&toml).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/var/lib/prism/memory.jsonl"));
        assert_eq!(config.anchor().sequence, 120);
    }

    #[test]
    fn test_config_defaults() {
        let config = AuditConfig::from_toml_str("").unwrap();
        assert_eq!(config.store_path, PathBuf::from("memory.jsonl"));
        assert_eq!(config.signing_key_env, "PRISM_SIGNING_KEY");
        assert_eq!(config.anchor(), ChainAnchor::genesis());
    }

    #[test]
    fn test_config_rejects_bad_anchor() {
        let toml = r#"
            [anchor]
            prev_hash = "not-a-hash"
            sequence = 1
        "#;
        assert!(matches!(
            AuditConfig::from_toml_str(toml),
            Err(PrismError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_signing_key_resolution() {
        let mut config = AuditConfig::new("memory.jsonl");
        config.signing_key_env = "PRISM_TEST_KEY_NEVER_SET".to_string();

        assert!(matches!(
            config.resolve_signing_key(),
            Err(PrismError::ConfigError { .. })
        ));

        config.signing_key = Some("inline-key".to_string());
        assert!(config.resolve_signing_key().is_ok());

        config.signing_key = Some(String::new());
        assert!(config.resolve_signing_key().is_err());
    }

    /// A key variable holding non-UTF-8 bytes is an error, not "unset".
    #[cfg(unix)]
    #[test]
    fn test_signing_key_env_not_unicode() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let mut config = AuditConfig::new("memory.jsonl");
        config.signing_key_env = "PRISM_TEST_KEY_NOT_UNICODE".to_string();
        config.signing_key = Some("inline-key".to_string());
        std::env::set_var(&config.signing_key_env, OsString::from_vec(vec![0xff, 0xfe, 0x41]));

        let err = config.resolve_signing_key().err().unwrap();
        assert!(matches!(err, PrismError::ConfigError { .. }));
        assert!(err.to_string().contains("PRISM_TEST_KEY_NOT_UNICODE"));
    }

    #[test]
    fn test_signing_key_debug_is_redacted() {
        let rendered = format!("{:?}", SigningKey::new("super-secret").unwrap());
        assert!(!rendered.contains("super-secret"));
    }
}
