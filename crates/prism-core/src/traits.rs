//! Trait seams between the orchestrator and the audit log.
//!
//! - `AuditSink` — trusted append-only store (the signed, chained log)
//! - `Redactor`  — trusted scrubber that tokenises PII before persistence
//!
//! The orchestrator only ever sees these traits; the concrete JSONL writer and
//! PII redactor live in `prism-audit` and `prism-redact`.

use prism_contracts::{entry::LogEntry, error::PrismResult, payload::Payload};

/// An append-only audit store.
///
/// Implementations must serialize appends: `prev_hash` depends on the last
/// committed entry, so two unsynchronized appends would fork the chain.
pub trait AuditSink: Send + Sync {
    /// Append one redacted payload and return the committed entry.
    ///
    /// The entry must be durable before this returns.  An `Err` means nothing
    /// is guaranteed written and the triggering action is not complete.
    fn append(&self, payload: &Payload) -> PrismResult<LogEntry>;
}

/// Removes or detects raw PII in payloads.
pub trait Redactor: Send + Sync {
    /// Return a copy of `payload` with every detectable PII value replaced by
    /// a deterministic token.
    ///
    /// Only values are rewritten.  Map keys are kept as given, so a key that
    /// itself holds PII still fails `check`; keys are the caller's to keep
    /// clean.
    fn redact(&self, payload: &Payload) -> PrismResult<Payload>;

    /// Return `Err(PrismError::RedactionViolation)` if `payload` still
    /// contains a detectable PII pattern.
    fn check(&self, payload: &Payload) -> PrismResult<()>;
}
