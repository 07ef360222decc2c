//! # prism-redact
//!
//! Deterministic PII tokenisation for PRISM audit payloads.
//!
//! Email addresses and phone numbers are replaced by
//! `{{REDACTED:<kind>:<digest>}}` tokens before anything reaches the audit
//! log.  The same redactor doubles as the audit writer's append guard, which
//! refuses any payload that still matches a PII pattern.
//!
//! ```rust,ignore
//! use prism_core::traits::Redactor;
//! use prism_redact::PiiRedactor;
//!
//! let redactor = PiiRedactor::new()?;
//! let clean = redactor.redact(&payload)?;
//! redactor.check(&clean)?;
//! ```

pub mod patterns;
pub mod redactor;

pub use patterns::{tokenise, PiiKind};
pub use redactor::{PiiRedactor, RedactionFinding, RedactionStats};

// ── Tests ─────────────────────────────────────────────────────────────────────
