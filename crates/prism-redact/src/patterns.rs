//! PII patterns and deterministic tokens.

use std::fmt;

use regex::Regex;
use sha2::{Digest, Sha256};

use prism_contracts::error::{PrismError, PrismResult};

pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
pub const PHONE_PATTERN: &str = r"\+?[0-9][0-9\-]{8,}[0-9]";

/// The kinds of PII the redactor recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiiKind {
    Email,
    Phone,
}

impl PiiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiKind::Email => "email",
            PiiKind::Phone => "phone",
        }
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled patterns, applied in order: emails before phone numbers, so the
/// digits of an email's local part are never mistaken for a phone number.
pub(crate) struct PiiPatterns {
    pub(crate) ordered: Vec<(PiiKind, Regex)>,
}

impl PiiPatterns {
    pub(crate) fn compile() -> PrismResult<Self> {
        let build = |kind: PiiKind, pattern: &str| {
            Regex::new(pattern)
                .map(|re| (kind, re))
                .map_err(|e| PrismError::ConfigError {
                    reason: format!("invalid {} pattern: {}", kind, e),
                })
        };
        Ok(Self {
            ordered: vec![
                build(PiiKind::Email, EMAIL_PATTERN)?,
                build(PiiKind::Phone, PHONE_PATTERN)?,
            ],
        })
    }

    /// The first kind of PII found in `text`, if any.
    pub(crate) fn detect(&self, text: &str) -> Option<PiiKind> {
        self.ordered
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(kind, _)| *kind)
    }
}

/// Replace `value` with `{{REDACTED:<kind>:<8 hex>}}`.
///
/// The digest is the first 8 hex characters of SHA-256 over the raw value, so
/// the same address always maps to the same token and can still be
/// correlated across entries.
pub fn tokenise(value: &str, kind: PiiKind) -> String {
    let digest = hex::encode(Sha256::digest(value.as_bytes()));
    format!("{{{{REDACTED:{}:{}}}}}", kind, &digest[..8])
}
