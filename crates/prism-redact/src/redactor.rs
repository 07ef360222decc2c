//! The PII redactor used in front of the audit log.
//!
//! `PiiRedactor` implements the `Redactor` trait from prism-core.  It has two
//! jobs:
//!
//! 1. **Redact** — walk a payload and replace every email address and phone
//!    number in text values with a deterministic token.
//! 2. **Check** — walk a payload (keys and values) and report the JSON path
//!    of the first raw PII match.  The audit writer runs this as its append
//!    guard.  The matched text itself is never reported.

use std::collections::BTreeMap;

use tracing::debug;

use prism_contracts::{
    error::{PrismError, PrismResult},
    payload::{Payload, PayloadValue},
};
use prism_core::traits::Redactor;

use crate::patterns::{tokenise, PiiKind, PiiPatterns};

/// Counts of replacements made by a redaction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedactionStats {
    pub emails: usize,
    pub phones: usize,
}

impl RedactionStats {
    fn add(&mut self, kind: PiiKind, count: usize) {
        match kind {
            PiiKind::Email => self.emails += count,
            PiiKind::Phone => self.phones += count,
        }
    }

    pub fn total(&self) -> usize {
        self.emails + self.phones
    }
}

/// Where raw PII was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionFinding {
    /// JSON path of the key or value, e.g. `$.task.owner` or `$.tags[1]`.
    pub path: String,
    pub kind: PiiKind,
}

impl From<RedactionFinding> for PrismError {
    fn from(finding: RedactionFinding) -> Self {
        PrismError::RedactionViolation {
            path: finding.path,
            kind: finding.kind.to_string(),
        }
    }
}

/// Regex-based email and phone number redactor.
pub struct PiiRedactor {
    patterns: PiiPatterns,
}

impl PiiRedactor {
    /// Compile the built-in patterns.
    ///
    /// Returns `PrismError::ConfigError` if a pattern fails to compile.
    pub fn new() -> PrismResult<Self> {
        Ok(Self {
            patterns: PiiPatterns::compile()?,
        })
    }

    /// Replace every PII match in `text` with its token.
    pub fn redact_text(&self, text: &str) -> (String, RedactionStats) {
        let mut stats = RedactionStats::default();
        let mut out = text.to_string();

        for (kind, re) in &self.patterns.ordered {
            let count = re.find_iter(&out).count();
            if count == 0 {
                continue;
            }
            stats.add(*kind, count);
            out = re
                .replace_all(&out, |caps: &regex::Captures<'_>| tokenise(&caps[0], *kind))
                .into_owned();
        }

        (out, stats)
    }

    /// Redact a payload, returning the scrubbed copy and replacement counts.
    ///
    /// Keys are left untouched; `find_violation` still reports PII in a key.
    pub fn redact_with_stats(&self, payload: &Payload) -> (Payload, RedactionStats) {
        let mut stats = RedactionStats::default();
        let redacted = payload
            .iter()
            .map(|(key, value)| (key.clone(), self.redact_value(value, &mut stats)))
            .collect();
        (redacted, stats)
    }

    fn redact_value(&self, value: &PayloadValue, stats: &mut RedactionStats) -> PayloadValue {
        match value {
            PayloadValue::Text(text) => {
                let (redacted, found) = self.redact_text(text);
                stats.emails += found.emails;
                stats.phones += found.phones;
                PayloadValue::Text(redacted)
            }
            PayloadValue::List(items) => PayloadValue::List(
                items.iter().map(|item| self.redact_value(item, stats)).collect(),
            ),
            PayloadValue::Map(map) => PayloadValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.redact_value(v, stats)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// The first raw PII match in `payload`, if any.
    pub fn find_violation(&self, payload: &Payload) -> Option<RedactionFinding> {
        payload
            .iter()
            .find_map(|(key, value)| self.scan_entry("$", key, value))
    }

    fn scan_entry(&self, parent: &str, key: &str, value: &PayloadValue) -> Option<RedactionFinding> {
        let path = format!("{}.{}", parent, key);
        if let Some(kind) = self.patterns.detect(key) {
            return Some(RedactionFinding { path, kind });
        }
        self.scan_value(path, value)
    }

    fn scan_value(&self, path: String, value: &PayloadValue) -> Option<RedactionFinding> {
        match value {
            PayloadValue::Text(text) => self
                .patterns
                .detect(text)
                .map(|kind| RedactionFinding { path, kind }),
            PayloadValue::List(items) => items
                .iter()
                .enumerate()
                .find_map(|(i, item)| self.scan_value(format!("{}[{}]", path, i), item)),
            PayloadValue::Map(map) => self.scan_map(&path, map),
            _ => None,
        }
    }

    fn scan_map(
        &self,
        path: &str,
        map: &BTreeMap<String, PayloadValue>,
    ) -> Option<RedactionFinding> {
        map.iter().find_map(|(k, v)| self.scan_entry(path, k, v))
    }
}

impl Redactor for PiiRedactor {
    fn redact(&self, payload: &Payload) -> PrismResult<Payload> {
        let (redacted, stats) = self.redact_with_stats(payload);
        if stats.total() > 0 {
            debug!(emails = stats.emails, phones = stats.phones, "payload redacted");
        }
        Ok(redacted)
    }

    fn check(&self, payload: &Payload) -> PrismResult<()> {
        match self.find_violation(payload) {
            Some(finding) => Err(finding.into()),
            None => Ok(()),
        }
    }
}
