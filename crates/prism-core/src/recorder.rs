//! Log-then-commit recording of orchestrator actions.
//!
//! The recorder enforces one ordering rule:
//!
//!   Action → Redact → Append → Commit
//!
//! An action's result is only handed back to the caller after its audit entry
//! has been durably appended.  If the append fails, the action is reported as
//! failed even though it ran.  There is no retry here; a caller that retries
//! goes through `perform()` again, so the next entry links to whatever the
//! chain head is at that point.

use std::fmt::Display;

use tracing::{debug, warn};

use prism_contracts::{
    entry::LogEntry,
    error::{PrismError, PrismResult},
    payload::Payload,
};

use crate::traits::{AuditSink, Redactor};

/// What is being done, and by whom.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: String,
    pub actor: String,
    pub task: Option<String>,
}

impl ActionDescriptor {
    pub fn new(action: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            actor: actor.into(),
            task: None,
        }
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    fn payload(&self, outcome: &str) -> Payload {
        Payload::new()
            .with("action", self.action.as_str())
            .with("actor", self.actor.as_str())
            .with("task", self.task.clone())
            .with("outcome", outcome)
    }
}

/// Runs actions and records each one in the audit sink before committing.
pub struct ActionRecorder<'a> {
    sink: &'a dyn AuditSink,
    redactor: &'a dyn Redactor,
}

impl<'a> ActionRecorder<'a> {
    pub fn new(sink: &'a dyn AuditSink, redactor: &'a dyn Redactor) -> Self {
        Self { sink, redactor }
    }

    /// Run `action` and record its outcome.
    ///
    /// # Errors
    ///
    /// - The sink's error (`StorageError`, `RedactionViolation`) if the audit
    ///   entry could not be written, whatever the action returned.
    /// - `ActionFailed` if the action failed and its failure was recorded.
    pub fn perform<T, E, F>(&self, descriptor: &ActionDescriptor, action: F) -> PrismResult<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Display,
    {
        debug!(
            action = %descriptor.action,
            actor = %descriptor.actor,
            "performing audited action"
        );

        match action() {
            Ok(value) => {
                self.record(descriptor.payload("success"))?;
                Ok(value)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(
                    action = %descriptor.action,
                    actor = %descriptor.actor,
                    "audited action failed"
                );
                self.record(descriptor.payload("failure").with("error", reason.as_str()))?;
                Err(PrismError::ActionFailed { reason })
            }
        }
    }

    /// Redact `payload` and append it.  Exposed for actions that carry extra
    /// fields beyond `ActionDescriptor`.
    pub fn record(&self, payload: Payload) -> PrismResult<LogEntry> {
        let redacted = self.redactor.redact(&payload)?;
        self.sink.append(&redacted).map_err(|e| {
            warn!(error = %e, "audit append failed; action is not committed");
            e
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
