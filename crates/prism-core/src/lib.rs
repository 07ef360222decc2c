//! # prism-core
//!
//! Audit seams for the PRISM orchestrator.
//!
//! This crate provides:
//! - The two trait seams (`AuditSink`, `Redactor`)
//! - The `ActionRecorder`, which runs an orchestrator action and refuses to
//!   report it complete unless its audit entry was durably written
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prism_core::{ActionRecorder, recorder::ActionDescriptor};
//!
//! let recorder = ActionRecorder::new(&writer, &redactor);
//! let routed = recorder.perform(
//!     &ActionDescriptor::new("route_task", "bot-1").with_task("task-42"),
//!     || registry.route("task-42"),
//! )?;
//! ```

pub mod recorder;
pub mod traits;

pub use recorder::{ActionDescriptor, ActionRecorder};
