//! # prism-contracts
//!
//! Shared types and error contracts for the PRISM audit log.
//!
//! All crates in the workspace import from here.  No business logic lives in
//! this crate, only data definitions and error types.

pub mod entry;
pub mod error;
pub mod payload;
pub mod verification;
