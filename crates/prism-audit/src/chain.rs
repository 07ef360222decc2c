//! Hash-chain primitives: hashing, signing and signature verification.
//!
//! Every field that contributes to an entry's hash is listed explicitly so
//! nothing is accidentally omitted.
//!
//! Hash input layout (bytes, in order):
//!   1. sequence as 8-byte little-endian
//!   2. timestamp as RFC 3339 UTC with nanoseconds (`...T12:00:00.000000000Z`)
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. canonical JSON of payload (sorted keys, no whitespace)
//!
//! The signature is HMAC-SHA256 over the 64 ASCII hex chars of `entry_hash`,
//! base64-encoded with the standard alphabet.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::Mac;
use sha2::{Digest, Sha256};

use prism_contracts::{entry::LogEntry, payload::Payload};

use crate::key::SigningKey;

/// Compute the SHA-256 hash for a log entry's content.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_entry(
    sequence: u64,
    timestamp: &DateTime<Utc>,
    prev_hash: &str,
    payload: &Payload,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(payload.canonical_json());

    hex::encode(hasher.finalize())
}

/// Recompute the hash of a stored entry from its own fields.
pub fn recompute_hash(entry: &LogEntry) -> String {
    hash_entry(entry.sequence, &entry.timestamp, &entry.prev_hash, &entry.payload)
}

/// Sign `entry_hash` with `key`.
pub fn sign(key: &SigningKey, entry_hash: &str) -> String {
    let mut mac = key.mac();
    mac.update(entry_hash.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Check `signature` against `entry_hash` in constant time.
///
/// Returns `false` for signatures that are not valid base64.
pub fn verify_signature(key: &SigningKey, entry_hash: &str, signature: &str) -> bool {
    let Ok(raw) = STANDARD.decode(signature) else {
        return false;
    };
    let mut mac = key.mac();
    mac.update(entry_hash.as_bytes());
    mac.verify_slice(&raw).is_ok()
}
