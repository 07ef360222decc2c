//! The process-wide HMAC signing key.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use prism_contracts::error::{PrismError, PrismResult};

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// Secret key used to sign every entry's hash.
///
/// Loaded once at startup (see `AuditConfig::resolve_signing_key`) and passed
/// explicitly to the writer and verifier.  `Debug` never prints the key.
#[derive(Clone)]
pub struct SigningKey {
    mac: HmacSha256,
}

impl SigningKey {
    /// Build a key from raw bytes.
    ///
    /// Returns `PrismError::ConfigError` for an empty key.
    pub fn new(secret: impl AsRef<[u8]>) -> PrismResult<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(PrismError::ConfigError {
                reason: "signing key must not be empty".to_string(),
            });
        }
        let mac = <HmacSha256 as Mac>::new_from_slice(secret).map_err(|e| {
            PrismError::ConfigError {
                reason: format!("invalid signing key: {}", e),
            }
        })?;
        Ok(Self { mac })
    }

    /// A fresh MAC keyed with this secret.
    pub(crate) fn mac(&self) -> HmacSha256 {
        self.mac.clone()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}
