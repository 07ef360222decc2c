//! Audit log configuration.
//!
//! `AuditConfig` is deserialized from TOML and names the store file, where
//! to find the signing key and, for a rotated file, the anchor the chain
//! continues from.
//!
//! ```toml
//! store_path = "memory.jsonl"
//! signing_key_env = "PRISM_SIGNING_KEY"
//!
//! [anchor]
//! prev_hash = "9f2c…"   # 64 hex chars
//! sequence = 120
//! ```

use std::env::VarError;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use prism_contracts::{
    entry::ChainAnchor,
    error::{PrismError, PrismResult},
};

use crate::key::SigningKey;

/// Environment variable consulted for the signing key by default.
pub const DEFAULT_KEY_ENV: &str = "PRISM_SIGNING_KEY";

/// Store file used when none is configured.
pub const DEFAULT_STORE_PATH: &str = "memory.jsonl";

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_key_env() -> String {
    DEFAULT_KEY_ENV.to_string()
}

/// Process-wide audit log configuration, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Path of the JSONL store.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Name of the environment variable holding the signing key.
    #[serde(default = "default_key_env")]
    pub signing_key_env: String,

    /// Inline signing key, used only when the environment variable is unset.
    /// Prefer the environment: config files tend to end up in version control.
    #[serde(default)]
    pub signing_key: Option<String>,

    /// Starting point of the chain in this file.  Genesis when absent.
    #[serde(default)]
    pub anchor: Option<ChainAnchor>,
}

impl AuditConfig {
    /// A configuration for `store_path` with every other field defaulted.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            signing_key_env: default_key_env(),
            signing_key: None,
            anchor: None,
        }
    }

    /// Parse `s` as TOML.
    ///
    /// Returns `PrismError::ConfigError` if the TOML is malformed or the
    /// anchor hash is not 64 lowercase hex characters.
    pub fn from_toml_str(s: &str) -> PrismResult<Self> {
        let config: AuditConfig = toml::from_str(s).map_err(|e| PrismError::ConfigError {
            reason: format!("failed to parse audit config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse the TOML file at `path`.
    pub fn from_file(path: &Path) -> PrismResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PrismError::ConfigError {
            reason: format!("failed to read audit config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The configured anchor, or genesis.
    pub fn anchor(&self) -> ChainAnchor {
        self.anchor.clone().unwrap_or_default()
    }

    /// Load the signing key: the environment variable first, then the
    /// inline `signing_key`.
    ///
    /// There is no built-in fallback key.  Returns `PrismError::ConfigError`
    /// when neither source yields a non-empty key, or when the variable is set
    /// but not valid UTF-8.
    pub fn resolve_signing_key(&self) -> PrismResult<SigningKey> {
        let from_env = match std::env::var(&self.signing_key_env) {
            Ok(value) => Some(value).filter(|v| !v.is_empty()),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                return Err(PrismError::ConfigError {
                    reason: format!("{} is set but is not valid UTF-8", self.signing_key_env),
                })
            }
        };

        match from_env.or_else(|| self.signing_key.clone()) {
            Some(secret) => SigningKey::new(secret.as_bytes()),
            None => Err(PrismError::ConfigError {
                reason: format!(
                    "no signing key: set {} or `signing_key` in the audit config",
                    self.signing_key_env
                ),
            }),
        }
    }

    fn validate(&self) -> PrismResult<()> {
        if let Some(anchor) = &self.anchor {
            let well_formed = anchor.prev_hash.len() == 64
                && anchor
                    .prev_hash
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
            if !well_formed {
                return Err(PrismError::ConfigError {
                    reason: "anchor.prev_hash must be 64 lowercase hex characters".to_string(),
                });
            }
        }
        Ok(())
    }
}
