//! Configuration loading and validation for the encryption layer.
//!
//! All values are read from environment variables at startup. The process
//! will exit with a clear error message if key material is missing where it
//! is required or an explicit key is malformed.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::crypto::KEY_LEN;

/// Deployment environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `true` when running in production.
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Validated configuration for the encryption layer.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-wide secret the field encryption key is derived from.
    /// Required in production unless `ENCRYPTION_KEY` is set.
    #[serde(default)]
    pub app_secret: String,

    /// Explicit AES-256 key as 64 hex characters. When set, it overrides
    /// derivation from `APP_SECRET`.
    pub encryption_key: Option<String>,

    /// Deployment environment (`development` or `production`).
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Emit new envelopes with the `v1:` version prefix. Parsing accepts
    /// both forms regardless.
    #[serde(default = "default_emit_versioned_envelopes")]
    pub emit_versioned_envelopes: bool,
}

fn default_environment() -> Environment {
    Environment::Development
}
fn default_emit_versioned_envelopes() -> bool {
    false
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or validation fails.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The explicit key, if one is configured and non-empty.
    pub fn explicit_key(&self) -> Option<&str> {
        self.encryption_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if let Some(key) = self.explicit_key() {
            let decoded = hex::decode(key)
                .map_err(|_| anyhow::anyhow!("ENCRYPTION_KEY must be hex-encoded"))?;
            if decoded.len() != KEY_LEN {
                anyhow::bail!(
                    "ENCRYPTION_KEY must encode exactly {KEY_LEN} bytes, got {}",
                    decoded.len()
                );
            }
        }

        if self.environment.is_production()
            && self.app_secret.trim().is_empty()
            && self.explicit_key().is_none()
        {
            anyhow::bail!("APP_SECRET or ENCRYPTION_KEY is required in production");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            app_secret: "test-secret".into(),
            encryption_key: None,
            environment: default_environment(),
            emit_versioned_envelopes: default_emit_versioned_envelopes(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_environment(), Environment::Development);
        assert!(!default_emit_versioned_envelopes());
    }

    #[test]
    fn production_flag() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Development.is_production());
    }

    #[test]
    fn validate_accepts_development_without_secret() {
        let cfg = Config {
            app_secret: "".into(),
            ..base_config()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_production_without_key_material() {
        let cfg = Config {
            app_secret: "   ".into(),
            environment: Environment::Production,
            ..base_config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_production_with_secret() {
        let cfg = Config {
            environment: Environment::Production,
            ..base_config()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_accepts_production_with_explicit_key() {
        let cfg = Config {
            app_secret: "".into(),
            encryption_key: Some("ab".repeat(KEY_LEN)),
            environment: Environment::Production,
            ..base_config()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_hex_explicit_key() {
        let cfg = Config {
            encryption_key: Some("zz".repeat(KEY_LEN)),
            ..base_config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_wrong_length_explicit_key() {
        let cfg = Config {
            encryption_key: Some("abcd".into()),
            ..base_config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blank_explicit_key_means_unset() {
        let cfg = Config {
            encryption_key: Some("   ".into()),
            ..base_config()
        };
        assert!(cfg.explicit_key().is_none());
        assert!(cfg.validate().is_ok());
    }
}
