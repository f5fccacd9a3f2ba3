//! Key resolution: explicit key override or derivation from the application
//! secret.
//!
//! # Resolution order
//!
//! 1. An explicit key (`ENCRYPTION_KEY`, 64 hex characters) is used as the
//!    AES-256 key directly.
//! 2. Otherwise the key is derived from the application secret (`APP_SECRET`)
//!    with scrypt under a fixed salt, so every process sharing the secret
//!    resolves the same key.
//! 3. With neither configured, development mode falls back to a built-in
//!    secret and logs a warning; production refuses to start.
//!
//! # Security invariants
//!
//! - Key material is never logged or included in error messages.
//! - Resolution is deterministic: a restart with the same configuration can
//!   decrypt every envelope written before it.

pub mod material;

pub use material::KeyBytes;

use tracing::warn;

use crate::config::Config;
use crate::crypto::KEY_LEN;
use crate::error::CryptoError;

/// Salt for scrypt derivation. Fixed so that the same secret always resolves
/// the same key, across processes and restarts.
const KDF_SALT: &[u8] = b"fieldcrypt/key-derivation/v1";

/// Secret used when none is configured outside production.
pub(crate) const DEV_SECRET: &str = "devsecret";

// scrypt cost profile: interactive-login strength, matching the parameters
// existing envelopes were provisioned under.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Resolve the field encryption key from configuration.
///
/// # Errors
///
/// Returns [`CryptoError::MalformedExplicitKey`] or
/// [`CryptoError::InvalidKeyLength`] if an explicit key is set but malformed,
/// [`CryptoError::MissingSecret`] if production has no key material at all,
/// and [`CryptoError::KeyDerivation`] if scrypt itself fails.
pub fn derive_key(cfg: &Config) -> Result<KeyBytes, CryptoError> {
    if let Some(explicit) = cfg.explicit_key() {
        return explicit_key(explicit);
    }

    let secret = cfg.app_secret.trim();
    if !secret.is_empty() {
        return derive_from_secret(secret);
    }

    if cfg.environment.is_production() {
        return Err(CryptoError::MissingSecret);
    }

    warn!("APP_SECRET is not set; deriving the field key from a built-in development secret");
    derive_from_secret(DEV_SECRET)
}

fn explicit_key(hex_key: &str) -> Result<KeyBytes, CryptoError> {
    let bytes = hex::decode(hex_key).map_err(|_| CryptoError::MalformedExplicitKey)?;
    KeyBytes::from_slice(&bytes)
}

fn derive_from_secret(secret: &str) -> Result<KeyBytes, CryptoError> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    let mut out = [0u8; KEY_LEN];
    scrypt::scrypt(secret.as_bytes(), KDF_SALT, &params, &mut out)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(KeyBytes::new(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn dev_config(secret: &str) -> Config {
        Config {
            app_secret: secret.into(),
            encryption_key: None,
            environment: Environment::Development,
            emit_versioned_envelopes: false,
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_from_secret("correct horse battery staple").unwrap();
        let b = derive_from_secret("correct horse battery staple").unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_secrets_resolve_different_keys() {
        let a = derive_from_secret("secret-one").unwrap();
        let b = derive_from_secret("secret-two").unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn explicit_key_is_used_verbatim() {
        let expected: Vec<u8> = (0u8..KEY_LEN as u8).collect();
        let mut cfg = dev_config("ignored when explicit key is set");
        cfg.encryption_key = Some(hex::encode(&expected));
        let key = derive_key(&cfg).unwrap();
        assert_eq!(&key.as_bytes()[..], expected.as_slice());
    }

    #[test]
    fn malformed_explicit_key_is_fatal() {
        let mut cfg = dev_config("secret");
        cfg.encryption_key = Some("zz".repeat(KEY_LEN));
        assert!(matches!(
            derive_key(&cfg),
            Err(CryptoError::MalformedExplicitKey)
        ));

        cfg.encryption_key = Some("abcd".into());
        assert!(matches!(
            derive_key(&cfg),
            Err(CryptoError::InvalidKeyLength(2))
        ));
    }

    #[test]
    fn production_without_key_material_is_refused() {
        let cfg = Config {
            app_secret: "   ".into(),
            encryption_key: None,
            environment: Environment::Production,
            emit_versioned_envelopes: false,
        };
        assert!(matches!(derive_key(&cfg), Err(CryptoError::MissingSecret)));
    }

    #[test]
    fn development_falls_back_to_dev_secret() {
        let key = derive_key(&dev_config("")).unwrap();
        let expected = derive_from_secret(DEV_SECRET).unwrap();
        assert_eq!(key.as_bytes(), expected.as_bytes());
    }
}
