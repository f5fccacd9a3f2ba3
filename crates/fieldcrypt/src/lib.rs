//! `fieldcrypt`: field-level encryption for secure-space records.
//!
//! Protects individual column values (vault secrets, note bodies, wallet
//! secrets, breach-monitor values) with AES-256-GCM before they reach the
//! database, and reads all three stored generations back out: pre-encryption
//! plaintext rows, legacy `iv:tag:ciphertext` envelopes, and `v1:`-prefixed
//! envelopes. Also carries the small crypto utilities the surrounding
//! application needs: SHA-256 hashing for verification values and random
//! token generation.
//!
//! Typical wiring:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Build a [`FieldCipher`] once via [`FieldCipher::from_config`]; key
//!    resolution happens there and nowhere else.
//! 3. Call [`FieldCipher::encrypt_sensitive`] on the way into storage and
//!    [`FieldCipher::decrypt_sensitive`] (strict) or [`FieldCipher::reveal`]
//!    (legacy-tolerant) on the way out.

pub mod config;
pub mod crypto;
pub mod error;
pub mod key;

pub use config::{Config, Environment};
pub use crypto::cipher::FieldCipher;
pub use crypto::envelope::{Envelope, EnvelopeError};
pub use crypto::fallback::DecryptOutcome;
pub use crypto::hash::hash_data;
pub use crypto::token::{generate_secure_token, DEFAULT_TOKEN_LEN};
pub use crypto::KEY_LEN;
pub use error::CryptoError;
pub use key::{derive_key, KeyBytes};
