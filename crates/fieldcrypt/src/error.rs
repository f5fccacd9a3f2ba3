//! Error types for the field encryption layer.

use thiserror::Error;

use crate::crypto::envelope::EnvelopeError;
use crate::crypto::KEY_LEN;

/// Errors produced by key resolution and field encryption.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key material has the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The explicit encryption key is set but is not valid hex.
    #[error("explicit encryption key is not valid hex")]
    MalformedExplicitKey,

    /// Neither an application secret nor an explicit key is configured.
    #[error("no application secret or explicit encryption key configured")]
    MissingSecret,

    /// Deriving the key from the application secret failed.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// AEAD encryption failed.
    #[error("field encryption failed")]
    EncryptionFailure,

    /// AEAD authentication failed: wrong key, tampered data, or corruption.
    #[error("field decryption failed: authentication error")]
    DecryptionFailure,

    /// Decryption succeeded but the plaintext is not valid UTF-8.
    #[error("decrypted field is not valid UTF-8")]
    InvalidPlaintext,

    /// The stored string does not match the envelope format.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        let e = CryptoError::InvalidKeyLength(16);
        assert!(e.to_string().contains("expected 32 bytes"));
        assert!(e.to_string().contains("got 16"));
        assert!(CryptoError::DecryptionFailure
            .to_string()
            .contains("decryption failed"));
    }

    #[test]
    fn envelope_errors_convert() {
        let e: CryptoError = EnvelopeError::FieldCount(2).into();
        assert!(matches!(e, CryptoError::Envelope(_)));
    }
}
