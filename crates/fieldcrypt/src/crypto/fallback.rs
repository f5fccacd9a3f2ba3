//! Compatibility layer for reading columns that predate encryption.
//!
//! Encrypted-at-rest columns hold three generations of stored values:
//! plaintext rows written before encryption shipped, legacy `iv:tag:ct`
//! envelopes, and `v1:`-prefixed envelopes. [`FieldCipher::reveal`] classifies
//! a stored value by parsing it structurally and reports what happened
//! instead of guessing silently.
//!
//! A plaintext row can in principle collide with the envelope shape (three
//! hex fields of the right widths). Such a row reports as
//! [`DecryptOutcome::Failed`]; the `v1:` prefix exists so new writes can
//! escape the ambiguity entirely.

use tracing::warn;

use crate::crypto::cipher::FieldCipher;
use crate::crypto::envelope::Envelope;
use crate::error::CryptoError;

/// Outcome of revealing a stored value that may or may not be encrypted.
#[derive(Debug)]
pub enum DecryptOutcome {
    /// The value was a valid envelope and decrypted cleanly.
    Decrypted(String),
    /// The value is not an envelope: a plaintext row from before encryption
    /// was introduced, returned verbatim.
    FallbackPlaintext(String),
    /// The value parses as an envelope but failed to decrypt. Wrong key,
    /// tampered row, or a plaintext row that happens to match the envelope
    /// shape.
    Failed(CryptoError),
}

impl DecryptOutcome {
    /// The revealed text, when there is one.
    pub fn text(&self) -> Option<&str> {
        match self {
            DecryptOutcome::Decrypted(text) | DecryptOutcome::FallbackPlaintext(text) => {
                Some(text)
            }
            DecryptOutcome::Failed(_) => None,
        }
    }

    /// `true` when the value actually decrypted, as opposed to passing
    /// through as legacy plaintext.
    pub fn is_decrypted(&self) -> bool {
        matches!(self, DecryptOutcome::Decrypted(_))
    }
}

impl FieldCipher {
    /// Reveal a stored value, classifying how it was read.
    ///
    /// Values that parse as envelopes are decrypted; a decryption failure is
    /// reported as [`DecryptOutcome::Failed`] and logged, never mistaken for
    /// plaintext. Everything else is treated as a row written before
    /// encryption was introduced.
    pub fn reveal(&self, stored: &str) -> DecryptOutcome {
        let envelope = match Envelope::parse(stored) {
            Ok(envelope) => envelope,
            Err(_) => return DecryptOutcome::FallbackPlaintext(stored.to_owned()),
        };
        match self.decrypt_field(&envelope) {
            Ok(text) => DecryptOutcome::Decrypted(text),
            Err(reason) => {
                warn!(error = %reason, "stored value parses as an envelope but failed decryption");
                DecryptOutcome::Failed(reason)
            }
        }
    }

    /// Reveal a stored value, collapsing failures to the raw stored string.
    ///
    /// Drop-in behaviour for call sites that must always render something: a
    /// value that fails decryption comes back exactly as stored. `None` and
    /// `""` pass through unchanged.
    pub fn reveal_lossy(&self, stored: Option<&str>) -> Option<String> {
        let stored = stored?;
        Some(match self.reveal(stored) {
            DecryptOutcome::Decrypted(text) | DecryptOutcome::FallbackPlaintext(text) => text,
            DecryptOutcome::Failed(_) => stored.to_owned(),
        })
    }

    /// `true` when `stored` reveals to exactly `plaintext`.
    ///
    /// Envelopes are non-deterministic, so duplicate checks against an
    /// encrypted column must compare revealed text, never ciphertext. Legacy
    /// plaintext rows compare directly; values that fail decryption match
    /// nothing.
    pub fn matches_plaintext(&self, stored: &str, plaintext: &str) -> bool {
        match self.reveal(stored) {
            DecryptOutcome::Decrypted(text) | DecryptOutcome::FallbackPlaintext(text) => {
                text == plaintext
            }
            DecryptOutcome::Failed(_) => false,
        }
    }
}
