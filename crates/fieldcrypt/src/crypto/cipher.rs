//! AES-256-GCM encryption and decryption of individual string fields.
//!
//! Every call generates a fresh random 96-bit nonce via the OS CSPRNG, so
//! encrypting the same plaintext twice produces different envelopes.
//! Ciphertext equality is therefore meaningless; lookups over encrypted
//! columns must decrypt and compare (see [`FieldCipher::matches_plaintext`]).
//!
//! **Do NOT reuse a nonce.** GCM nonce reuse is catastrophic: it breaks both
//! confidentiality and authentication. Nonces here come from `OsRng` on every
//! encryption and are stored alongside the ciphertext.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};

use crate::config::Config;
use crate::crypto::envelope::{Envelope, NONCE_LEN, TAG_LEN};
use crate::error::CryptoError;
use crate::key::{derive_key, KeyBytes};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Field cipher bound to one resolved key.
///
/// Built once at startup, usually via [`FieldCipher::from_config`], and shared
/// by reference. All operations take `&self`; the type is `Send + Sync` and
/// holds no interior mutability.
#[derive(Clone, Debug)]
pub struct FieldCipher {
    key: KeyBytes,
    emit_versioned: bool,
}

impl FieldCipher {
    /// Build a cipher around already-resolved key bytes.
    ///
    /// New envelopes are emitted in the legacy three-field form; use
    /// [`FieldCipher::from_config`] to honour the versioned-emission setting.
    pub fn new(key: KeyBytes) -> Self {
        Self {
            key,
            emit_versioned: false,
        }
    }

    /// Resolve the key from `cfg` and build the cipher.
    ///
    /// # Errors
    ///
    /// Returns any key resolution error from [`derive_key`].
    pub fn from_config(cfg: &Config) -> Result<Self, CryptoError> {
        Ok(Self {
            key: derive_key(cfg)?,
            emit_versioned: cfg.emit_versioned_envelopes,
        })
    }

    /// Encrypt a sensitive field for storage.
    ///
    /// `None` and `""` pass through as `None`: absent values stay absent in
    /// storage instead of becoming envelopes of nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EncryptionFailure`] on an internal AEAD error
    /// (should be unreachable with a valid key and nonce).
    pub fn encrypt_sensitive(
        &self,
        plaintext: Option<&str>,
    ) -> Result<Option<String>, CryptoError> {
        let plaintext = match plaintext {
            Some(p) if !p.is_empty() => p,
            _ => return Ok(None),
        };
        let envelope = self.encrypt_field(plaintext)?;
        Ok(Some(if self.emit_versioned {
            envelope.to_versioned_repr()
        } else {
            envelope.to_string_repr()
        }))
    }

    /// Decrypt a stored field value.
    ///
    /// `None` and `""` pass through as `None`, mirroring
    /// [`FieldCipher::encrypt_sensitive`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Envelope`] if `stored` does not parse as an
    /// envelope, [`CryptoError::DecryptionFailure`] if authentication fails
    /// (wrong key or tampered data), and [`CryptoError::InvalidPlaintext`] if
    /// the decrypted bytes are not UTF-8.
    pub fn decrypt_sensitive(&self, stored: Option<&str>) -> Result<Option<String>, CryptoError> {
        let stored = match stored {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(None),
        };
        let envelope = Envelope::parse(stored)?;
        Ok(Some(self.decrypt_field(&envelope)?))
    }

    /// Encrypt one plaintext string into an [`Envelope`].
    pub fn encrypt_field(&self, plaintext: &str) -> Result<Envelope, CryptoError> {
        let cipher = self.build_cipher();

        // Use OsRng for a cryptographically secure random nonce.
        use aes_gcm::aead::rand_core::RngCore;
        let mut iv = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut iv);
        let nonce = Nonce::from_slice(&iv);

        let mut sealed = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptionFailure)?;

        // The aead crate appends the 16-byte tag to the ciphertext; the
        // envelope stores it as a separate field.
        let tag_split = sealed.len() - TAG_LEN;
        let tag_bytes = sealed.split_off(tag_split);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&tag_bytes);

        Ok(Envelope {
            iv,
            tag,
            ciphertext: sealed,
        })
    }

    /// Decrypt an [`Envelope`] back to its plaintext string.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::DecryptionFailure`] if authentication fails and
    /// [`CryptoError::InvalidPlaintext`] if the result is not UTF-8.
    pub fn decrypt_field(&self, envelope: &Envelope) -> Result<String, CryptoError> {
        let cipher = self.build_cipher();
        let nonce = Nonce::from_slice(&envelope.iv);

        // Reattach the tag in the layout the aead crate expects.
        let mut sealed = Vec::with_capacity(envelope.ciphertext.len() + TAG_LEN);
        sealed.extend_from_slice(&envelope.ciphertext);
        sealed.extend_from_slice(&envelope.tag);

        let plaintext = cipher
            .decrypt(nonce, sealed.as_ref())
            .map_err(|_| CryptoError::DecryptionFailure)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidPlaintext)
    }

    fn build_cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.key.as_bytes()))
    }
}
