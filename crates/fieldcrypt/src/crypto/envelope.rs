//! Textual envelope format for encrypted field values.
//!
//! # Stored format
//!
//! ```text
//! <hex(iv)>:<hex(tag)>:<hex(ciphertext)>
//! ```
//!
//! All three fields are lowercase hex: a 12-byte iv (24 characters), the
//! 16-byte authentication tag (32 characters), and the ciphertext. The
//! ciphertext has the same byte length as the plaintext, so an envelope
//! reveals how long the protected value is.
//!
//! The versioned form prepends `v1:`. Parsing accepts both forms; whether new
//! envelopes carry the prefix is decided by configuration.

use std::str::FromStr;

use thiserror::Error;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits), stored as the
/// envelope's iv field.
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Prefix that marks the versioned envelope form.
pub const VERSION_PREFIX: &str = "v1";

const SEPARATOR: char = ':';

/// A parsed encrypted field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Raw iv (nonce) bytes.
    pub iv: [u8; NONCE_LEN],
    /// Raw authentication tag bytes.
    pub tag: [u8; TAG_LEN],
    /// Raw ciphertext bytes, without the tag.
    pub ciphertext: Vec<u8>,
}

/// Errors produced when parsing a stored value as an envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The value does not have the expected number of colon-separated fields.
    #[error("expected 3 colon-separated fields, found {0}")]
    FieldCount(usize),

    /// A field contains characters outside the hex alphabet.
    #[error("{0} field is not valid hex")]
    Hex(&'static str),

    /// The iv field does not decode to [`NONCE_LEN`] bytes.
    #[error("iv must be {NONCE_LEN} bytes, got {0}")]
    IvLength(usize),

    /// The tag field does not decode to [`TAG_LEN`] bytes.
    #[error("tag must be {TAG_LEN} bytes, got {0}")]
    TagLength(usize),

    /// The value has a version prefix this build does not understand.
    #[error("unsupported envelope version: {0}")]
    Version(String),
}

impl Envelope {
    /// Encode this envelope to the legacy three-field string form.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            hex::encode(self.iv),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext),
        )
    }

    /// Encode this envelope with the `v1:` version prefix.
    pub fn to_versioned_repr(&self) -> String {
        format!("{VERSION_PREFIX}{SEPARATOR}{}", self.to_string_repr())
    }

    /// Parse a stored string back into an [`Envelope`].
    ///
    /// Both the legacy `iv:tag:ciphertext` form and the `v1:`-prefixed form
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvelopeError`] describing the first structural problem:
    /// wrong field count, unknown version prefix, non-hex characters, or a
    /// field of the wrong byte length.
    pub fn parse(s: &str) -> Result<Self, EnvelopeError> {
        let fields: Vec<&str> = s.split(SEPARATOR).collect();
        let (iv_hex, tag_hex, ciphertext_hex) = match fields.as_slice() {
            [iv, tag, ciphertext] => (*iv, *tag, *ciphertext),
            [version, iv, tag, ciphertext] if *version == VERSION_PREFIX => {
                (*iv, *tag, *ciphertext)
            }
            [version, _, _, _] => return Err(EnvelopeError::Version((*version).to_owned())),
            other => return Err(EnvelopeError::FieldCount(other.len())),
        };

        let iv_bytes = hex::decode(iv_hex).map_err(|_| EnvelopeError::Hex("iv"))?;
        if iv_bytes.len() != NONCE_LEN {
            return Err(EnvelopeError::IvLength(iv_bytes.len()));
        }
        let mut iv = [0u8; NONCE_LEN];
        iv.copy_from_slice(&iv_bytes);

        let tag_bytes = hex::decode(tag_hex).map_err(|_| EnvelopeError::Hex("tag"))?;
        if tag_bytes.len() != TAG_LEN {
            return Err(EnvelopeError::TagLength(tag_bytes.len()));
        }
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&tag_bytes);

        let ciphertext = hex::decode(ciphertext_hex).map_err(|_| EnvelopeError::Hex("ciphertext"))?;

        Ok(Self { iv, tag, ciphertext })
    }
}

impl FromStr for Envelope {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
