//! [`KeyBytes`]: fixed-size buffer for the resolved field encryption key.

use crate::crypto::KEY_LEN;
use crate::error::CryptoError;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Held inside [`FieldCipher`](crate::FieldCipher) for the life of the
/// process. When this type is dropped, the memory is overwritten with zeroes
/// to minimise the window during which plaintext key material lives in RAM.
#[derive(Clone)]
pub struct KeyBytes(Box<[u8; KEY_LEN]>);

impl KeyBytes {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(Box::new(bytes))
    }

    /// Copy key bytes out of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if the slice is not exactly
    /// [`KEY_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for KeyBytes {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("KeyBytes([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_in_debug() {
        let key = KeyBytes::new([0xFF; KEY_LEN]);
        assert!(format!("{key:?}").contains("REDACTED"));
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        assert!(matches!(
            KeyBytes::from_slice(&[0u8; 16]),
            Err(CryptoError::InvalidKeyLength(16))
        ));
        assert!(KeyBytes::from_slice(&[0u8; KEY_LEN + 1]).is_err());
    }

    #[test]
    fn from_slice_copies_bytes() {
        let src = [0x42u8; KEY_LEN];
        let key = KeyBytes::from_slice(&src).unwrap();
        assert_eq!(key.as_bytes(), &src);
    }
}
