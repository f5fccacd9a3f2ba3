//! Random token generation for verification links and session artifacts.

use rand::rngs::OsRng;
use rand::RngCore;

/// Default token length in random bytes (64 hex characters once encoded).
pub const DEFAULT_TOKEN_LEN: usize = 32;

/// Generate `length` random bytes from the OS CSPRNG, hex-encoded.
///
/// The returned string has `2 * length` characters. Tokens are stateless;
/// uniqueness comes from entropy alone.
pub fn generate_secure_token(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_length_yields_64_hex_chars() {
        let token = generate_secure_token(DEFAULT_TOKEN_LEN);
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn length_is_respected() {
        assert_eq!(generate_secure_token(16).len(), 32);
        assert_eq!(generate_secure_token(0), "");
    }

    #[test]
    fn tokens_do_not_repeat() {
        assert_ne!(generate_secure_token(16), generate_secure_token(16));
    }
}
