//! SHA-256 hashing for verification and lookup values.

use sha2::{Digest, Sha256};

/// Hash `data` with SHA-256 and return the digest as lowercase hex.
///
/// One-way and deterministic: suited to values that only ever need equality
/// checks, never recovery.
pub fn hash_data(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(data.as_ref()))
}
