//! AES-256-GCM field encryption primitives and the textual envelope format.
//!
//! This module is intentionally free of storage and transport dependencies.
//! It provides the operations applied to individual column values on their
//! way into and out of the database.
//!
//! # Stored format
//!
//! ```text
//! <hex(iv)>:<hex(tag)>:<hex(ciphertext)>
//! ```
//!
//! The optional `v1:` prefix marks the versioned form, which enables future
//! algorithm or key-version migration without sniffing. Parsing accepts both
//! forms; emission of the prefix is configuration-gated.

pub mod cipher;
pub mod envelope;
pub mod fallback;
pub mod hash;
pub mod token;

pub use cipher::{FieldCipher, KEY_LEN};
pub use envelope::{Envelope, EnvelopeError, NONCE_LEN, TAG_LEN, VERSION_PREFIX};
pub use fallback::DecryptOutcome;
pub use hash::hash_data;
pub use token::{generate_secure_token, DEFAULT_TOKEN_LEN};
