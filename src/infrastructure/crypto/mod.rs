//! Symmetric encryption and digest utilities
//!
//! AES-256-CBC with a random per-message IV for reversible at-rest secrets,
//! and Base64-encoded MD5 digests for comparison-only storage.

mod aes_cbc;
mod digest;

pub use aes_cbc::{AesCipher, BLOCK_SIZE, KEY_SIZE, decrypt, derive_key, encrypt};
pub use digest::md5_hash;
