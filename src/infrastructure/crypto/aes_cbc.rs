//! AES-256-CBC encryption with Base64 envelopes
//!
//! Envelope layout: `base64(IV (16 bytes) || ciphertext)`. The IV is drawn
//! from the OS CSPRNG for every message, so encrypting the same plaintext
//! twice yields different envelopes. The key is the SHA-256 digest of the
//! caller's secret, which accepts secrets of any length.
//!
//! Envelopes carry no MAC, so [`AesCipher::decrypt`] is not an integrity
//! check. A single altered byte never yields the original plaintext; the
//! result is:
//!
//! - an IV or ciphertext byte that feeds the final block's padding:
//!   [`CipherError::PaddingInvalid`] unless the altered padding is still
//!   valid PKCS#7;
//! - an IV byte outside the padding: the matching plaintext byte is XORed
//!   with the same difference, returned as `Ok(altered)` when the result is
//!   UTF-8 and [`CipherError::Decode`] otherwise;
//! - a byte of a non-final ciphertext block: that plaintext block is
//!   garbled and one byte of the next block flipped, returned as
//!   `Ok(garbled)` when the result is UTF-8 and `Decode` otherwise.

use aes::Aes256;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

use crate::domain::crypto::CipherError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size, also the IV length
pub const BLOCK_SIZE: usize = 16;
/// AES-256 key length
pub const KEY_SIZE: usize = 32;

/// Derive a 32-byte AES key from an arbitrary-length secret (SHA-256)
pub fn derive_key(secret: &str) -> [u8; KEY_SIZE] {
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&Sha256::digest(secret.as_bytes()));
    key
}

/// Encrypt `plaintext` under a key derived from `secret`
pub fn encrypt(plaintext: &str, secret: &str) -> String {
    AesCipher::new(secret).encrypt(plaintext)
}

/// Decrypt an envelope produced by [`encrypt`] with the same `secret`
pub fn decrypt(envelope: &str, secret: &str) -> Result<String, CipherError> {
    AesCipher::new(secret).decrypt(envelope)
}

/// AES-256-CBC cipher bound to one secret
///
/// The key is derived once at construction; the value holds no other state
/// and can be shared freely between threads.
#[derive(Clone)]
pub struct AesCipher {
    key: [u8; KEY_SIZE],
}

impl std::fmt::Debug for AesCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesCipher")
            .field("key", &"[hidden]")
            .finish()
    }
}

impl AesCipher {
    /// Create a cipher whose key is derived from `secret`
    pub fn new(secret: &str) -> Self {
        Self {
            key: derive_key(secret),
        }
    }

    /// Encrypt a string into a Base64 `IV || ciphertext` envelope
    pub fn encrypt(&self, plaintext: &str) -> String {
        let mut iv = [0u8; BLOCK_SIZE];
        OsRng.fill_bytes(&mut iv);

        self.seal(&iv, plaintext.as_bytes())
    }

    /// Decrypt a Base64 `IV || ciphertext` envelope back into a string
    pub fn decrypt(&self, envelope: &str) -> Result<String, CipherError> {
        let raw = STANDARD
            .decode(envelope)
            .map_err(|e| CipherError::decode(format!("invalid base64: {}", e)))?;

        if raw.len() < BLOCK_SIZE {
            return Err(CipherError::decode(format!(
                "envelope is {} bytes, shorter than the {}-byte IV",
                raw.len(),
                BLOCK_SIZE
            )));
        }

        let (iv, ciphertext) = raw.split_at(BLOCK_SIZE);

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CipherError::decode(format!(
                "ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_SIZE
            )));
        }

        let iv = <[u8; BLOCK_SIZE]>::try_from(iv)
            .map_err(|_| CipherError::decode("IV has the wrong length"))?;

        let plaintext = Aes256CbcDec::new(&self.key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CipherError::PaddingInvalid)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::decode("plaintext is not valid UTF-8"))
    }

    fn seal(&self, iv: &[u8; BLOCK_SIZE], plaintext: &[u8]) -> String {
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &(*iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut envelope = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        envelope.extend_from_slice(iv);
        envelope.extend_from_slice(&ciphertext);

        STANDARD.encode(envelope)
    }
}
