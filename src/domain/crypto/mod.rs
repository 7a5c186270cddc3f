//! Cipher domain errors

use thiserror::Error;

/// Failures when opening a cipher envelope
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("Invalid PKCS#7 padding")]
    PaddingInvalid,

    #[error("Malformed cipher envelope: {reason}")]
    Decode { reason: String },
}

impl CipherError {
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }
}
