//! One-way digests

use base64::{Engine, engine::general_purpose::STANDARD};
use md5::{Digest, Md5};

/// MD5 digest of the UTF-8 bytes of `data`, Base64 encoded
///
/// Used for equality checks against stored digests only; it is not a
/// password-strength hash and cannot be reversed.
pub fn md5_hash(data: &str) -> String {
    STANDARD.encode(Md5::digest(data.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_digests() {
        // 900150983cd24fb0d6963f7d28e17f72
        assert_eq!(md5_hash("abc"), "kAFQmDzST7DWlj99KOF/cg==");
        // d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(md5_hash(""), "1B2M2Y8AsgTpgAmY7PhCfg==");
    }

    #[test]
    fn test_md5_is_deterministic() {
        assert_eq!(md5_hash("임의 문자열"), md5_hash("임의 문자열"));
        assert_ne!(md5_hash("abc"), md5_hash("abd"));
    }
}
