//! Password digest comparison

use std::fmt::Debug;

use crate::infrastructure::crypto::md5_hash;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password for storage
    fn hash(&self, password: &str) -> String;

    /// Verify a password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Stores passwords as Base64 MD5 digests, matching the board's existing
/// user table. Verification recomputes the digest and compares.
#[derive(Debug, Clone, Default)]
pub struct Md5PasswordHasher;

impl Md5PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Md5PasswordHasher {
    fn hash(&self, password: &str) -> String {
        md5_hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        md5_hash(password) == hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Md5PasswordHasher::new();

        let hash = hasher.hash("my_password");

        assert!(hasher.verify("my_password", &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_stable() {
        let hasher = Md5PasswordHasher::new();

        assert_eq!(hasher.hash("abc"), "kAFQmDzST7DWlj99KOF/cg==");
        assert_eq!(hasher.hash("abc"), hasher.hash("abc"));
    }
}
