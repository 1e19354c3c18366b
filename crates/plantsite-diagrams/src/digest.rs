//! Content digest primitive.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `bytes` as lowercase hex (64 characters).
///
/// Shared by cache-key derivation and renderer binary verification.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(sha256_hex(b"@startuml"), sha256_hex(b"@startuml"));
        assert_ne!(sha256_hex(b"@startuml"), sha256_hex(b"@enduml"));
    }
}
