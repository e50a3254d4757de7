// identity-core/src/crypto/hash.rs
//
// Hash Utility - Keccak-256 (addresses) & SHA-224 (principals, account ids)

use sha2::{Digest, Sha224};
use tiny_keccak::{Hasher, Keccak};

/// Độ dài SHA-224 digest
pub const SHA224_LEN: usize = 28;

/// Keccak-256 (Ethereum variant, không phải SHA3-256)
#[inline]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

#[inline]
pub fn sha224(data: &[u8]) -> [u8; SHA224_LEN] {
    Sha224::digest(data).into()
}

/// SHA-224 over the concatenation of `parts`, without building the
/// concatenated buffer.
pub fn sha224_concat(parts: &[&[u8]]) -> [u8; SHA224_LEN] {
    let mut hasher = Sha224::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_sha224_abc() {
        assert_eq!(
            hex::encode(sha224(b"abc")),
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
        );
    }

    #[test]
    fn test_sha224_concat_matches_single_buffer() {
        let joined = sha224(b"\x0aaccount-id");
        let parts = sha224_concat(&[&b"\x0a"[..], &b"account-"[..], &b"id"[..]]);
        assert_eq!(joined, parts);
    }
}
