// identity-core/src/crypto/checksum.rs
//
// Checksum Utility - CRC-32 (IEEE) cho principal text & account identifier

#[inline]
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// CRC-32 serialized most-significant byte first.
#[inline]
pub fn crc32_be(data: &[u8]) -> [u8; 4] {
    crc32(data).to_be_bytes()
}
