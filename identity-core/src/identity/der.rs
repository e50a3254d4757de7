// identity-core/src/identity/der.rs
//
// DER Codec - secp256k1 SubjectPublicKeyInfo (RFC 5480) với prefix cố định
//
// SEQUENCE {
//   SEQUENCE { OID ecPublicKey (1.2.840.10045.2.1), OID secp256k1 (1.3.132.0.10) }
//   BIT STRING (0 unused bits) { 0x04 ‖ X ‖ Y }
// }

use crate::error::{EncodingError, IdentityResult};

/// Uncompressed SEC1 point length (`0x04 ‖ X ‖ Y`).
pub const RAW_KEY_LENGTH: usize = 65;

/// Algorithm identifier header preceding the raw key.
pub const DER_PREFIX: [u8; 23] = [
    0x30, 0x56, // SEQUENCE, 86 bytes
    0x30, 0x10, // SEQUENCE, 16 bytes
    0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, // OID ecPublicKey
    0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, // OID secp256k1
    0x03, 0x42, 0x00, // BIT STRING, 66 bytes, no padding
];

pub const DER_KEY_LENGTH: usize = DER_PREFIX.len() + RAW_KEY_LENGTH;

/// Wrap a raw uncompressed key in its DER structure.
///
/// Only the length is checked: the point is not validated against the curve.
pub fn der_encode(raw_key: &[u8]) -> IdentityResult<Vec<u8>> {
    if raw_key.len() != RAW_KEY_LENGTH {
        return Err(EncodingError::InvalidKeyLength {
            expected: RAW_KEY_LENGTH,
            actual: raw_key.len(),
        }
        .into());
    }

    let mut der = Vec::with_capacity(DER_KEY_LENGTH);
    der.extend_from_slice(&DER_PREFIX);
    der.extend_from_slice(raw_key);
    Ok(der)
}

/// Strip the DER structure and return the 65 raw key bytes.
///
/// The prefix is checked by re-encoding the embedded key and comparing the
/// whole buffer, so any corrupted header byte is rejected.
pub fn der_decode(der_key: &[u8]) -> IdentityResult<[u8; RAW_KEY_LENGTH]> {
    if der_key.len() != DER_KEY_LENGTH {
        return Err(EncodingError::InvalidKeyLength {
            expected: DER_KEY_LENGTH,
            actual: der_key.len(),
        }
        .into());
    }

    let mut raw = [0u8; RAW_KEY_LENGTH];
    raw.copy_from_slice(&der_key[DER_PREFIX.len()..]);

    if der_encode(&raw)? != der_key {
        return Err(EncodingError::InvalidEncoding(format!(
            "secp256k1 DER-encoded public key must start with {}",
            hex::encode(DER_PREFIX)
        ))
        .into());
    }

    Ok(raw)
}

/// secp256k1 public key kept in both raw and DER form.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Secp256k1PublicKey {
    raw: [u8; RAW_KEY_LENGTH],
    der: Vec<u8>,
}

impl Secp256k1PublicKey {
    pub fn from_raw(raw_key: &[u8]) -> IdentityResult<Self> {
        let der = der_encode(raw_key)?;
        let mut raw = [0u8; RAW_KEY_LENGTH];
        raw.copy_from_slice(raw_key);
        Ok(Self { raw, der })
    }

    pub fn from_der(der_key: &[u8]) -> IdentityResult<Self> {
        let raw = der_decode(der_key)?;
        Ok(Self {
            raw,
            der: der_key.to_vec(),
        })
    }

    #[inline]
    pub fn to_raw(&self) -> &[u8; RAW_KEY_LENGTH] {
        &self.raw
    }

    #[inline]
    pub fn to_der(&self) -> &[u8] {
        &self.der
    }
}

impl std::fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secp256k1PublicKey({})", hex::encode(self.raw))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdentityError;

    const RAW_KEY: &str = "04abdb60eb7c96408414d1e251d41ca0ecf89a4541768cba7eed8174c53246d58c56031b23388bc7d275b4b26bf29137bdc181ae4d6b6f64f30db8d4bfd9222c27";

    fn raw_key() -> Vec<u8> {
        hex::decode(RAW_KEY).unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let der = der_encode(&raw_key()).unwrap();
        assert_eq!(der.len(), 88);
        assert_eq!(&der[..23], &DER_PREFIX);
        assert_eq!(&der[23..], raw_key().as_slice());
        assert_eq!(
            hex::encode(&der[..23]),
            "3056301006072a8648ce3d020106052b8104000a034200"
        );
    }

    #[test]
    fn test_decode_round_trip() {
        let der = der_encode(&raw_key()).unwrap();
        let raw = der_decode(&der).unwrap();
        assert_eq!(raw.as_slice(), raw_key().as_slice());
    }

    #[test]
    fn test_encode_rejects_compressed_key() {
        let compressed = [0x02u8; 33];
        assert_eq!(
            der_encode(&compressed),
            Err(IdentityError::Encoding(EncodingError::InvalidKeyLength {
                expected: 65,
                actual: 33
            }))
        );
    }

    #[test]
    fn test_encode_does_not_check_curve() {
        // Không phải điểm hợp lệ trên curve, nhưng encode vẫn chấp nhận
        assert!(der_encode(&[0xffu8; 65]).is_ok());
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let der = der_encode(&raw_key()).unwrap();
        let err = der_decode(&der[..87]).unwrap_err();
        assert_eq!(
            err,
            IdentityError::Encoding(EncodingError::InvalidKeyLength {
                expected: 88,
                actual: 87
            })
        );
        assert!(der_decode(&[]).is_err());
    }

    #[test]
    fn test_decode_rejects_every_prefix_flip() {
        let der = der_encode(&raw_key()).unwrap();
        for i in 0..DER_PREFIX.len() {
            let mut corrupted = der.clone();
            corrupted[i] ^= 0x01;
            assert!(
                matches!(
                    der_decode(&corrupted),
                    Err(IdentityError::Encoding(EncodingError::InvalidEncoding(_)))
                ),
                "flip at byte {} was accepted",
                i
            );
        }
    }

    #[test]
    fn test_public_key_type() {
        let key = Secp256k1PublicKey::from_raw(&raw_key()).unwrap();
        let parsed = Secp256k1PublicKey::from_der(key.to_der()).unwrap();
        assert_eq!(key, parsed);
        assert_eq!(parsed.to_raw().as_slice(), raw_key().as_slice());
        assert!(format!("{:?}", key).starts_with("Secp256k1PublicKey(04abdb"));
    }
}
