// identity-core/src/identity/principal.rs
//
// Principal - định danh của một identity trên network
//
// Binary:  SHA-224(DER public key) ‖ 0x02            (29 bytes, self-authenticating)
// Text:    base32(CRC-32-BE(binary) ‖ binary), lowercase, không padding,
//          chia nhóm 5 ký tự bằng '-'
//          e.g. "tgzar-4lpln-fq34h-6hxo4-wlm3x-6g3or-6hxvr-d6jbw-ooh2b-lzsw4-aqe"

use crate::crypto::checksum::crc32_be;
use crate::crypto::hash::sha224;
use crate::error::{EncodingError, IdentityError, IdentityResult};
use crate::identity::der::Secp256k1PublicKey;
use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum principal length in bytes.
pub const MAX_PRINCIPAL_LEN: usize = 29;

/// Type tag appended to principals derived from a public key.
pub const SELF_AUTHENTICATING_TAG: u8 = 0x02;

const GROUP_LEN: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Principal {
    len: u8,
    bytes: [u8; MAX_PRINCIPAL_LEN],
}

impl Principal {
    /// Self-authenticating principal for a DER-encoded public key.
    pub fn self_authenticating(der_key: &[u8]) -> Self {
        let digest = sha224(der_key);
        let mut bytes = [0u8; MAX_PRINCIPAL_LEN];
        bytes[..digest.len()].copy_from_slice(&digest);
        bytes[digest.len()] = SELF_AUTHENTICATING_TAG;
        Self {
            len: MAX_PRINCIPAL_LEN as u8,
            bytes,
        }
    }

    #[inline]
    pub fn from_public_key(public_key: &Secp256k1PublicKey) -> Self {
        Self::self_authenticating(public_key.to_der())
    }

    pub fn try_from_slice(slice: &[u8]) -> IdentityResult<Self> {
        if slice.len() > MAX_PRINCIPAL_LEN {
            return Err(EncodingError::InvalidPrincipal(format!(
                "principal is at most {} bytes, got {}",
                MAX_PRINCIPAL_LEN,
                slice.len()
            ))
            .into());
        }
        let mut bytes = [0u8; MAX_PRINCIPAL_LEN];
        bytes[..slice.len()].copy_from_slice(slice);
        Ok(Self {
            len: slice.len() as u8,
            bytes,
        })
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub fn is_self_authenticating(&self) -> bool {
        self.as_slice().last() == Some(&SELF_AUTHENTICATING_TAG)
            && self.len as usize == MAX_PRINCIPAL_LEN
    }

    /// Canonical textual form.
    pub fn to_text(&self) -> String {
        let mut payload = Vec::with_capacity(4 + self.len as usize);
        payload.extend_from_slice(&crc32_be(self.as_slice()));
        payload.extend_from_slice(self.as_slice());

        let encoded = BASE32_NOPAD.encode(&payload).to_ascii_lowercase();
        let groups: Vec<&str> = encoded
            .as_bytes()
            .chunks(GROUP_LEN)
            // base32 alphabet là ASCII nên mỗi chunk luôn là UTF-8 hợp lệ
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
            .collect();
        groups.join("-")
    }

    /// Parse the textual form, verifying both the checksum and the grouping.
    pub fn from_text(text: &str) -> IdentityResult<Self> {
        let compact: String = text.chars().filter(|c| *c != '-').collect();
        let decoded = BASE32_NOPAD
            .decode(compact.to_ascii_uppercase().as_bytes())
            .map_err(|e| EncodingError::InvalidPrincipal(format!("bad base32: {}", e)))?;

        if decoded.len() < 4 {
            return Err(EncodingError::InvalidPrincipal("text too short".to_string()).into());
        }

        let (checksum, body) = decoded.split_at(4);
        let principal = Self::try_from_slice(body)?;
        if checksum != crc32_be(body) {
            return Err(EncodingError::InvalidPrincipal("checksum mismatch".to_string()).into());
        }

        // Từ chối dạng không canonical (uppercase, sai vị trí '-')
        if principal.to_text() != text {
            return Err(EncodingError::InvalidPrincipal(format!(
                "'{}' is not in canonical form",
                text
            ))
            .into());
        }

        Ok(principal)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.to_text())
    }
}

impl FromStr for Principal {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_text(&text).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================
