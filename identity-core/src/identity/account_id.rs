// identity-core/src/identity/account_id.rs
//
// Account Identifier - định danh balance trên ledger
//
// digest     = SHA-224(0x0A ‖ "account-id" ‖ principal ‖ subaccount)   (28 bytes)
// account_id = CRC-32-BE(digest) ‖ digest                             (32 bytes, 64 hex)
//
// QUAN TRỌNG: thứ tự checksum-trước-digest và byte order big-endian là
// wire-format của network. Đổi bất kỳ điều gì ở đây sẽ cho ra account id
// hợp lệ về cú pháp nhưng sai hoàn toàn.

use crate::crypto::checksum::crc32_be;
use crate::crypto::hash::{sha224_concat, SHA224_LEN};
use crate::error::{EncodingError, IdentityError, IdentityResult};
use crate::identity::principal::Principal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Domain separator: length byte `0x0A` followed by `"account-id"`.
pub const ACCOUNT_DOMAIN_SEPARATOR: &[u8; 11] = b"\x0Aaccount-id";

pub const SUBACCOUNT_LEN: usize = 32;
pub const ACCOUNT_ID_LEN: usize = 4 + SHA224_LEN;

/// 32-byte discriminator; the all-zero value is the default account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Subaccount(pub [u8; SUBACCOUNT_LEN]);

impl Subaccount {
    /// Subaccount whose last 4 bytes hold `index` big-endian.
    pub fn from_index(index: u32) -> Self {
        let mut bytes = [0u8; SUBACCOUNT_LEN];
        bytes[SUBACCOUNT_LEN - 4..].copy_from_slice(&index.to_be_bytes());
        Self(bytes)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountIdentifier {
    hash: [u8; SHA224_LEN],
}

impl AccountIdentifier {
    pub fn new(principal: &Principal, subaccount: &Subaccount) -> Self {
        let hash = sha224_concat(&[
            &ACCOUNT_DOMAIN_SEPARATOR[..],
            principal.as_slice(),
            &subaccount.0[..],
        ]);
        Self { hash }
    }

    /// Account id for the default (all-zero) subaccount.
    #[inline]
    pub fn from_principal(principal: &Principal) -> Self {
        Self::new(principal, &Subaccount::default())
    }

    #[inline]
    pub fn hash(&self) -> &[u8; SHA224_LEN] {
        &self.hash
    }

    #[inline]
    pub fn checksum(&self) -> [u8; 4] {
        crc32_be(&self.hash)
    }

    pub fn to_bytes(&self) -> [u8; ACCOUNT_ID_LEN] {
        let mut out = [0u8; ACCOUNT_ID_LEN];
        out[..4].copy_from_slice(&self.checksum());
        out[4..].copy_from_slice(&self.hash);
        out
    }

    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse 64 hex chars and verify the leading checksum.
    pub fn from_hex(text: &str) -> IdentityResult<Self> {
        let bytes = hex::decode(text)
            .map_err(|e| EncodingError::InvalidAccountId(format!("bad hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> IdentityResult<Self> {
        if bytes.len() != ACCOUNT_ID_LEN {
            return Err(EncodingError::InvalidAccountId(format!(
                "expected {} bytes, got {}",
                ACCOUNT_ID_LEN,
                bytes.len()
            ))
            .into());
        }

        let mut hash = [0u8; SHA224_LEN];
        hash.copy_from_slice(&bytes[4..]);
        let account = Self { hash };

        if account.checksum() != bytes[..4] {
            return Err(EncodingError::InvalidAccountId("checksum mismatch".to_string()).into());
        }
        Ok(account)
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountIdentifier({})", self.to_hex())
    }
}

impl FromStr for AccountIdentifier {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================
