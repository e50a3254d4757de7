// identity-core/src/chains/evm/address.rs
//
// EVM Address Module - Address Derivation từ public key hoặc private key
// EIP-55 (Checksum), Keccak-256, secp256k1

use crate::crypto::hash::keccak256;
use crate::error::{CryptoError, IdentityError, IdentityResult};
use alloy::primitives::Address;
use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey, SecretKey};
use zeroize::{Zeroize, Zeroizing};

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// EVM Address Generator
///
/// # Flow:  Public Key (33B | 65B) → normalize → X‖Y (64B) → Keccak256 → Address (20B)
///
/// Address chỉ phụ thuộc vào public key, không phụ thuộc chain ID.
pub struct EvmAddress;

impl EvmAddress {
    // =========================================================================
    // CORE: Public Key → Address Bytes (20 bytes)
    // Đây là hàm nền tảng, tất cả hàm khác compose từ đây.
    // =========================================================================

    /// Derive the 20 address bytes from a SEC1 public key (compressed or
    /// uncompressed).
    ///
    /// The key is always parsed by the curve library and re-encoded
    /// uncompressed before hashing, so a compressed input and its
    /// uncompressed twin give the same address and off-curve points are
    /// rejected.
    ///
    /// # Algorithm (chuẩn Ethereum Yellow Paper)
    /// 1. `pub_key` → secp256k1 point → uncompressed (65B)
    /// 2. Bỏ prefix byte 0x04 → `pub_key_raw` (64B)
    /// 3. Keccak-256(`pub_key_raw`) → `hash` (32B)
    /// 4. `hash[12..32]` → `address` (20B)
    pub fn from_public_key_bytes(pub_key: &[u8]) -> IdentityResult<[u8; ADDRESS_LEN]> {
        let public_key = PublicKey::from_sec1_bytes(pub_key).map_err(|e| {
            IdentityError::Crypto(CryptoError::InvalidPublicKey(format!(
                "Invalid secp256k1 public key: {}",
                e
            )))
        })?;
        Ok(Self::address_of(&public_key))
    }

    fn address_of(public_key: &PublicKey) -> [u8; ADDRESS_LEN] {
        let encoded = public_key.to_encoded_point(false);
        let pub_key_raw = &encoded.as_bytes()[1..]; // Bỏ 0x04 prefix

        let mut hash = keccak256(pub_key_raw);

        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&hash[12..]);
        hash.zeroize();

        address
    }

    /// Lowercase hex address, optionally `0x`-prefixed.
    pub fn from_public_key_hex(pub_key_hex: &str, with_0x: bool) -> IdentityResult<String> {
        let bytes = hex::decode(strip_0x(pub_key_hex.trim())).map_err(|e| {
            IdentityError::Crypto(CryptoError::InvalidPublicKey(format!(
                "Public key is not hex: {}",
                e
            )))
        })?;
        let address = hex::encode(Self::from_public_key_bytes(&bytes)?);
        Ok(if with_0x {
            format!("0x{}", address)
        } else {
            address
        })
    }

    // =========================================================================
    // PRIVATE KEY API - Zeroizing
    // =========================================================================

    /// Derive 20 bytes address from a **zeroizing private key**.
    ///
    /// Takes ownership of the key material wrapped in [`Zeroizing`], so the
    /// buffer is zeroed when this function returns.
    pub fn derive_bytes(priv_key: Zeroizing<Vec<u8>>) -> IdentityResult<[u8; ADDRESS_LEN]> {
        let secret_key = SecretKey::from_slice(&priv_key).map_err(|e| {
            IdentityError::Crypto(CryptoError::InvalidPrivateKey(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;
        Ok(Self::address_of(&secret_key.public_key()))
        // `priv_key` dropped & zeroed here
    }

    /// Derive EIP-55 checksummed address string from a **zeroizing private key**.
    ///
    /// # Returns
    /// `"0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B"` (mixed-case checksum)
    #[inline]
    pub fn derive(priv_key: Zeroizing<Vec<u8>>) -> IdentityResult<String> {
        let bytes = Self::derive_bytes(priv_key)?;
        Ok(Address::from_slice(&bytes).to_checksum(None))
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Validate chuỗi có phải Ethereum address hợp lệ không
    ///
    /// Kiểm tra: `0x` prefix + 40 hex chars + EIP-55 checksum (nếu mixed case)
    #[inline]
    pub fn is_valid(address: &str) -> bool {
        address.parse::<Address>().is_ok()
    }

    /// Normalize về EIP-55 checksum format
    ///
    /// Accepts addresses with or without the `0x` prefix.
    pub fn to_checksum(address: &str) -> IdentityResult<String> {
        let prefixed = format!("0x{}", strip_0x(address));
        let addr: Address = prefixed.parse().map_err(|_| {
            IdentityError::Validation("Invalid Ethereum address format".to_string())
        })?;
        Ok(addr.to_checksum(None))
    }

    /// So sánh 2 address (case-insensitive, zero-allocation)
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (addr1.parse::<Address>(), addr2.parse::<Address>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Strip one leading `0x` / `0X`.
#[inline]
pub(crate) fn strip_0x(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

// =============================================================================
// TESTS
// =============================================================================
