// identity-core/src/crypto/keytool.rs
//
// Curve Key Tool - secp256k1 key pair helpers
//
// Private key (hex) ─▶ Public key (33B / 65B) ─┬─▶ EVM address (20B)
//                                              ├─▶ DER (88B)
//                                              ├─▶ Principal
//                                              └─▶ Account Identifier
//
// Mọi input/output đều là hex string để dùng trực tiếp qua FFI.

use crate::chains::evm::address::{strip_0x, EvmAddress};
use crate::error::{CryptoError, IdentityError, IdentityResult};
use crate::identity::{AccountIdentifier, Principal, Secp256k1PublicKey};
use alloy::primitives::eip191_hash_message;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, Secp256k1, SecretKey};
use std::marker::PhantomData;
use zeroize::Zeroizing;

/// Private key length in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Recoverable signature length (`r ‖ s ‖ v`).
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// secp256k1 key tool.
///
/// Carries the curve as a type rather than a process-wide handle; the value
/// is zero-sized and cheap to copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTool {
    _curve: PhantomData<Secp256k1>,
}

impl KeyTool {
    pub const fn new() -> Self {
        Self {
            _curve: PhantomData,
        }
    }

    // =========================================================================
    // PRIVATE KEY
    // =========================================================================

    /// Parse a 64-hex-char private key (optional `0x`) into a curve scalar.
    ///
    /// Rejects anything that is not exactly 32 bytes of hex, zero, or not
    /// below the curve order.
    pub fn parse_private_key(&self, private_key_hex: &str) -> IdentityResult<SecretKey> {
        let stripped = strip_0x(private_key_hex.trim());
        if stripped.len() != PRIVATE_KEY_LEN * 2 {
            return Err(IdentityError::Crypto(CryptoError::InvalidPrivateKey(format!(
                "expected {} hex chars, got {}",
                PRIVATE_KEY_LEN * 2,
                stripped.len()
            ))));
        }

        let bytes = Zeroizing::new(hex::decode(stripped).map_err(|e| {
            IdentityError::Crypto(CryptoError::InvalidPrivateKey(format!("not hex: {}", e)))
        })?);

        SecretKey::from_slice(&bytes).map_err(|_| {
            IdentityError::Crypto(CryptoError::InvalidPrivateKey(
                "scalar is zero or not below the curve order".to_string(),
            ))
        })
    }

    /// Whether `private_key_hex` is a usable secp256k1 private key. Never fails.
    #[inline]
    pub fn is_valid_private_key(&self, private_key_hex: &str) -> bool {
        self.parse_private_key(private_key_hex).is_ok()
    }

    /// Public key for a private key, hex-encoded.
    ///
    /// `compressed = false` → 130 hex chars (`04‖X‖Y`),
    /// `compressed = true` → 66 hex chars (`02|03‖X`).
    pub fn derive_public_key(
        &self,
        private_key_hex: &str,
        compressed: bool,
    ) -> IdentityResult<String> {
        let secret_key = self.parse_private_key(private_key_hex)?;
        Ok(Self::encode_point(&secret_key.public_key(), compressed))
    }

    // =========================================================================
    // PUBLIC KEY
    // =========================================================================

    /// Parse a SEC1 public key (compressed or uncompressed, optional `0x`).
    pub fn parse_public_key(&self, public_key_hex: &str) -> IdentityResult<PublicKey> {
        let bytes = hex::decode(strip_0x(public_key_hex.trim())).map_err(|e| {
            IdentityError::Crypto(CryptoError::InvalidPublicKey(format!("not hex: {}", e)))
        })?;
        PublicKey::from_sec1_bytes(&bytes).map_err(|e| {
            IdentityError::Crypto(CryptoError::InvalidPublicKey(format!(
                "not a secp256k1 point: {}",
                e
            )))
        })
    }

    /// Re-encode any valid public key in uncompressed form (130 hex chars).
    pub fn uncompressed_public_key(&self, public_key_hex: &str) -> IdentityResult<String> {
        let public_key = self.parse_public_key(public_key_hex)?;
        Ok(Self::encode_point(&public_key, false))
    }

    /// Re-encode any valid public key in compressed form (66 hex chars).
    pub fn compressed_public_key(&self, public_key_hex: &str) -> IdentityResult<String> {
        let public_key = self.parse_public_key(public_key_hex)?;
        Ok(Self::encode_point(&public_key, true))
    }

    /// Ethereum-style address for a compressed or uncompressed public key.
    ///
    /// Always 40 hex chars, plus `0x` when `with_0x` is set.
    #[inline]
    pub fn derive_address(&self, public_key_hex: &str, with_0x: bool) -> IdentityResult<String> {
        EvmAddress::from_public_key_hex(public_key_hex, with_0x)
    }

    // =========================================================================
    // NETWORK IDENTITY
    // =========================================================================

    /// DER-wrapped key for an uncompressed public key (65 bytes → 88 bytes).
    pub fn der_public_key(&self, public_key_hex: &str) -> IdentityResult<Secp256k1PublicKey> {
        let raw = hex::decode(strip_0x(public_key_hex.trim())).map_err(|e| {
            IdentityError::Crypto(CryptoError::InvalidPublicKey(format!("not hex: {}", e)))
        })?;
        Secp256k1PublicKey::from_raw(&raw)
    }

    /// Principal text for an uncompressed public key.
    pub fn principal_from_public_key(&self, public_key_hex: &str) -> IdentityResult<String> {
        let der = self.der_public_key(public_key_hex)?;
        Ok(Principal::from_public_key(&der).to_text())
    }

    /// Default-subaccount account identifier for an uncompressed public key.
    pub fn account_id_from_public_key(&self, public_key_hex: &str) -> IdentityResult<String> {
        let der = self.der_public_key(public_key_hex)?;
        let principal = Principal::from_public_key(&der);
        Ok(AccountIdentifier::from_principal(&principal).to_hex())
    }

    // =========================================================================
    // SIGNATURE RECOVERY
    // =========================================================================

    /// Recover the signer's uncompressed public key from an EIP-191
    /// personal-sign signature over `message`.
    ///
    /// `signature_hex` is `r ‖ s ‖ v` (65 bytes, optional `0x`), with `v` in
    /// `{0, 1, 27, 28}`. The result starts with `04`.
    pub fn recover_public_key_from_signed_message(
        &self,
        signature_hex: &str,
        message: &[u8],
    ) -> IdentityResult<String> {
        let sig_bytes = hex::decode(strip_0x(signature_hex.trim()))
            .map_err(|e| recovery_error(format!("signature is not hex: {}", e)))?;
        if sig_bytes.len() != RECOVERABLE_SIGNATURE_LEN {
            return Err(recovery_error(format!(
                "expected {} signature bytes, got {}",
                RECOVERABLE_SIGNATURE_LEN,
                sig_bytes.len()
            )));
        }

        let signature = Signature::from_slice(&sig_bytes[..64])
            .map_err(|e| recovery_error(format!("malformed r/s: {}", e)))?;

        let v = sig_bytes[64];
        let parity = match v {
            0 | 1 => v,
            27 | 28 => v - 27,
            _ => return Err(recovery_error(format!("unsupported recovery byte {}", v))),
        };
        let mut recovery_id = RecoveryId::from_byte(parity)
            .ok_or_else(|| recovery_error(format!("unsupported recovery byte {}", v)))?;

        // Một số wallet trả về high-S; chuẩn hoá về low-S thì phải đảo parity
        let signature = match signature.normalize_s() {
            Some(normalized) => {
                recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
                normalized
            }
            None => signature,
        };

        let prehash = eip191_hash_message(message);
        let verifying_key =
            VerifyingKey::recover_from_prehash(prehash.as_slice(), &signature, recovery_id)
                .map_err(|e| recovery_error(format!("no key recovered: {}", e)))?;

        Ok(Self::encode_point(&PublicKey::from(&verifying_key), false))
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    #[inline]
    fn encode_point(public_key: &PublicKey, compressed: bool) -> String {
        hex::encode(public_key.to_encoded_point(compressed).as_bytes())
    }
}

#[inline]
fn recovery_error(msg: String) -> IdentityError {
    IdentityError::Crypto(CryptoError::RecoveryFailed(msg))
}

// =============================================================================
// TESTS
// =============================================================================
