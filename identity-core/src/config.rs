// identity-core/src/config.rs
//
// Cấu hình derivation: coin type, account, passphrase.
// Mặc định là contract cố định của Internet Computer: m/44'/223'/0'

use crate::crypto::paths::{coin_type, DerivationPaths, HARDENED_OFFSET, PURPOSE};
use crate::error::{IdentityError, IdentityResult};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Derivation settings.
///
/// Khác default chỉ khi caller chủ động truyền vào. Passphrase (BIP-39
/// "25th word") được zeroize khi drop và không bao giờ in ra Debug.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct DerivationConfig {
    #[serde(default = "default_coin_type")]
    pub coin_type: u32,
    #[serde(default)]
    pub account: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}

fn default_coin_type() -> u32 {
    coin_type::ICP
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self::icp()
    }
}

impl DerivationConfig {
    /// `m/44'/223'/0'`, no passphrase.
    pub fn icp() -> Self {
        Self {
            coin_type: coin_type::ICP,
            account: 0,
            passphrase: None,
        }
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    pub fn with_account(mut self, account: u32) -> Self {
        self.account = account;
        self
    }

    pub fn with_coin_type(mut self, coin_type: u32) -> Self {
        self.coin_type = coin_type;
        self
    }

    /// Reject values that would collide with the hardened index range.
    pub fn validate(&self) -> IdentityResult<()> {
        if self.coin_type >= HARDENED_OFFSET {
            return Err(IdentityError::Config(format!(
                "coin_type {} is out of range (must be < 2^31)",
                self.coin_type
            )));
        }
        if self.account >= HARDENED_OFFSET {
            return Err(IdentityError::Config(format!(
                "account {} is out of range (must be < 2^31)",
                self.account
            )));
        }
        Ok(())
    }

    /// Parse và validate từ JSON (camelCase, field thiếu lấy default).
    pub fn from_json_str(json: &str) -> IdentityResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| IdentityError::Config(format!("Invalid derivation config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Non-leaf node serialized as the extended public key.
    #[inline]
    pub fn account_path(&self) -> String {
        DerivationPaths::account(self.coin_type, self.account)
    }

    /// External-chain leaf for `index`.
    #[inline]
    pub fn leaf_path(&self, index: u32) -> String {
        DerivationPaths::bip44(PURPOSE, self.coin_type, self.account, 0, index)
    }
}

impl std::fmt::Debug for DerivationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivationConfig")
            .field("coin_type", &self.coin_type)
            .field("account", &self.account)
            .field(
                "passphrase",
                &self.passphrase.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
