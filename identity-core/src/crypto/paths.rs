// identity-core/src/crypto/paths.rs
//
// Derivation Paths Module - BIP-44 paths cho Internet Computer
// BIP-44 (Purpose), SLIP-44 (Coin Types)

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    /// Internet Computer
    pub const ICP: u32 = 223;
    pub const ETHEREUM: u32 = 60; // EVM chains dùng chung coin_type 60
}

/// BIP-44 purpose level.
pub const PURPOSE: u32 = 44;

/// First index of the hardened range (2^31).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// =============================================================================
// DERIVATION PATHS
// =============================================================================
/// Pre-built Derivation Paths
///
/// # Conventions
/// - BIP-44: `m/44'/coin'/account'/change/index` (secp256k1)
/// - Extended public key được serialize tại `m/44'/coin'/account'`
pub struct DerivationPaths;

impl DerivationPaths {
    // =========================================================================
    // CUSTOM PATH BUILDER
    // =========================================================================
    /// Tạo BIP-44 path tùy chỉnh
    ///
    /// # Arguments
    /// * `purpose` - 44 (BIP-44)
    /// * `coin_type` - SLIP-44 coin type (dùng constants từ `coin_type::*`)
    /// * `account` - Account index (thường 0)
    /// * `change` - 0 = external, 1 = internal
    /// * `index` - Address index
    #[inline]
    pub fn bip44(purpose: u32, coin_type: u32, account: u32, change: u32, index: u32) -> String {
        format!(
            "m/{}'/{}'/{}'/{}/{}",
            purpose, coin_type, account, change, index
        )
    }

    /// Account-level (hardened) path: `m/44'/coin'/account'`
    #[inline]
    pub fn account(coin_type: u32, account: u32) -> String {
        format!("m/{}'/{}'/{}'", PURPOSE, coin_type, account)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icp_paths() {
        assert_eq!(
            DerivationPaths::bip44(PURPOSE, coin_type::ICP, 0, 0, 0),
            "m/44'/223'/0'/0/0"
        );
        assert_eq!(DerivationPaths::account(coin_type::ICP, 0), "m/44'/223'/0'");
    }

    #[test]
    fn test_custom_builders() {
        assert_eq!(DerivationPaths::bip44(44, 60, 0, 0, 0), "m/44'/60'/0'/0/0");
        assert_eq!(DerivationPaths::bip44(44, 223, 2, 1, 9), "m/44'/223'/2'/1/9");
        assert_eq!(DerivationPaths::account(223, 3), "m/44'/223'/3'");
    }
}
