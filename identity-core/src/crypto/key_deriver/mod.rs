// identity-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - secp256k1 (BIP-32)
//
// Kiến trúc:
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │                    ▼                            │
// │           KeyNode::master (m)                   │
// │                    │                            │
// │                    ▼                            │
// │        m/44'/223'/0'  ──▶ extended public key   │
// │                    │                            │
// │                    ▼                            │
// │        m/44'/223'/0'/0/{index} ──▶ private key  │
// └─────────────────────────────────────────────────┘

pub mod node;

// Re-exports
pub use node::KeyNode;

use crate::error::{CryptoError, IdentityError, IdentityResult};

/// Expected BIP-39 seed length.
pub const SEED_LEN: usize = 64;

/// Validate seed length
#[inline]
pub fn validate_seed(seed: &[u8]) -> IdentityResult<()> {
    if seed.len() != SEED_LEN {
        return Err(IdentityError::Crypto(CryptoError::DerivationFailed(format!(
            "Invalid seed length: expected {} bytes, got {}",
            SEED_LEN,
            seed.len()
        ))));
    }
    Ok(())
}
