// identity-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) Chain Support
//!
//! - **Address Derivation**: EIP-55 checksummed address generation via [`EvmAddress`].
//! - **Signing**: EIP-191 personal sign via [`LocalEvmSigner`], which doubles as an
//!   in-process [`SignatureProvider`](crate::provider::SignatureProvider).

pub mod address;
pub mod signer;

// Re-exports for cleaner API access
pub use address::EvmAddress;
pub use signer::LocalEvmSigner;
