// identity-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Primitives**: CRC-32 ([`checksum`]), Keccak-256 / SHA-224 ([`hash`]).
//! - **Mnemonic**: BIP-39 validation, generation and seed stretching via [`IdentityMnemonic`].
//! - **Key Derivation**: BIP-32 nodes that wipe themselves on drop ([`KeyNode`]).
//! - **Curve Key Tool**: public keys, addresses and signature recovery via [`KeyTool`].
//! - **HD Front-End**: mnemonic + index → [`KeyPair`] / [`Identity`] ([`hdnode`]).

pub mod checksum;
pub mod hash;
pub mod hdnode;
pub mod key_deriver;
pub mod keytool;
pub mod mnemonic;
pub mod paths;

// Re-exports for cleaner API access
pub use hdnode::{get_identity, get_key_pair, get_key_pair_with, get_key_pairs, Identity, KeyPair};
pub use key_deriver::KeyNode;
pub use keytool::KeyTool;
pub use mnemonic::{IdentityMnemonic, WordCount};
pub use paths::{coin_type, DerivationPaths};
