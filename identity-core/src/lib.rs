// identity-core/src/lib.rs

//! Deterministic identity derivation for the Internet Computer and EVM chains.
//!
//! ```text
//! mnemonic ─▶ seed ─▶ m/44'/223'/0'/0/{i} ─▶ secp256k1 key pair
//!                                              │
//!                     ┌────────────────────────┼──────────────────────┐
//!                     ▼                        ▼                      ▼
//!               DER public key          Keccak-256(X‖Y)        compressed key
//!                     │                        │
//!                     ▼                        ▼
//!          self-authenticating principal   EVM address
//!                     │
//!                     ▼
//!           account identifier
//! ```
//!
//! Entry points: [`crypto::get_key_pair`], [`crypto::Identity`],
//! [`identity::derive_principal`], [`identity::derive_account_id`] and the
//! flat string facade in [`api`].
//!
//! The async entry points offload seed stretching with `spawn_blocking` and
//! must run inside a Tokio runtime.

pub mod api;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod provider;

pub use config::DerivationConfig;
pub use error::{CryptoError, EncodingError, IdentityError, IdentityResult, MnemonicError};
pub use provider::{ExternalIdentity, SignatureProvider};
