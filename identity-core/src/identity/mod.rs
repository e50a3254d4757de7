// identity-core/src/identity/mod.rs

//! Network Identity Encoding
//!
//! Turns a secp256k1 public key into the identifiers the network understands:
//!
//! - **DER**: fixed-prefix SubjectPublicKeyInfo via [`der_encode`] / [`der_decode`].
//! - **Principal**: self-authenticating identifier over the DER key via [`Principal`].
//! - **Account Identifier**: checksummed SHA-224 over principal + subaccount via [`AccountIdentifier`].
//!
//! ```text
//! raw key (65B) ──DER──▶ der (88B) ──SHA-224 ‖ 0x02──▶ principal (29B)
//!                                                        │
//!             CRC-32-BE ‖ SHA-224(0x0A "account-id" ‖ principal ‖ 0³²) ──▶ account id (32B)
//! ```

pub mod account_id;
pub mod der;
pub mod principal;

pub use account_id::{AccountIdentifier, Subaccount};
pub use der::{der_decode, der_encode, Secp256k1PublicKey, DER_KEY_LENGTH, DER_PREFIX, RAW_KEY_LENGTH};
pub use principal::Principal;

use crate::error::IdentityResult;

/// Principal text for a DER-encoded secp256k1 public key.
///
/// The key is decoded first, so malformed DER fails with the codec's
/// `InvalidKeyLength` / `InvalidEncoding` errors.
pub fn derive_principal(der_key: &[u8]) -> IdentityResult<String> {
    let public_key = Secp256k1PublicKey::from_der(der_key)?;
    Ok(Principal::from_public_key(&public_key).to_text())
}

/// Default-subaccount account identifier (64 hex chars) for a DER-encoded key.
pub fn derive_account_id(der_key: &[u8]) -> IdentityResult<String> {
    let public_key = Secp256k1PublicKey::from_der(der_key)?;
    let principal = Principal::from_public_key(&public_key);
    Ok(AccountIdentifier::from_principal(&principal).to_hex())
}
