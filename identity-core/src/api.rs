// identity-core/src/api.rs
//
// Flat API cho FFI / bridge callers: String in, String out.
// Mọi hàm ở đây chỉ là lớp mỏng gọi xuống crypto / identity / chains.

use crate::chains::evm::address::strip_0x;
use crate::crypto::{hdnode, IdentityMnemonic, KeyTool, WordCount};
use crate::error::{EncodingError, IdentityError, IdentityResult};
use crate::identity::{self, AccountIdentifier, Principal, Secp256k1PublicKey};
use tracing_subscriber::EnvFilter;

pub use crate::crypto::hdnode::{Identity, KeyPair};

// Core Initialization
/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"identity_core=info"`).
/// Gọi lại lần thứ hai là no-op.
pub fn init_core(default_filter: &str) -> IdentityResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| IdentityError::Config(format!("Invalid log filter: {}", e)))?;

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

// --- Mnemonic ---

pub fn create_mnemonic(word_count: u32) -> IdentityResult<String> {
    let count = match word_count {
        12 => WordCount::Twelve,
        15 => WordCount::Fifteen,
        18 => WordCount::Eighteen,
        21 => WordCount::TwentyOne,
        24 => WordCount::TwentyFour,
        other => {
            return rejected(
                "create_mnemonic",
                Err(IdentityError::Validation(format!(
                    "unsupported word count {}",
                    other
                ))),
            )
        }
    };
    Ok(IdentityMnemonic::with_word_count(count)?.phrase().to_owned())
}

#[inline]
pub fn validate_mnemonic(mnemonic: String) -> bool {
    IdentityMnemonic::validate(&mnemonic)
}

// --- HD derivation ---

pub async fn get_key_pair(mnemonic: String, account_index: u32) -> IdentityResult<KeyPair> {
    rejected(
        "get_key_pair",
        hdnode::get_key_pair(&mnemonic, account_index).await,
    )
}

pub async fn get_identity(mnemonic: String, account_index: u32) -> IdentityResult<Identity> {
    rejected(
        "get_identity",
        hdnode::get_identity(&mnemonic, account_index).await,
    )
}

pub fn identity_from_private_key(private_key: String) -> IdentityResult<Identity> {
    rejected(
        "identity_from_private_key",
        Identity::from_private_key(&private_key),
    )
}

// --- Curve key tool ---

#[inline]
pub fn is_valid_private_key(private_key: String) -> bool {
    KeyTool::new().is_valid_private_key(&private_key)
}

pub fn derive_public_key(private_key: String, compressed: bool) -> IdentityResult<String> {
    rejected(
        "derive_public_key",
        KeyTool::new().derive_public_key(&private_key, compressed),
    )
}

pub fn derive_address(public_key: String, with_0x: bool) -> IdentityResult<String> {
    rejected(
        "derive_address",
        KeyTool::new().derive_address(&public_key, with_0x),
    )
}

pub fn recover_public_key(signature: String, message: String) -> IdentityResult<String> {
    rejected(
        "recover_public_key",
        KeyTool::new().recover_public_key_from_signed_message(&signature, message.as_bytes()),
    )
}

// --- Network identity ---

/// Uncompressed public key hex → DER hex (176 chars).
pub fn der_encode_public_key(public_key: String) -> IdentityResult<String> {
    rejected(
        "der_encode_public_key",
        KeyTool::new()
            .der_public_key(&public_key)
            .map(|key| hex::encode(key.to_der())),
    )
}

/// DER hex → uncompressed public key hex.
pub fn der_decode_public_key(der_key: String) -> IdentityResult<String> {
    rejected(
        "der_decode_public_key",
        decode_hex(&der_key)
            .and_then(|der| Secp256k1PublicKey::from_der(&der))
            .map(|key| hex::encode(key.to_raw())),
    )
}

pub fn derive_principal(der_key: String) -> IdentityResult<String> {
    rejected(
        "derive_principal",
        decode_hex(&der_key).and_then(|der| identity::derive_principal(&der)),
    )
}

pub fn derive_account_id(der_key: String) -> IdentityResult<String> {
    rejected(
        "derive_account_id",
        decode_hex(&der_key).and_then(|der| identity::derive_account_id(&der)),
    )
}

/// Default-subaccount account identifier for a principal in text form.
pub fn principal_to_account_id(principal: String) -> IdentityResult<String> {
    rejected(
        "principal_to_account_id",
        Principal::from_text(&principal)
            .map(|p| AccountIdentifier::from_principal(&p).to_hex()),
    )
}

#[inline]
pub fn is_valid_account_id(account_id: String) -> bool {
    AccountIdentifier::from_hex(&account_id).is_ok()
}

// --- Helpers ---

fn decode_hex(value: &str) -> IdentityResult<Vec<u8>> {
    hex::decode(strip_0x(value.trim())).map_err(|e| {
        IdentityError::Encoding(EncodingError::InvalidEncoding(format!("not hex: {}", e)))
    })
}

fn rejected<T>(op: &'static str, result: IdentityResult<T>) -> IdentityResult<T> {
    if let Err(e) = &result {
        tracing::warn!(op, error = %e, "request rejected");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const INDEX_0_PUBLIC_KEY: &str = "04abdb60eb7c96408414d1e251d41ca0ecf89a4541768cba7eed8174c53246d58c56031b23388bc7d275b4b26bf29137bdc181ae4d6b6f64f30db8d4bfd9222c27";
    const INDEX_0_PRINCIPAL: &str =
        "tgzar-4lpln-fq34h-6hxo4-wlm3x-6g3or-6hxvr-d6jbw-ooh2b-lzsw4-aqe";
    const INDEX_0_ACCOUNT_ID: &str =
        "f24b889e8efba3d8008512e5f928af25be0fea33c9a44e161649f12912907cbd";

    #[test]
    fn test_init_core_is_idempotent() {
        assert!(init_core("identity_core=debug").is_ok());
        assert!(init_core("identity_core=debug").is_ok());
    }

    #[test]
    fn test_create_mnemonic() {
        let phrase = create_mnemonic(24).unwrap();
        assert_eq!(phrase.split_whitespace().count(), 24);
        assert!(validate_mnemonic(phrase));
        assert!(matches!(
            create_mnemonic(13),
            Err(IdentityError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_get_key_pair() {
        let key_pair = get_key_pair(TEST_MNEMONIC.to_string(), 0).await.unwrap();
        assert_eq!(key_pair.public_key, INDEX_0_PUBLIC_KEY);
        assert!(get_key_pair("abandon".to_string(), 0).await.is_err());
    }

    #[tokio::test]
    async fn test_get_identity() {
        let identity = get_identity(TEST_MNEMONIC.to_string(), 0).await.unwrap();
        assert_eq!(identity.principal, INDEX_0_PRINCIPAL);
        assert_eq!(identity.account_id, INDEX_0_ACCOUNT_ID);
    }

    #[test]
    fn test_der_string_pipeline() {
        let der = der_encode_public_key(INDEX_0_PUBLIC_KEY.to_string()).unwrap();
        assert_eq!(der.len(), 176);
        assert!(der.starts_with("3056301006072a8648ce3d020106052b8104000a034200"));

        assert_eq!(
            der_decode_public_key(der.clone()).unwrap(),
            INDEX_0_PUBLIC_KEY
        );
        assert_eq!(derive_principal(der.clone()).unwrap(), INDEX_0_PRINCIPAL);
        assert_eq!(derive_account_id(der).unwrap(), INDEX_0_ACCOUNT_ID);
    }

    #[test]
    fn test_principal_to_account_id() {
        assert_eq!(
            principal_to_account_id(INDEX_0_PRINCIPAL.to_string()).unwrap(),
            INDEX_0_ACCOUNT_ID
        );
        assert!(is_valid_account_id(INDEX_0_ACCOUNT_ID.to_string()));
        assert!(!is_valid_account_id("00".repeat(32)));
    }

    #[test]
    fn test_rejects_bad_hex() {
        assert!(matches!(
            derive_principal("zz".to_string()),
            Err(IdentityError::Encoding(EncodingError::InvalidEncoding(_)))
        ));
        assert!(derive_address("04".to_string(), false).is_err());
        assert!(!is_valid_private_key("00".repeat(32)));
    }
}
