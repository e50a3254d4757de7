// identity-core/src/crypto/hdnode.rs
//
// HD Front-End - Mnemonic + index → KeyPair / Identity
//
// Pipeline:
//   mnemonic ──(validate)──▶ seed (PBKDF2, blocking pool)
//            ──▶ m ──▶ m/44'/223'/0'            ──▶ extended public key
//                      └──▶ m/44'/223'/0'/0/{i}  ──▶ private key ──▶ public keys
//
// Cả hai node (account + leaf) đều nằm trong KeyNode, bị wipe ngay sau khi
// lấy xong dữ liệu cần thiết, và chắc chắn bị wipe khi return sớm vì lỗi.

use super::key_deriver::{validate_seed, KeyNode};
use super::keytool::KeyTool;
use super::mnemonic::IdentityMnemonic;
use crate::chains::evm::EvmAddress;
use crate::config::DerivationConfig;
use crate::error::IdentityResult;
use crate::identity::{AccountIdentifier, Principal};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// =============================================================================
// KEY PAIR
// =============================================================================

/// Output of [`get_key_pair`].
///
/// `private_key` là hex 64 ký tự; struct tự zeroize khi drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub private_key: String,
    /// Uncompressed, `04‖X‖Y` (130 hex chars)
    pub public_key: String,
    /// `02|03‖X` (66 hex chars)
    pub public_key_compressed: String,
    /// `xpub…` of the account node
    pub extended_public_key: String,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị private key
impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .field("public_key_compressed", &self.public_key_compressed)
            .field("extended_public_key", &self.extended_public_key)
            .finish()
    }
}

// =============================================================================
// IDENTITY BUNDLE
// =============================================================================

/// Public identity for one key: DER-derived principal, default-subaccount
/// account identifier and EVM address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub public_key: String,
    pub public_key_compressed: String,
    pub principal: String,
    pub account_id: String,
    /// EIP-55 checksummed, `0x`-prefixed
    pub address: String,
}

impl Identity {
    /// Build from a compressed or uncompressed public key.
    pub fn from_public_key(public_key_hex: &str) -> IdentityResult<Self> {
        let tool = KeyTool::new();
        let public_key = tool.uncompressed_public_key(public_key_hex)?;
        let public_key_compressed = tool.compressed_public_key(&public_key)?;

        let der = tool.der_public_key(&public_key)?;
        let principal = Principal::from_public_key(&der);
        let account_id = AccountIdentifier::from_principal(&principal);
        let address = EvmAddress::to_checksum(&tool.derive_address(&public_key, false)?)?;

        Ok(Self {
            public_key,
            public_key_compressed,
            principal: principal.to_text(),
            account_id: account_id.to_hex(),
            address,
        })
    }

    /// Build from a raw private key (64 hex, optional `0x`), no mnemonic.
    pub fn from_private_key(private_key_hex: &str) -> IdentityResult<Self> {
        let public_key = KeyTool::new().derive_public_key(private_key_hex, false)?;
        Self::from_public_key(&public_key)
    }

    #[inline]
    pub fn from_key_pair(key_pair: &KeyPair) -> IdentityResult<Self> {
        Self::from_public_key(&key_pair.public_key)
    }
}

// =============================================================================
// ASYNC FRONT-END
// =============================================================================

/// Key pair for `m/44'/223'/0'/0/{account_index}`.
///
/// Phrase phải có ít nhất 12 words và qua BIP-39 checksum, nếu không trả về
/// `IdentityError::Mnemonic` trước khi bắt đầu derive.
///
/// Seed stretching chạy qua `tokio::task::spawn_blocking`, nên future này
/// phải được poll bên trong một Tokio runtime.
pub async fn get_key_pair(mnemonic: &str, account_index: u32) -> IdentityResult<KeyPair> {
    get_key_pair_with(mnemonic, account_index, &DerivationConfig::default()).await
}

/// [`get_key_pair`] with explicit coin type, account or passphrase.
#[tracing::instrument(
    skip_all,
    fields(index = account_index, coin_type = config.coin_type, account = config.account)
)]
pub async fn get_key_pair_with(
    mnemonic: &str,
    account_index: u32,
    config: &DerivationConfig,
) -> IdentityResult<KeyPair> {
    config.validate()?;
    let seed = stretch_seed(mnemonic, config).await?;
    derive_from_seed(&seed[..], config, account_index)
}

/// Key pairs for a range of indices; the seed is stretched once.
#[tracing::instrument(skip_all, fields(start = indices.start, end = indices.end))]
pub async fn get_key_pairs(
    mnemonic: &str,
    indices: Range<u32>,
    config: &DerivationConfig,
) -> IdentityResult<Vec<KeyPair>> {
    config.validate()?;
    let seed = stretch_seed(mnemonic, config).await?;
    derive_range_from_seed(&seed[..], config, indices)
}

/// Full [`Identity`] for a mnemonic and index.
pub async fn get_identity(mnemonic: &str, account_index: u32) -> IdentityResult<Identity> {
    let key_pair = get_key_pair(mnemonic, account_index).await?;
    Identity::from_key_pair(&key_pair)
}

async fn stretch_seed(
    mnemonic: &str,
    config: &DerivationConfig,
) -> IdentityResult<Zeroizing<[u8; 64]>> {
    let mnemonic = IdentityMnemonic::from_phrase(mnemonic)?;
    let seed = mnemonic.to_seed_async(config.passphrase.as_deref()).await?;
    tracing::debug!(words = mnemonic.word_count(), "seed stretched");
    Ok(seed)
}

// =============================================================================
// SYNC CORE
// =============================================================================

/// Derive the key pair for `index` from an already-stretched seed.
pub fn derive_from_seed(
    seed: &[u8],
    config: &DerivationConfig,
    index: u32,
) -> IdentityResult<KeyPair> {
    validate_seed(seed)?;
    let root = KeyNode::master(seed)?;
    let mut account = root.derive_path(&config.account_path())?;
    let mut leaf = account.derive_path(&config.leaf_path(index))?;

    let private_key = leaf_private_key_hex(&leaf)?;
    leaf.wipe();

    let extended_public_key = account.extended_public_key()?;
    account.wipe();

    tracing::debug!(path = %config.leaf_path(index), "key pair derived");
    assemble(private_key, extended_public_key)
}

/// Derive key pairs for every index in `indices`, walking the account node once.
pub fn derive_range_from_seed(
    seed: &[u8],
    config: &DerivationConfig,
    indices: Range<u32>,
) -> IdentityResult<Vec<KeyPair>> {
    validate_seed(seed)?;
    let root = KeyNode::master(seed)?;
    let mut account = root.derive_path(&config.account_path())?;
    let extended_public_key = account.extended_public_key()?;
    let mut external = account.derive_child(0, false)?;
    account.wipe();

    let mut key_pairs = Vec::with_capacity(indices.len());
    for index in indices {
        let mut leaf = external.derive_child(index, false)?;
        let private_key = leaf_private_key_hex(&leaf)?;
        leaf.wipe();
        key_pairs.push(assemble(private_key, extended_public_key.clone())?);
    }
    external.wipe();

    tracing::debug!(count = key_pairs.len(), "key pairs derived");
    Ok(key_pairs)
}

fn leaf_private_key_hex(leaf: &KeyNode) -> IdentityResult<Zeroizing<String>> {
    let key_bytes = leaf.private_key_bytes()?;
    Ok(Zeroizing::new(hex::encode(&key_bytes[..])))
}

fn assemble(
    private_key: Zeroizing<String>,
    extended_public_key: String,
) -> IdentityResult<KeyPair> {
    let tool = KeyTool::new();
    let public_key = tool.derive_public_key(&private_key, false)?;
    let public_key_compressed = tool.derive_public_key(&private_key, true)?;

    Ok(KeyPair {
        private_key: private_key.as_str().to_owned(),
        public_key,
        public_key_compressed,
        extended_public_key,
    })
}

// =============================================================================
// TESTS
// =============================================================================
