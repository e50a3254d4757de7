// identity-core/src/provider.rs
//
// External signature providers (browser wallet, hardware wallet, local key)
//
// Identity được suy ra hoàn toàn từ chữ ký: provider ký message theo
// EIP-191, ta recover public key rồi derive principal / account id / address.
// Không cần, và không bao giờ chạm vào, private key của provider.

use crate::crypto::hdnode::Identity;
use crate::crypto::keytool::KeyTool;
use crate::error::IdentityResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// PROVIDER TRAIT
// =============================================================================

/// Anything that can produce an EIP-191 personal-sign signature.
///
/// # Contract
/// - `payload` là message gốc (chưa prefix, chưa hash)
/// - Trả về 65 bytes `r ‖ s ‖ v`, `v` ∈ {0, 1, 27, 28}
#[async_trait]
pub trait SignatureProvider: Send + Sync {
    async fn request_signature(&self, payload: &[u8]) -> IdentityResult<Vec<u8>>;
}

// =============================================================================
// EXTERNAL IDENTITY
// =============================================================================

/// Identity recovered from a provider signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIdentity {
    /// `r ‖ s ‖ v` hex
    pub signature: String,
    #[serde(flatten)]
    pub identity: Identity,
}

impl ExternalIdentity {
    /// Ask `provider` to sign `message`, then derive the identity of whoever signed.
    #[tracing::instrument(skip_all, fields(message_len = message.len()))]
    pub async fn from_provider<P>(provider: &P, message: &[u8]) -> IdentityResult<Self>
    where
        P: SignatureProvider + ?Sized,
    {
        let signature = hex::encode(provider.request_signature(message).await?);
        let public_key = KeyTool::new().recover_public_key_from_signed_message(&signature, message)?;
        let identity = Identity::from_public_key(&public_key)?;

        tracing::debug!(principal = %identity.principal, "external identity recovered");
        Ok(Self {
            signature,
            identity,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
