// identity-core/src/chains/evm/signer.rs
//
// Local EVM Signer - in-process SignatureProvider
// Hỗ trợ: EIP-191 (Personal Sign)

use crate::chains::evm::address::strip_0x;
use crate::error::{CryptoError, IdentityError, IdentityResult};
use crate::provider::SignatureProvider;
use alloy::{
    primitives::{Address, Signature},
    signers::{local::LocalSigner, Signer, SignerSync},
};
use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use zeroize::Zeroizing;

/// Local EVM Signer
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: `SigningKey` tự động ghi đè bộ nhớ bằng 0 khi Drop
/// - **No Debug Leak**: Custom Debug impl không hiển thị private key
///
/// # Performance
/// - **Cached Address**: Địa chỉ được tính toán một lần khi khởi tạo
pub struct LocalEvmSigner {
    signer: LocalSigner<SigningKey>,
    address: Address,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị private key
impl std::fmt::Debug for LocalEvmSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEvmSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl Drop for LocalEvmSigner {
    fn drop(&mut self) {
        // SigningKey bên trong sẽ tự động Zeroize
        tracing::trace!(address = %self.address, "local signer dropped");
    }
}

impl LocalEvmSigner {
    // =========================================================================
    // CONSTRUCTOR
    // =========================================================================

    /// Khởi tạo Signer với Private Key 32 bytes
    pub fn new(priv_key: &[u8]) -> IdentityResult<Self> {
        let signing_key = SigningKey::from_slice(priv_key).map_err(|e| {
            IdentityError::Crypto(CryptoError::InvalidPrivateKey(format!(
                "Invalid private key (must be 32 bytes): {}",
                e
            )))
        })?;

        let signer = LocalSigner::from(signing_key);
        let address = signer.address();

        Ok(Self { signer, address })
    }

    /// Khởi tạo từ private key hex (optional `0x`)
    pub fn from_private_key_hex(private_key_hex: &str) -> IdentityResult<Self> {
        let bytes = Zeroizing::new(hex::decode(strip_0x(private_key_hex.trim())).map_err(
            |e| IdentityError::Crypto(CryptoError::InvalidPrivateKey(format!("not hex: {}", e))),
        )?);
        Self::new(&bytes)
    }

    /// Lấy địa chỉ Ethereum (EIP-55 Checksum)
    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }

    // =========================================================================
    // MESSAGE SIGNING (EIP-191)
    // =========================================================================

    /// Ký thông điệp bất kỳ (EIP-191 Personal Sign)
    ///
    /// Tự động thêm prefix: "\x19Ethereum Signed Message:\n{len}{message}"
    pub async fn sign_message(&self, message: &[u8]) -> IdentityResult<Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| IdentityError::Crypto(CryptoError::SigningFailed(e.to_string())))
    }

    /// Ký thông điệp (Sync version)
    pub fn sign_message_sync(&self, message: &[u8]) -> IdentityResult<Signature> {
        self.signer
            .sign_message_sync(message)
            .map_err(|e| IdentityError::Crypto(CryptoError::SigningFailed(e.to_string())))
    }

    // =========================================================================
    // SIGNATURE VERIFICATION
    // =========================================================================

    /// Verify chữ ký của message (kiểm tra xem có đúng là signer này ký không)
    pub fn verify_message(&self, message: &[u8], signature: &Signature) -> bool {
        signature
            .recover_address_from_msg(message)
            .map(|recovered| recovered == self.address)
            .unwrap_or(false)
    }
}

#[async_trait]
impl SignatureProvider for LocalEvmSigner {
    async fn request_signature(&self, payload: &[u8]) -> IdentityResult<Vec<u8>> {
        let signature = self.sign_message(payload).await?;
        Ok(signature.as_bytes().to_vec())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
