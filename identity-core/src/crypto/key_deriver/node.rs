// identity-core/src/crypto/key_deriver/node.rs
//
// KeyNode - BIP-32 node với private material được wipe khi ra khỏi scope
//
// Mọi node trung gian (root, account, change, leaf) đều được giữ trong KeyNode.
// Khi KeyNode bị drop (return sớm vì lỗi, cancel future, panic unwind...),
// `SigningKey` bên trong tự ghi đè scalar bằng 0.

use crate::error::{CryptoError, IdentityError, IdentityResult};
use bip32::{ChildNumber, DerivationPath, Prefix, XPrv};
use std::str::FromStr;
use zeroize::Zeroizing;

/// Owned BIP-32 private node.
///
/// Not `Clone`, and `Debug` only shows the path.
pub struct KeyNode {
    xprv: Option<XPrv>,
    path: DerivationPath,
}

impl KeyNode {
    /// Master node (`m`) for a BIP-39 seed.
    pub fn master(seed: &[u8]) -> IdentityResult<Self> {
        let xprv = XPrv::new(seed).map_err(|e| {
            derivation_error(format!("Failed to create master key: {}", e))
        })?;
        Ok(Self {
            xprv: Some(xprv),
            path: DerivationPath::default(),
        })
    }

    /// Derive a descendant given its absolute path (e.g. `m/44'/223'/0'/0/0`).
    ///
    /// The target must extend this node's own path.
    pub fn derive_path(&self, path: &str) -> IdentityResult<Self> {
        let target = DerivationPath::from_str(path)
            .map_err(|e| derivation_error(format!("Invalid path '{}': {}", path, e)))?;

        let own: &[ChildNumber] = self.path.as_ref();
        let full: &[ChildNumber] = target.as_ref();
        if full.len() < own.len() || &full[..own.len()] != own {
            return Err(derivation_error(format!(
                "'{}' is not below '{}'",
                path, self.path
            )));
        }

        let mut child = self.xprv()?.clone();
        for child_num in &full[own.len()..] {
            // `child` cũ bị drop (và zeroize) ngay khi bị gán lại
            child = child
                .derive_child(*child_num)
                .map_err(|e| derivation_error(format!("Child derivation failed: {}", e)))?;
        }

        Ok(Self {
            xprv: Some(child),
            path: target,
        })
    }

    /// Derive one direct child.
    pub fn derive_child(&self, index: u32, hardened: bool) -> IdentityResult<Self> {
        let child_num = ChildNumber::new(index, hardened)
            .map_err(|e| derivation_error(format!("Invalid index {}: {}", index, e)))?;
        let child = self
            .xprv()?
            .derive_child(child_num)
            .map_err(|e| derivation_error(format!("Child derivation failed: {}", e)))?;

        let mut path = self.path.clone();
        path.push(child_num);
        Ok(Self {
            xprv: Some(child),
            path,
        })
    }

    /// 32-byte private scalar, auto-zeroize on drop.
    pub fn private_key_bytes(&self) -> IdentityResult<Zeroizing<[u8; 32]>> {
        let key_bytes: [u8; 32] = self.xprv()?.private_key().to_bytes().into();
        Ok(Zeroizing::new(key_bytes))
    }

    /// Base58check `xpub…` serialization of this node.
    pub fn extended_public_key(&self) -> IdentityResult<String> {
        Ok(self.xprv()?.public_key().to_string(Prefix::XPUB))
    }

    #[inline]
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    /// Drop the private material now. Idempotent.
    pub fn wipe(&mut self) {
        if self.xprv.is_some() {
            // Gán None → XPrv cũ bị drop tại chỗ, SigningKey tự zeroize
            self.xprv = None;
            tracing::trace!(path = %self.path, "key node wiped");
        }
    }

    #[inline]
    pub fn is_wiped(&self) -> bool {
        self.xprv.is_none()
    }

    fn xprv(&self) -> IdentityResult<&XPrv> {
        self.xprv.as_ref().ok_or_else(|| {
            derivation_error(format!("node '{}' has already been wiped", self.path))
        })
    }
}

impl Drop for KeyNode {
    fn drop(&mut self) {
        self.wipe();
    }
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị private key
impl std::fmt::Debug for KeyNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyNode")
            .field("path", &self.path.to_string())
            .field("wiped", &self.is_wiped())
            .finish_non_exhaustive()
    }
}

#[inline]
fn derivation_error(msg: String) -> IdentityError {
    IdentityError::Crypto(CryptoError::DerivationFailed(msg))
}

// =============================================================================
// TESTS
// =============================================================================
