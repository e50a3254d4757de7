use thiserror::Error;

pub type IdentityResult<T> = std::result::Result<T, IdentityError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Encoding Error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Provider Error: {0}")]
    Provider(String),
}

/// Everything in here surfaces as "invalid mnemonic" to callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected at least 12 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Public key recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("Invalid account identifier: {0}")]
    InvalidAccountId(String),
}

impl IdentityError {
    /// True for every failure caused by a bad mnemonic phrase.
    pub fn is_invalid_mnemonic(&self) -> bool {
        matches!(self, IdentityError::Mnemonic(_))
    }

    pub fn is_invalid_private_key(&self) -> bool {
        matches!(self, IdentityError::Crypto(CryptoError::InvalidPrivateKey(_)))
    }
}
