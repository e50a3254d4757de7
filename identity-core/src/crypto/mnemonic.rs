// identity-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 gate cho identity derivation
// Chuẩn: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 (Seed Derivation)

use crate::error::{CryptoError, IdentityError, IdentityResult, MnemonicError};
use bip39::{Language, Mnemonic};
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Số lượng words hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Lấy số bytes entropy cần thiết
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }
}

/// Identity Mnemonic - validated BIP-39 phrase
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: Phrase được tự động ghi đè bằng 0 khi struct bị drop
/// - **CSPRNG**: Sử dụng `OsRng` khi generate
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
///
/// Một `IdentityMnemonic` chỉ tồn tại sau khi phrase đã qua word count,
/// wordlist và checksum. Mọi derivation phía sau chạy trên phrase đã validate.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct IdentityMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for IdentityMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl IdentityMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Tạo mnemonic mới với 12 words (128-bit entropy)
    pub fn new() -> IdentityResult<Self> {
        Self::with_word_count(WordCount::Twelve)
    }

    /// Tạo mnemonic với số lượng words tùy chỉnh
    pub fn with_word_count(word_count: WordCount) -> IdentityResult<Self> {
        let entropy_size = word_count.entropy_bytes();

        // Stack-allocated entropy buffer (max 32 bytes)
        let mut entropy = [0u8; 32];
        OsRng.fill_bytes(&mut entropy[..entropy_size]);

        let mnemonic = Mnemonic::from_entropy(&entropy[..entropy_size]);

        // Zeroize entropy ngay sau khi sử dụng
        entropy.zeroize();

        let mnemonic = mnemonic.map_err(map_bip39_error)?;
        Ok(Self {
            phrase: mnemonic.to_string(),
            word_count: word_count as usize,
        })
    }

    /// Khôi phục mnemonic từ phrase có sẵn
    ///
    /// # Validation
    /// - Kiểm tra số lượng words (12, 15, 18, 21, 24)
    /// - Kiểm tra từng word có trong BIP-39 wordlist
    /// - Kiểm tra checksum
    pub fn from_phrase(phrase: &str) -> IdentityResult<Self> {
        // Normalize whitespace và count words
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let count = normalized.len();

        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(IdentityError::Mnemonic(MnemonicError::InvalidWordCount(
                count,
            )));
        }

        let normalized_phrase = normalized.join(" ");
        Mnemonic::parse(normalized_phrase.as_str()).map_err(|e| match e {
            bip39::Error::UnknownWord(idx) => {
                // Chỉ báo vị trí, không echo lại từ của user
                IdentityError::Mnemonic(MnemonicError::UnknownWord(format!("#{}", idx + 1)))
            }
            other => map_bip39_error(other),
        })?;

        Ok(Self {
            phrase: normalized_phrase,
            word_count: count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Lấy mnemonic phrase
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// Tạo seed từ mnemonic (PBKDF2-HMAC-SHA512, 2048 rounds)
    ///
    /// # Returns
    /// 64-byte seed wrapped trong `Zeroizing` để tự động xóa khi drop
    pub fn to_seed_bytes(&self, passphrase: Option<&str>) -> IdentityResult<Zeroizing<[u8; 64]>> {
        let password = passphrase.unwrap_or("");
        let mnemonic = Mnemonic::parse(self.phrase.as_str()).map_err(map_bip39_error)?;
        Ok(Zeroizing::new(mnemonic.to_seed(password)))
    }

    /// Seed stretching trên blocking pool của tokio.
    ///
    /// PBKDF2 tốn CPU, nên không chạy trực tiếp trên async worker thread.
    ///
    /// # Panics
    /// Phải được poll bên trong một Tokio runtime (`spawn_blocking` panic nếu
    /// không có runtime hiện hành).
    pub async fn to_seed_async(
        &self,
        passphrase: Option<&str>,
    ) -> IdentityResult<Zeroizing<[u8; 64]>> {
        let mnemonic = self.clone();
        let passphrase = passphrase.map(|p| Zeroizing::new(p.to_owned()));

        tokio::task::spawn_blocking(move || {
            mnemonic.to_seed_bytes(passphrase.as_ref().map(|p| p.as_str()))
        })
        .await
        .map_err(|e| {
            IdentityError::Crypto(CryptoError::DerivationFailed(format!(
                "Seed derivation task failed: {}",
                e
            )))
        })?
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Kiểm tra xem phrase có hợp lệ không
    ///
    /// Thực hiện đầy đủ validation: word count, wordlist, checksum
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }

    /// Kiểm tra một từ có trong BIP-39 English wordlist không
    #[inline]
    pub fn is_valid_word(word: &str) -> bool {
        Language::English.find_word(word).is_some()
    }
}

fn map_bip39_error(e: bip39::Error) -> IdentityError {
    match e {
        bip39::Error::BadWordCount(n) => {
            IdentityError::Mnemonic(MnemonicError::InvalidWordCount(n))
        }
        bip39::Error::InvalidChecksum => IdentityError::Mnemonic(MnemonicError::ChecksumFailed),
        other => IdentityError::Mnemonic(MnemonicError::Bip39Error(other.to_string())),
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Standard test mnemonic (from BIP-39 test vectors)
    const TEST_MNEMONIC_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const TEST_MNEMONIC_24: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";
    const TEST_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    #[test]
    fn test_new_12_words() {
        let mnemonic = IdentityMnemonic::new().unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert!(IdentityMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_new_24_words() {
        let mnemonic = IdentityMnemonic::with_word_count(WordCount::TwentyFour).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert!(IdentityMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_from_phrase_valid() {
        let mnemonic = IdentityMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        let mnemonic = IdentityMnemonic::from_phrase(TEST_MNEMONIC_24).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
    }

    #[test]
    fn test_from_phrase_normalizes_whitespace() {
        let messy_phrase =
            "  abandon  abandon   abandon abandon abandon abandon abandon abandon abandon abandon abandon about  ";
        let mnemonic = IdentityMnemonic::from_phrase(messy_phrase).unwrap();
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_12);
    }

    #[test]
    fn test_from_phrase_too_few_words() {
        let eleven = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        assert!(matches!(
            IdentityMnemonic::from_phrase(eleven),
            Err(IdentityError::Mnemonic(MnemonicError::InvalidWordCount(11)))
        ));
        assert!(matches!(
            IdentityMnemonic::from_phrase(""),
            Err(IdentityError::Mnemonic(MnemonicError::InvalidWordCount(0)))
        ));
    }

    #[test]
    fn test_from_phrase_unsupported_word_count() {
        let thirteen = format!("{} abandon", TEST_MNEMONIC_12);
        assert!(matches!(
            IdentityMnemonic::from_phrase(&thirteen),
            Err(IdentityError::Mnemonic(MnemonicError::InvalidWordCount(13)))
        ));
        let twenty_five = format!("{} abandon", TEST_MNEMONIC_24);
        assert!(matches!(
            IdentityMnemonic::from_phrase(&twenty_five),
            Err(IdentityError::Mnemonic(MnemonicError::InvalidWordCount(25)))
        ));
    }

    #[test]
    fn test_from_phrase_invalid_word() {
        let invalid = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon invalid";
        assert!(matches!(
            IdentityMnemonic::from_phrase(invalid),
            Err(IdentityError::Mnemonic(MnemonicError::UnknownWord(_)))
        ));
    }

    #[test]
    fn test_from_phrase_bad_checksum() {
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        let err = IdentityMnemonic::from_phrase(bad).unwrap_err();
        assert_eq!(err, IdentityError::Mnemonic(MnemonicError::ChecksumFailed));
        assert!(err.is_invalid_mnemonic());
    }

    #[test]
    fn test_to_seed_bytes() {
        let mnemonic = IdentityMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed = mnemonic.to_seed_bytes(None).unwrap();
        assert_eq!(hex::encode(*seed), TEST_SEED);
    }

    #[test]
    fn test_to_seed_with_passphrase() {
        let mnemonic = IdentityMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed_no_pass = mnemonic.to_seed_bytes(None).unwrap();
        let seed_with_pass = mnemonic.to_seed_bytes(Some("TREZOR")).unwrap();

        // Seeds phải khác nhau
        assert_ne!(&*seed_no_pass, &*seed_with_pass);
    }

    #[tokio::test]
    async fn test_to_seed_async_matches_sync() {
        let mnemonic = IdentityMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let sync_seed = mnemonic.to_seed_bytes(Some("TREZOR")).unwrap();
        let async_seed = mnemonic.to_seed_async(Some("TREZOR")).await.unwrap();
        assert_eq!(&*sync_seed, &*async_seed);
    }

    #[test]
    fn test_validate() {
        assert!(IdentityMnemonic::validate(TEST_MNEMONIC_12));
        assert!(IdentityMnemonic::validate(TEST_MNEMONIC_24));
        assert!(!IdentityMnemonic::validate("invalid mnemonic phrase"));
        assert!(!IdentityMnemonic::validate("abandon")); // Too few words
    }

    #[test]
    fn test_is_valid_word() {
        assert!(IdentityMnemonic::is_valid_word("abandon"));
        assert!(IdentityMnemonic::is_valid_word("zoo"));
        assert!(!IdentityMnemonic::is_valid_word("invalidword"));
        assert!(IdentityMnemonic::is_valid_word("hello"));
        assert!(!IdentityMnemonic::is_valid_word("helloo"));
    }

    #[test]
    fn test_debug_does_not_leak_phrase() {
        let mnemonic = IdentityMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let debug_output = format!("{:?}", mnemonic);

        // Đảm bảo phrase KHÔNG xuất hiện trong debug output
        assert!(!debug_output.contains("abandon"));
        assert!(debug_output.contains("REDACTED"));
        assert!(debug_output.contains("word_count: 12"));
    }

    #[test]
    fn test_unique_generation() {
        let m1 = IdentityMnemonic::new().unwrap();
        let m2 = IdentityMnemonic::new().unwrap();
        assert_ne!(m1.phrase(), m2.phrase());
    }
}
