//! Property-based tests for the identity encoding pipeline
//!
//! DER codec, principal / account identifier checksums, address shape and
//! HD derivation determinism over random inputs.

use identity_core::crypto::checksum::crc32_be;
use identity_core::crypto::hdnode::derive_from_seed;
use identity_core::crypto::KeyTool;
use identity_core::identity::{
    der_decode, der_encode, AccountIdentifier, Principal, Secp256k1PublicKey, DER_KEY_LENGTH,
    DER_PREFIX,
};
use identity_core::{DerivationConfig, EncodingError, IdentityError};
use proptest::prelude::*;

fn raw_key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 65)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: decode(encode(k)) == k for every 65-byte input
    #[test]
    fn prop_der_round_trip(raw in raw_key()) {
        let der = der_encode(&raw).unwrap();
        prop_assert_eq!(der.len(), DER_KEY_LENGTH);
        prop_assert_eq!(&der[..DER_PREFIX.len()], &DER_PREFIX[..]);
        prop_assert_eq!(der_decode(&der).unwrap().to_vec(), raw);
    }

    /// Property: any single-byte change in the prefix is rejected
    #[test]
    fn prop_der_prefix_corruption(
        raw in raw_key(),
        position in 0usize..23,
        mask in 1u8..=255,
    ) {
        let mut der = der_encode(&raw).unwrap();
        der[position] ^= mask;
        prop_assert!(matches!(
            der_decode(&der),
            Err(IdentityError::Encoding(EncodingError::InvalidEncoding(_)))
        ));
    }

    /// Property: encode only accepts 65 bytes, decode only 88
    #[test]
    fn prop_wrong_lengths_rejected(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        if bytes.len() != 65 {
            let encoded = der_encode(&bytes);
            let is_length_error = matches!(
                encoded,
                Err(IdentityError::Encoding(EncodingError::InvalidKeyLength { .. }))
            );
            prop_assert!(is_length_error);
        }
        if bytes.len() != 88 {
            let decoded = der_decode(&bytes);
            let is_length_error = matches!(
                decoded,
                Err(IdentityError::Encoding(EncodingError::InvalidKeyLength { .. }))
            );
            prop_assert!(is_length_error);
        }
    }

    /// Property: account id = CRC-32-BE(digest) ‖ digest, and parses back
    #[test]
    fn prop_account_id_checksum(raw in raw_key()) {
        let key = Secp256k1PublicKey::from_raw(&raw).unwrap();
        let principal = Principal::from_public_key(&key);
        let account_id = AccountIdentifier::from_principal(&principal);

        let bytes = account_id.to_bytes();
        prop_assert_eq!(&bytes[..4], &crc32_be(&bytes[4..])[..]);

        let text = account_id.to_hex();
        prop_assert_eq!(text.len(), 64);
        prop_assert_eq!(AccountIdentifier::from_hex(&text).unwrap(), account_id);
    }

    /// Property: principal text parses back and ends with the self-authenticating tag
    #[test]
    fn prop_principal_text_round_trip(raw in raw_key()) {
        let key = Secp256k1PublicKey::from_raw(&raw).unwrap();
        let principal = Principal::from_public_key(&key);
        prop_assert!(principal.is_self_authenticating());
        prop_assert_eq!(principal.as_slice().len(), 29);

        let text = principal.to_text();
        prop_assert_eq!(Principal::from_text(&text).unwrap(), principal);
    }

    /// Property: address is 40 hex chars for both key forms, and they agree
    #[test]
    fn prop_address_length(secret in any::<[u8; 32]>()) {
        let tool = KeyTool::new();
        let private_key = hex::encode(secret);
        prop_assume!(tool.is_valid_private_key(&private_key));

        let uncompressed = tool.derive_public_key(&private_key, false).unwrap();
        let compressed = tool.derive_public_key(&private_key, true).unwrap();
        prop_assert_eq!(uncompressed.len(), 130);
        prop_assert_eq!(compressed.len(), 66);

        let a = tool.derive_address(&uncompressed, false).unwrap();
        let b = tool.derive_address(&compressed, false).unwrap();
        prop_assert_eq!(a.len(), 40);
        prop_assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(tool.derive_address(&compressed, true).unwrap(), format!("0x{}", b));
    }

    /// Property: HD derivation is deterministic and index-sensitive
    #[test]
    fn prop_hd_determinism(seed in any::<[u8; 32]>(), i in 0u32..1000, j in 0u32..1000) {
        prop_assume!(i != j);
        // 64-byte seed from two 32-byte halves
        let mut full_seed = [0u8; 64];
        full_seed[..32].copy_from_slice(&seed);
        full_seed[32..].copy_from_slice(&seed);

        let config = DerivationConfig::default();
        let first = derive_from_seed(&full_seed, &config, i).unwrap();
        let again = derive_from_seed(&full_seed, &config, i).unwrap();
        let other = derive_from_seed(&full_seed, &config, j).unwrap();

        prop_assert_eq!(&first, &again);
        prop_assert_ne!(&first.private_key, &other.private_key);
        prop_assert_eq!(&first.extended_public_key, &other.extended_public_key);
    }
}
