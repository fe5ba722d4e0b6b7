use base64::{engine::general_purpose::STANDARD, Engine as _};
use chain_indexing::address::{decode_address, multisig_address, single_key_address};
use chain_indexing::parser::{parse_account_sequence, parse_signer_infos, SignerParseError};
use chain_indexing::types::{ModeInfo, PublicKeyInfo, SignerInfo, SingleMode};
use proptest::prelude::*;
use secp256k1::{PublicKey, Secp256k1, SecretKey};

fn any_pub_key() -> impl Strategy<Value = Vec<u8>> {
    prop::array::uniform32(any::<u8>()).prop_filter_map("valid secp256k1 scalar", |bytes| {
        let secret = SecretKey::from_slice(&bytes).ok()?;
        Some(PublicKey::from_secret_key(&Secp256k1::new(), &secret).serialize().to_vec())
    })
}

fn any_prefix() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["cro", "tcro", "cosmos", "osmo", "crocncl"]).prop_map(String::from)
}

fn single_signer(sequence: String, key: &[u8]) -> SignerInfo {
    SignerInfo {
        sequence,
        mode_info: ModeInfo::Single(SingleMode {
            mode: "SIGN_MODE_DIRECT".to_string(),
        }),
        maybe_public_key: Some(PublicKeyInfo {
            key_type: "/cosmos.crypto.secp256k1.PubKey".to_string(),
            maybe_key: Some(STANDARD.encode(key)),
            maybe_public_keys: None,
            maybe_threshold: None,
        }),
    }
}

proptest! {
    #[test]
    fn sequences_roundtrip(sequence in any::<u64>()) {
        let text = sequence.to_string();
        let parsed = parse_account_sequence(&text);
        prop_assert_eq!(parsed, Some(sequence));
        prop_assert_eq!(parsed.map(|s| s.to_string()), Some(text));
    }

    #[test]
    fn single_key_addresses_are_deterministic(prefix in any_prefix(), key in any_pub_key()) {
        let first = single_key_address(&prefix, &key).expect("valid key");
        let second = single_key_address(&prefix, &key).expect("valid key");
        prop_assert_eq!(&first, &second);

        let (hrp, payload) = decode_address(&first).expect("valid bech32");
        prop_assert_eq!(hrp, prefix);
        prop_assert_eq!(payload.len(), 20);
    }

    #[test]
    fn multisig_threshold_is_part_of_address(
        keys in prop::collection::vec(any_pub_key(), 2..6),
        threshold_seed in any::<u32>(),
    ) {
        let key_count = keys.len() as u32;
        let threshold = threshold_seed % key_count + 1;
        let alternate = threshold % key_count + 1;
        prop_assume!(alternate != threshold);

        let original = multisig_address("cro", &keys, threshold, false).expect("valid multisig");
        let changed = multisig_address("cro", &keys, alternate, false).expect("valid multisig");
        prop_assert_ne!(original, changed);
    }

    #[test]
    fn multisig_key_order_is_part_of_address(
        keys in prop::collection::vec(any_pub_key(), 2..6),
        rotation in 1usize..5,
    ) {
        let mut permuted = keys.clone();
        permuted.rotate_left(rotation % keys.len());
        prop_assume!(permuted != keys);

        let original = multisig_address("cro", &keys, 1, false).expect("valid multisig");
        let reordered = multisig_address("cro", &permuted, 1, false).expect("valid multisig");
        prop_assert_ne!(original, reordered);
    }

    #[test]
    fn one_bad_sequence_fails_the_batch(
        keys in prop::collection::vec(any_pub_key(), 1..5),
        bad_position in any::<prop::sample::Index>(),
        bad_sequence in "[a-z+ -]{1,8}",
    ) {
        let mut infos: Vec<SignerInfo> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| single_signer(i.to_string(), key))
            .collect();
        let position = bad_position.index(infos.len());
        infos[position].sequence = bad_sequence;

        match parse_signer_infos(&infos, "cro") {
            Err(SignerParseError::MalformedSequence { index, .. }) => prop_assert_eq!(index, position),
            other => prop_assert!(false, "expected MalformedSequence, got {:?}", other),
        }
    }
}
