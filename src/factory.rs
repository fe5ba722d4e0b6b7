//! Random value factories for tests
//!
//! Plain functions over a caller-supplied RNG. Seed the RNG to make a test
//! reproducible; nothing here keeps state between calls.

use crate::types::{
    CompactBitArray, ModeInfo, MultiMode, PublicKeyInfo, SignerInfo, SingleMode, SubPublicKey,
    UtcTime,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::Rng;
use secp256k1::{PublicKey, Secp256k1, SecretKey};

pub const SECP256K1_PUBKEY_TYPE: &str = "/cosmos.crypto.secp256k1.PubKey";
pub const MULTISIG_PUBKEY_TYPE: &str = "/cosmos.crypto.multisig.LegacyAminoPubKey";

/// Random time between the Unix epoch and the end of the `i64` range
pub fn random_utc_time<R: Rng + ?Sized>(rng: &mut R) -> UtcTime {
    UtcTime::from_unix_nano(rng.gen_range(0..i64::MAX))
}

/// Random account sequence as the chain encodes it
pub fn random_sequence<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen::<u64>().to_string()
}

/// Compressed public key of a random valid secret key
pub fn random_secp256k1_pub_key<R: Rng + ?Sized>(rng: &mut R) -> [u8; 33] {
    let secp = Secp256k1::signing_only();
    loop {
        let bytes: [u8; 32] = rng.gen();
        // Zero and values above the curve order are rejected; retry
        if let Ok(secret) = SecretKey::from_slice(&bytes) {
            return PublicKey::from_secret_key(&secp, &secret).serialize();
        }
    }
}

/// Single-mode signer with a random key
pub fn random_single_signer_info<R: Rng + ?Sized>(rng: &mut R) -> SignerInfo {
    SignerInfo {
        sequence: random_sequence(rng),
        mode_info: ModeInfo::Single(SingleMode {
            mode: "SIGN_MODE_DIRECT".to_string(),
        }),
        maybe_public_key: Some(PublicKeyInfo {
            key_type: SECP256K1_PUBKEY_TYPE.to_string(),
            maybe_key: Some(STANDARD.encode(random_secp256k1_pub_key(rng))),
            maybe_public_keys: None,
            maybe_threshold: None,
        }),
    }
}

/// Multi-mode signer with `key_count` random keys and the given threshold
pub fn random_multisig_signer_info<R: Rng + ?Sized>(
    rng: &mut R,
    key_count: usize,
    threshold: u32,
) -> SignerInfo {
    let sub_keys: Vec<SubPublicKey> = (0..key_count)
        .map(|_| SubPublicKey {
            key_type: SECP256K1_PUBKEY_TYPE.to_string(),
            key: STANDARD.encode(random_secp256k1_pub_key(rng)),
        })
        .collect();

    let mode_infos = (0..threshold)
        .map(|_| {
            ModeInfo::Single(SingleMode {
                mode: "SIGN_MODE_LEGACY_AMINO_JSON".to_string(),
            })
        })
        .collect();

    SignerInfo {
        sequence: random_sequence(rng),
        mode_info: ModeInfo::Multi(MultiMode {
            bitarray: CompactBitArray {
                extra_bits_stored: key_count as u32,
                elems: STANDARD.encode(random_bit_elems(rng, key_count)),
            },
            mode_infos,
        }),
        maybe_public_key: Some(PublicKeyInfo {
            key_type: MULTISIG_PUBKEY_TYPE.to_string(),
            maybe_key: None,
            maybe_public_keys: Some(sub_keys),
            maybe_threshold: Some(threshold),
        }),
    }
}

fn random_bit_elems<R: Rng + ?Sized>(rng: &mut R, bits: usize) -> Vec<u8> {
    (0..bits.div_ceil(8)).map(|_| rng.gen()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_factories_are_reproducible() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        assert_eq!(random_utc_time(&mut a), random_utc_time(&mut b));
        assert_eq!(random_single_signer_info(&mut a), random_single_signer_info(&mut b));
    }

    #[test]
    fn test_random_utc_time_is_not_negative() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(random_utc_time(&mut rng).unix_nano() >= 0);
        }
    }

    #[test]
    fn test_random_multisig_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let info = random_multisig_signer_info(&mut rng, 3, 2);

        let public_key = info.maybe_public_key.unwrap();
        assert_eq!(public_key.maybe_public_keys.unwrap().len(), 3);
        assert_eq!(public_key.maybe_threshold, Some(2));
        match info.mode_info {
            ModeInfo::Multi(multi) => assert_eq!(multi.mode_infos.len(), 2),
            ModeInfo::Single(_) => panic!("expected multi mode"),
        }
    }
}
