//! Legacy Amino encoding of public keys
//!
//! Multisig account addresses are the truncated SHA256 of the amino binary
//! encoding of the threshold public key, so the bytes produced here must
//! match Tendermint's `MarshalBinaryBare` exactly:
//!
//! ```text
//! PubKeyMultisigThreshold = 22 C1 F7 E2            registered type prefix
//!                           08 <uvarint k>         field 1: threshold
//!                           12 <len> <PubKey>      field 2: repeated, in order
//! PubKeySecp256k1         = EB 5A E9 87 21 <33 bytes>
//! ```

/// Amino prefix of `tendermint/PubKeyMultisigThreshold`
pub const MULTISIG_THRESHOLD_PREFIX: [u8; 4] = [0x22, 0xC1, 0xF7, 0xE2];

/// Amino prefix of `tendermint/PubKeySecp256k1`
pub const SECP256K1_PREFIX: [u8; 4] = [0xEB, 0x5A, 0xE9, 0x87];

/// Compressed secp256k1 public key length
pub const SECP256K1_PUBKEY_LEN: usize = 33;

const THRESHOLD_FIELD_KEY: u8 = 1 << 3; // varint
const PUBKEYS_FIELD_KEY: u8 = (2 << 3) | 2; // length-delimited

/// Amino encoding of a single compressed secp256k1 key
pub fn encode_secp256k1_pub_key(key: &[u8; SECP256K1_PUBKEY_LEN]) -> Vec<u8> {
    let mut out = Vec::with_capacity(SECP256K1_PREFIX.len() + 1 + SECP256K1_PUBKEY_LEN);
    out.extend_from_slice(&SECP256K1_PREFIX);
    put_uvarint(&mut out, SECP256K1_PUBKEY_LEN as u64);
    out.extend_from_slice(key);
    out
}

/// Amino encoding of a threshold multisig key
///
/// Sub-keys are written in the order given. Callers validate the threshold.
pub fn encode_multisig_threshold_pub_key(
    threshold: u32,
    keys: &[[u8; SECP256K1_PUBKEY_LEN]],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(MULTISIG_THRESHOLD_PREFIX.len() + 6 + keys.len() * 40);
    out.extend_from_slice(&MULTISIG_THRESHOLD_PREFIX);

    out.push(THRESHOLD_FIELD_KEY);
    put_uvarint(&mut out, u64::from(threshold));

    for key in keys {
        let encoded = encode_secp256k1_pub_key(key);
        out.push(PUBKEYS_FIELD_KEY);
        put_uvarint(&mut out, encoded.len() as u64);
        out.extend_from_slice(&encoded);
    }

    out
}

/// Unsigned LEB128 varint, as used by protobuf and amino
fn put_uvarint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}
