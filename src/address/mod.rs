//! Account Address Codec
//!
//! Derives bech32 account addresses for Cosmos SDK chains from raw public
//! key material, parameterised by the chain's human-readable prefix (HRP).
//!
//! - Single key: `bech32(hrp, RIPEMD160(SHA256(compressed_pubkey)))`
//! - Multisig: `bech32(hrp, SHA256(amino(threshold_pubkey))[..20])`
//!
//! Multisig sub-key order is part of the key's identity. Keys are only
//! reordered when the caller asks for it.

pub mod amino;

use amino::SECP256K1_PUBKEY_LEN;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bech32::{self, FromBase32, ToBase32, Variant};
use sha2::{Digest, Sha256};

/// Bytes kept from the multisig key hash
const MULTISIG_ADDRESS_LEN: usize = 20;

/// Longest HRP that still leaves room for data in a 90 char address
const MAX_PREFIX_LEN: usize = 83;

/// Error types for address derivation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid public key encoding: {0}")]
    InvalidPublicKeyEncoding(String),

    #[error("Invalid threshold {threshold} for {key_count} public keys")]
    InvalidThreshold { threshold: u32, key_count: usize },

    #[error("Address encoding failed: {0}")]
    EncodingFailure(String),
}

pub type AddressResult<T> = Result<T, AddressError>;

/// Derive the account address of a single secp256k1 public key
///
/// # Arguments
/// * `prefix` - Bech32 HRP of the target network (e.g. `cro`)
/// * `pub_key` - 33-byte compressed public key
pub fn single_key_address(prefix: &str, pub_key: &[u8]) -> AddressResult<String> {
    let key = parse_secp256k1_pub_key(pub_key)?;
    encode_address(prefix, &hash160(&key))
}

/// Derive the account address of a threshold multisig key set
///
/// # Arguments
/// * `prefix` - Bech32 HRP of the target network
/// * `pub_keys` - Compressed secp256k1 sub-keys, in chain order
/// * `threshold` - Signatures required, `1..=pub_keys.len()`
/// * `sort_pub_keys` - Sort sub-keys by their own address bytes first
pub fn multisig_address<K: AsRef<[u8]>>(
    prefix: &str,
    pub_keys: &[K],
    threshold: u32,
    sort_pub_keys: bool,
) -> AddressResult<String> {
    let encoded = multisig_pub_key_bytes(pub_keys, threshold, sort_pub_keys)?;

    let digest = Sha256::digest(&encoded);
    encode_address(prefix, &digest[..MULTISIG_ADDRESS_LEN])
}

/// Amino bytes of the threshold multisig public key
pub fn multisig_pub_key_bytes<K: AsRef<[u8]>>(
    pub_keys: &[K],
    threshold: u32,
    sort_pub_keys: bool,
) -> AddressResult<Vec<u8>> {
    validate_threshold(threshold, pub_keys.len())?;

    let mut keys = pub_keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            parse_secp256k1_pub_key(key.as_ref()).map_err(|e| match e {
                AddressError::InvalidPublicKeyEncoding(msg) => {
                    AddressError::InvalidPublicKeyEncoding(format!("sub-key {}: {}", i, msg))
                }
                other => other,
            })
        })
        .collect::<AddressResult<Vec<_>>>()?;

    if sort_pub_keys {
        keys.sort_by_cached_key(|key| hash160(key));
    }

    Ok(amino::encode_multisig_threshold_pub_key(threshold, &keys))
}

/// Decode a base64 (standard alphabet, padded) public key
pub fn decode_base64_key(encoded: &str) -> AddressResult<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .map_err(|e| AddressError::InvalidPublicKeyEncoding(format!("Invalid base64: {}", e)))
}

/// Split a bech32 address into its prefix and payload bytes
pub fn decode_address(address: &str) -> AddressResult<(String, Vec<u8>)> {
    let (hrp, data, variant) = bech32::decode(address)
        .map_err(|e| AddressError::EncodingFailure(format!("Bech32 decoding failed: {}", e)))?;

    if variant != Variant::Bech32 {
        return Err(AddressError::EncodingFailure(
            "Account addresses use bech32, not bech32m".to_string(),
        ));
    }

    let bytes = Vec::<u8>::from_base32(&data)
        .map_err(|e| AddressError::EncodingFailure(format!("Invalid address payload: {}", e)))?;

    Ok((hrp, bytes))
}

/// Check that a prefix is usable as a bech32 HRP
///
/// Mixed case is rejected by bech32 itself; uppercase is rejected here so
/// that configured prefixes match the addresses they produce.
pub fn validate_prefix(prefix: &str) -> AddressResult<()> {
    if prefix.is_empty() || prefix.len() > MAX_PREFIX_LEN {
        return Err(AddressError::EncodingFailure(format!(
            "Prefix must be 1-{} characters, got {}",
            MAX_PREFIX_LEN,
            prefix.len()
        )));
    }

    if let Some(c) = prefix.chars().find(|c| !(c.is_ascii_graphic() && !c.is_ascii_uppercase())) {
        return Err(AddressError::EncodingFailure(format!(
            "Invalid prefix character {:?} in {:?}",
            c, prefix
        )));
    }

    Ok(())
}

fn validate_threshold(threshold: u32, key_count: usize) -> AddressResult<()> {
    if threshold == 0 || threshold as usize > key_count {
        return Err(AddressError::InvalidThreshold { threshold, key_count });
    }
    Ok(())
}

fn parse_secp256k1_pub_key(bytes: &[u8]) -> AddressResult<[u8; SECP256K1_PUBKEY_LEN]> {
    let key: [u8; SECP256K1_PUBKEY_LEN] = bytes.try_into().map_err(|_| {
        AddressError::InvalidPublicKeyEncoding(format!(
            "Expected {} byte compressed secp256k1 key, got {} bytes",
            SECP256K1_PUBKEY_LEN,
            bytes.len()
        ))
    })?;

    secp256k1::PublicKey::from_slice(&key)
        .map_err(|e| AddressError::InvalidPublicKeyEncoding(format!("Not a secp256k1 point: {}", e)))?;

    Ok(key)
}

/// SHA256 then RIPEMD160 of the compressed public key
fn hash160(key: &[u8]) -> [u8; 20] {
    use bitcoin::hashes::{ripemd160, sha256, Hash};

    let sha256_hash = sha256::Hash::hash(key);
    ripemd160::Hash::hash(&sha256_hash[..]).to_byte_array()
}

fn encode_address(prefix: &str, payload: &[u8]) -> AddressResult<String> {
    validate_prefix(prefix)?;

    bech32::encode(prefix, payload.to_base32(), Variant::Bech32)
        .map_err(|e| AddressError::EncodingFailure(format!("Bech32 encoding failed: {}", e)))
}
