//! Signer Info Parsing
//!
//! Resolves the `auth_info.signer_infos` of a transaction into
//! [`TransactionSigner`] records. Output order always mirrors input order,
//! and one bad entry fails the whole list: downstream consumers index
//! signers by position.
//!
//! A single-mode signer without a public key is recorded with an empty
//! address and no key info. The key can only be recovered from the
//! transaction's messages, which this parser does not look at.

use super::{SignerParseError, SignerParseResult};
use crate::address::{self, AddressError, AddressResult};
use crate::types::{ModeInfo, SignerInfo, TransactionSigner, TransactionSignerKeyInfo};
use crate::{log_debug, log_warn};

const MODULE: &str = "parser::signers";

/// Parse a transaction's signer descriptors into canonical signers
///
/// # Arguments
/// * `signer_infos` - Signer descriptors in chain order
/// * `account_address_prefix` - Bech32 HRP of the network (e.g. `cro`)
///
/// # Returns
/// One [`TransactionSigner`] per descriptor, in the same order, or the
/// first error encountered.
pub fn parse_signer_infos(
    signer_infos: &[SignerInfo],
    account_address_prefix: &str,
) -> SignerParseResult<Vec<TransactionSigner>> {
    let mut signers = Vec::with_capacity(signer_infos.len());

    for (index, signer) in signer_infos.iter().enumerate() {
        let account_sequence = parse_account_sequence(&signer.sequence).ok_or_else(|| {
            SignerParseError::MalformedSequence {
                index,
                value: signer.sequence.clone(),
            }
        })?;

        let maybe_key_info = signer_key_info(index, signer)?;

        let address = match &maybe_key_info {
            Some(key_info) => transaction_signer_address(key_info, account_address_prefix)
                .map_err(|source| {
                    log_warn!(MODULE, "Signer address derivation failed", index = index, error = source);
                    SignerParseError::Address { index, source }
                })?,
            None => {
                log_debug!(
                    MODULE,
                    "Single-mode signer carries no public key, address deferred",
                    index = index,
                    sequence = account_sequence,
                );
                String::new()
            }
        };

        signers.push(TransactionSigner {
            maybe_key_info,
            address,
            account_sequence,
        });
    }

    Ok(signers)
}

/// Parse the JSON `signer_infos` array of a decoded transaction
pub fn parse_signer_infos_json(
    json: &str,
    account_address_prefix: &str,
) -> SignerParseResult<Vec<TransactionSigner>> {
    let signer_infos: Vec<SignerInfo> = serde_json::from_str(json)?;
    parse_signer_infos(&signer_infos, account_address_prefix)
}

/// Derive the address of an already normalized signer key info
///
/// Keys are base64 text. Multisig keys are used in the given order.
pub fn transaction_signer_address(
    key_info: &TransactionSignerKeyInfo,
    account_address_prefix: &str,
) -> AddressResult<String> {
    if key_info.is_multi_sig {
        let raw_keys = key_info
            .pubkeys
            .iter()
            .map(|key| address::decode_base64_key(key))
            .collect::<AddressResult<Vec<_>>>()?;

        let threshold = key_info.maybe_threshold.ok_or(AddressError::InvalidThreshold {
            threshold: 0,
            key_count: raw_keys.len(),
        })?;

        address::multisig_address(account_address_prefix, &raw_keys, threshold, false)
    } else {
        let key = key_info.pubkeys.first().ok_or_else(|| {
            AddressError::InvalidPublicKeyEncoding("Signer key info has no public key".to_string())
        })?;

        let raw_key = address::decode_base64_key(key)?;
        address::single_key_address(account_address_prefix, &raw_key)
    }
}

/// Parse an account sequence as a strict decimal `u64`
///
/// Only ASCII digits are accepted: no sign, whitespace or radix prefix.
pub fn parse_account_sequence(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn signer_key_info(
    index: usize,
    signer: &SignerInfo,
) -> SignerParseResult<Option<TransactionSignerKeyInfo>> {
    match (&signer.mode_info, &signer.maybe_public_key) {
        (ModeInfo::Single(_), None) => Ok(None),
        (ModeInfo::Single(_), Some(public_key)) => {
            let key = public_key.maybe_key.as_ref().ok_or(SignerParseError::MissingPublicKey {
                index,
                reason: "single-mode public key has no key",
            })?;

            Ok(Some(TransactionSignerKeyInfo::single(
                public_key.key_type.clone(),
                key.clone(),
            )))
        }
        (ModeInfo::Multi(_), None) => Err(SignerParseError::MissingPublicKey {
            index,
            reason: "multi-mode signer has no public key",
        }),
        (ModeInfo::Multi(_), Some(public_key)) => {
            let sub_keys = public_key.maybe_public_keys.as_ref().ok_or(
                SignerParseError::MissingPublicKey {
                    index,
                    reason: "multi-mode public key has no key set",
                },
            )?;

            let pubkeys: Vec<String> = sub_keys.iter().map(|sub_key| sub_key.key.clone()).collect();

            let threshold = public_key.maybe_threshold.ok_or(SignerParseError::Address {
                index,
                source: AddressError::InvalidThreshold {
                    threshold: 0,
                    key_count: pubkeys.len(),
                },
            })?;

            Ok(Some(TransactionSignerKeyInfo::multi_sig(
                public_key.key_type.clone(),
                pubkeys,
                threshold,
            )))
        }
    }
}
