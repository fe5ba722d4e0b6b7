//! Transaction Parsing Module
//!
//! Turns decoded chain transaction data into the canonical records the
//! indexer embeds in its commands.
//!
//! Currently covers the signer list of `auth_info`:
//! - sequence parsing (strict decimal `u64`)
//! - single-key and multisig address resolution
//! - positional, all-or-nothing batches

pub mod signers;

pub use signers::{
    parse_signer_infos, parse_signer_infos_json, parse_account_sequence,
    transaction_signer_address,
};

use crate::address::AddressError;

/// Error types for signer parsing
///
/// Every variant carries the position of the offending signer so callers
/// can correlate it with the transaction's signature list.
#[derive(Debug, thiserror::Error)]
pub enum SignerParseError {
    #[error("Error parsing account sequence of signer {index}: {value:?} is not an unsigned 64-bit integer")]
    MalformedSequence { index: usize, value: String },

    #[error("Signer {index} has no public key material: {reason}")]
    MissingPublicKey { index: usize, reason: &'static str },

    #[error("Error parsing signer {index} info to address: {source}")]
    Address {
        index: usize,
        #[source]
        source: AddressError,
    },

    #[error("Invalid signer infos JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SignerParseError {
    /// Position of the failing signer, if the failure is tied to one
    pub fn signer_index(&self) -> Option<usize> {
        match self {
            SignerParseError::MalformedSequence { index, .. }
            | SignerParseError::MissingPublicKey { index, .. }
            | SignerParseError::Address { index, .. } => Some(*index),
            SignerParseError::Json(_) => None,
        }
    }
}

pub type SignerParseResult<T> = Result<T, SignerParseError>;
