//! Shared types for the indexing core
//!
//! All data structures that cross module boundaries are defined here
//! for consistent serialization. Input types follow the JSON shape a
//! Cosmos SDK node emits for `auth_info.signer_infos`; output types follow
//! the shape the event store persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Signer Descriptors (input)
// =============================================================================

/// Per-signer descriptor as supplied by the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerInfo {
    /// Account sequence as a decimal string
    pub sequence: String,
    pub mode_info: ModeInfo,
    /// Absent when the chain omits the key (recoverable from the messages)
    #[serde(rename = "public_key", default, skip_serializing_if = "Option::is_none")]
    pub maybe_public_key: Option<PublicKeyInfo>,
}

/// Signing mode of a signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeInfo {
    Single(SingleMode),
    Multi(MultiMode),
}

impl ModeInfo {
    pub fn is_single(&self) -> bool {
        matches!(self, ModeInfo::Single(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleMode {
    /// e.g. `SIGN_MODE_DIRECT`
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiMode {
    pub bitarray: CompactBitArray,
    /// One entry per sub-key that signed
    pub mode_infos: Vec<ModeInfo>,
}

/// Which sub-keys of a multisig contributed a signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactBitArray {
    pub extra_bits_stored: u32,
    /// Base64 encoded bit elements
    pub elems: String,
}

/// Public key container of a signer
///
/// Holds either a single base64 key (`maybe_key`) or, for multisig, the
/// ordered sub-keys and the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyInfo {
    /// Key algorithm type URL, e.g. `/cosmos.crypto.secp256k1.PubKey`
    #[serde(rename = "@type")]
    pub key_type: String,
    #[serde(rename = "key", default, skip_serializing_if = "Option::is_none")]
    pub maybe_key: Option<String>,
    #[serde(rename = "public_keys", default, skip_serializing_if = "Option::is_none")]
    pub maybe_public_keys: Option<Vec<SubPublicKey>>,
    #[serde(rename = "threshold", default, skip_serializing_if = "Option::is_none")]
    pub maybe_threshold: Option<u32>,
}

/// One member key of a multisig key set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPublicKey {
    #[serde(rename = "@type")]
    pub key_type: String,
    /// Base64 encoded key bytes
    pub key: String,
}

// =============================================================================
// Transaction Signers (output)
// =============================================================================

/// Normalized key material of a signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSignerKeyInfo {
    #[serde(rename = "type")]
    pub key_type: String,
    pub is_multi_sig: bool,
    /// Base64 keys in exactly the order the chain supplied them
    pub pubkeys: Vec<String>,
    /// Present iff `is_multi_sig`
    #[serde(rename = "threshold", default, skip_serializing_if = "Option::is_none")]
    pub maybe_threshold: Option<u32>,
}

impl TransactionSignerKeyInfo {
    pub fn single(key_type: impl Into<String>, pubkey: impl Into<String>) -> Self {
        Self {
            key_type: key_type.into(),
            is_multi_sig: false,
            pubkeys: vec![pubkey.into()],
            maybe_threshold: None,
        }
    }

    pub fn multi_sig(key_type: impl Into<String>, pubkeys: Vec<String>, threshold: u32) -> Self {
        Self {
            key_type: key_type.into(),
            is_multi_sig: true,
            pubkeys,
            maybe_threshold: Some(threshold),
        }
    }
}

/// Canonical signer record attached to an indexed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSigner {
    /// Absent when the address could not be resolved
    #[serde(rename = "keyInfo", default, skip_serializing_if = "Option::is_none")]
    pub maybe_key_info: Option<TransactionSignerKeyInfo>,
    /// Bech32 account address, empty when unresolved
    pub address: String,
    pub account_sequence: u64,
}

impl TransactionSigner {
    /// Whether the address was derived from key material
    pub fn is_resolved(&self) -> bool {
        self.maybe_key_info.is_some()
    }
}

// =============================================================================
// Common Types
// =============================================================================

/// Amount of a single denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    /// Integer amount as a decimal string
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// Point in time with nanosecond precision, always UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcTime(i64);

impl UtcTime {
    pub fn from_unix_nano(nanos: i64) -> Self {
        UtcTime(nanos)
    }

    pub fn unix_nano(&self) -> i64 {
        self.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

impl From<DateTime<Utc>> for UtcTime {
    fn from(time: DateTime<Utc>) -> Self {
        // Out of the i64 nanosecond range (before 1677 / after 2262)
        let nanos = time
            .timestamp_nanos_opt()
            .unwrap_or(if time.timestamp() < 0 { i64::MIN } else { i64::MAX });
        UtcTime(nanos)
    }
}

impl fmt::Display for UtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_datetime().format("%Y-%m-%dT%H:%M:%S%.9fZ"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_signer_info_from_json() {
        let json = r#"{
            "public_key": {
                "@type": "/cosmos.crypto.secp256k1.PubKey",
                "key": "AntL+UxMyJ9NZ9DGLp2v7a3dlSxiNXMaItyOXSRw8iYi"
            },
            "mode_info": { "single": { "mode": "SIGN_MODE_DIRECT" } },
            "sequence": "12"
        }"#;

        let info: SignerInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.sequence, "12");
        assert!(info.mode_info.is_single());

        let key = info.maybe_public_key.unwrap();
        assert_eq!(key.key_type, "/cosmos.crypto.secp256k1.PubKey");
        assert_eq!(key.maybe_key.as_deref(), Some("AntL+UxMyJ9NZ9DGLp2v7a3dlSxiNXMaItyOXSRw8iYi"));
        assert!(key.maybe_public_keys.is_none());
        assert!(key.maybe_threshold.is_none());
    }

    #[test]
    fn test_multi_signer_info_from_json() {
        let json = r#"{
            "public_key": {
                "@type": "/cosmos.crypto.multisig.LegacyAminoPubKey",
                "threshold": 2,
                "public_keys": [
                    { "@type": "/cosmos.crypto.secp256k1.PubKey", "key": "AAA=" },
                    { "@type": "/cosmos.crypto.secp256k1.PubKey", "key": "BBB=" }
                ]
            },
            "mode_info": {
                "multi": {
                    "bitarray": { "extra_bits_stored": 2, "elems": "wA==" },
                    "mode_infos": [
                        { "single": { "mode": "SIGN_MODE_LEGACY_AMINO_JSON" } },
                        { "single": { "mode": "SIGN_MODE_LEGACY_AMINO_JSON" } }
                    ]
                }
            },
            "sequence": "0"
        }"#;

        let info: SignerInfo = serde_json::from_str(json).unwrap();
        match &info.mode_info {
            ModeInfo::Multi(multi) => {
                assert_eq!(multi.bitarray.extra_bits_stored, 2);
                assert_eq!(multi.mode_infos.len(), 2);
            }
            ModeInfo::Single(_) => panic!("expected multi mode"),
        }

        let key = info.maybe_public_key.unwrap();
        assert_eq!(key.maybe_threshold, Some(2));
        let keys = key.maybe_public_keys.unwrap();
        assert_eq!(keys[0].key, "AAA=");
        assert_eq!(keys[1].key, "BBB=");
    }

    #[test]
    fn test_absent_key_info_is_not_serialized() {
        let signer = TransactionSigner {
            maybe_key_info: None,
            address: String::new(),
            account_sequence: 5,
        };

        let json = serde_json::to_string(&signer).unwrap();
        assert_eq!(json, r#"{"address":"","accountSequence":5}"#);
        assert!(!signer.is_resolved());
    }

    #[test]
    fn test_utc_time_display() {
        let time = UtcTime::from_unix_nano(1_600_000_000_123_456_789);
        assert_eq!(time.to_string(), "2020-09-13T12:26:40.123456789Z");
        assert_eq!(UtcTime::from(time.to_datetime()), time);
    }
}
