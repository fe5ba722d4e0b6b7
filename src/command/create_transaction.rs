//! CreateTransaction command
//!
//! Records an indexed transaction, together with its resolved signers, as a
//! `TransactionCreated` event.

use super::{Command, CommandInfo, Event, EventBase};
use crate::types::{Coin, TransactionSigner, UtcTime};
use serde::{Deserialize, Serialize};

pub const CREATE_TRANSACTION: &str = "CreateTransaction";
pub const TRANSACTION_CREATED: &str = "TransactionCreated";

/// Tendermint transaction hashes are SHA256 digests
const TX_HASH_LEN: usize = 32;

/// Transaction data carried by the command and its event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionParams {
    /// Uppercase hex, as reported by Tendermint
    pub tx_hash: String,
    /// Position of the transaction in its block
    pub index: usize,
    /// ABCI result code, 0 on success
    pub code: u32,
    pub log: String,
    pub msg_count: usize,
    pub signers: Vec<TransactionSigner>,
    pub fee: Vec<Coin>,
    pub gas_wanted: u64,
    pub gas_used: u64,
    pub memo: String,
    pub timeout_height: u64,
    pub block_time: UtcTime,
}

/// Error types for CreateTransaction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateTransactionError {
    #[error("Invalid transaction hash {0:?}: expected 64 hex characters")]
    InvalidTxHash(String),

    #[error("Invalid block height: transactions cannot be in block 0")]
    InvalidBlockHeight,
}

/// Command creating a `TransactionCreated` event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransaction {
    block_height: u64,
    params: CreateTransactionParams,
}

impl CreateTransaction {
    pub fn new(block_height: u64, params: CreateTransactionParams) -> Self {
        Self {
            block_height,
            params,
        }
    }
}

impl CommandInfo for CreateTransaction {
    fn name(&self) -> &str {
        CREATE_TRANSACTION
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Command for CreateTransaction {
    type Event = TransactionCreated;
    type Error = CreateTransactionError;

    fn exec(self) -> Result<TransactionCreated, CreateTransactionError> {
        if self.block_height == 0 {
            return Err(CreateTransactionError::InvalidBlockHeight);
        }

        let valid_hash = hex::decode(&self.params.tx_hash)
            .map(|bytes| bytes.len() == TX_HASH_LEN)
            .unwrap_or(false);
        if !valid_hash {
            return Err(CreateTransactionError::InvalidTxHash(self.params.tx_hash));
        }

        Ok(TransactionCreated {
            base: EventBase::new(TRANSACTION_CREATED, 1, self.block_height),
            params: self.params,
        })
    }
}

/// Event emitted for every indexed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCreated {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(flatten)]
    pub params: CreateTransactionParams,
}

impl Event for TransactionCreated {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn version(&self) -> u32 {
        self.base.version
    }

    fn block_height(&self) -> u64 {
        self.base.block_height
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::execute;
    use crate::types::TransactionSignerKeyInfo;

    const TX_HASH: &str = "4936522F7391D425F2A93AD47576F8AEC3947DC907113BE8A2FBCFF8E9F2A416";

    fn params() -> CreateTransactionParams {
        CreateTransactionParams {
            tx_hash: TX_HASH.to_string(),
            index: 0,
            code: 0,
            log: String::new(),
            msg_count: 1,
            signers: vec![
                TransactionSigner {
                    maybe_key_info: Some(TransactionSignerKeyInfo::single(
                        "/cosmos.crypto.secp256k1.PubKey",
                        "AntL+UxMyJ9NZ9DGLp2v7a3dlSxiNXMaItyOXSRw8iYi",
                    )),
                    address: "cro1fdkq6wj0d7e8ry3n0cz2ajmsmfdpwxzlnskpc5".to_string(),
                    account_sequence: 3,
                },
                TransactionSigner {
                    maybe_key_info: None,
                    address: String::new(),
                    account_sequence: 0,
                },
            ],
            fee: vec![Coin::new("basecro", "5000")],
            gas_wanted: 200_000,
            gas_used: 61_000,
            memo: "memo".to_string(),
            timeout_height: 0,
            block_time: UtcTime::from_unix_nano(1_600_000_000_000_000_000),
        }
    }

    #[test]
    fn test_create_transaction() {
        let command = CreateTransaction::new(42, params());
        assert_eq!(command.name(), "CreateTransaction");
        assert_eq!(command.version(), 1);

        let event = execute(command).unwrap();
        assert_eq!(event.name(), "TransactionCreated");
        assert_eq!(event.version(), 1);
        assert_eq!(event.block_height(), 42);
        assert_eq!(event.params, params());
    }

    #[test]
    fn test_event_json_round_trip() {
        let event = execute(CreateTransaction::new(42, params())).unwrap();
        let json = event.to_json().unwrap();

        assert!(json.contains(r#""name":"TransactionCreated""#));
        assert!(json.contains(r#""blockHeight":42"#));
        assert!(json.contains(r#""txHash":"4936522F"#));
        assert!(json.contains(r#""accountSequence":3"#));

        let decoded: TransactionCreated = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_invalid_tx_hash() {
        for hash in ["", "XYZ", &TX_HASH[..62]] {
            let mut p = params();
            p.tx_hash = hash.to_string();

            assert_eq!(
                execute(CreateTransaction::new(1, p)).unwrap_err(),
                CreateTransactionError::InvalidTxHash(hash.to_string())
            );
        }
    }

    #[test]
    fn test_invalid_block_height() {
        assert_eq!(
            execute(CreateTransaction::new(0, params())).unwrap_err(),
            CreateTransactionError::InvalidBlockHeight
        );
    }
}
