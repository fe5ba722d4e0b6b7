//! Chain Indexing Core
//!
//! Ingestion core of a Cosmos SDK chain indexer: turns decoded transaction
//! data into a canonical event stream.
//!
//! # Architecture
//!
//! This crate provides:
//! - **address**: bech32 account addresses from single keys and multisig key sets
//! - **parser**: signer descriptors to canonical `TransactionSigner` records
//! - **command**: the command/event kernel and the `CreateTransaction` command
//! - **config**: per-network address prefixes
//! - **factory**: seeded random values for tests
//!
//! Every operation is a pure function of its arguments, so independent
//! transactions can be processed in parallel without synchronization.
//!
//! # Example
//!
//! ```rust,ignore
//! use chain_indexing::{parse_signer_infos, NetworkConfig};
//! use chain_indexing::command::{execute, CreateTransaction};
//!
//! let network = NetworkConfig::crypto_org_mainnet();
//! let signers = parse_signer_infos(&tx.auth_info.signer_infos, &network.account_address_prefix)?;
//! let event = execute(CreateTransaction::new(height, params_with(signers)))?;
//! ```

pub mod address;
pub mod command;
pub mod config;
pub mod error;
pub mod factory;
pub mod parser;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use config::NetworkConfig;
pub use error::{ErrorCode, IndexerError, IndexerResult};
pub use types::*;

pub use address::{multisig_address, single_key_address, AddressError};
pub use command::{execute, BoxedCommand, Command, CommandInfo, Event};
pub use parser::{parse_signer_infos, transaction_signer_address, SignerParseError};
