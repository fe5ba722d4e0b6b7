//! Network Configuration
//!
//! Bech32 prefixes are chain specific and configured per network. The
//! account prefix is the one signer addresses are derived with; validator
//! and consensus node prefixes are carried for downstream projections.

use crate::address::validate_prefix;
use crate::error::{IndexerError, IndexerResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Address prefixes of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network: String,
    pub account_address_prefix: String,
    pub validator_address_prefix: String,
    pub con_node_address_prefix: String,
}

impl NetworkConfig {
    pub fn new(
        network: impl Into<String>,
        account_address_prefix: impl Into<String>,
        validator_address_prefix: impl Into<String>,
        con_node_address_prefix: impl Into<String>,
    ) -> Self {
        Self {
            network: network.into(),
            account_address_prefix: account_address_prefix.into(),
            validator_address_prefix: validator_address_prefix.into(),
            con_node_address_prefix: con_node_address_prefix.into(),
        }
    }

    /// Crypto.org Chain mainnet
    pub fn crypto_org_mainnet() -> Self {
        Self::new("crypto-org-mainnet", "cro", "crocncl", "crocnclcons")
    }

    /// Crypto.org Chain public testnet
    pub fn crypto_org_testnet() -> Self {
        Self::new("crypto-org-testnet", "tcro", "tcrocncl", "tcrocnclcons")
    }

    /// Cosmos Hub
    pub fn cosmos_hub() -> Self {
        Self::new("cosmos-hub", "cosmos", "cosmosvaloper", "cosmosvalcons")
    }

    /// Parse and validate a JSON network configuration
    pub fn from_json(json: &str) -> IndexerResult<Self> {
        let config: NetworkConfig = serde_json::from_str(json)
            .map_err(|e| IndexerError::invalid_config(format!("Invalid network config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every prefix against the bech32 HRP rules
    pub fn validate(&self) -> IndexerResult<()> {
        if self.network.trim().is_empty() {
            return Err(IndexerError::invalid_config("Network name is empty"));
        }

        let prefixes = [
            ("account_address_prefix", &self.account_address_prefix),
            ("validator_address_prefix", &self.validator_address_prefix),
            ("con_node_address_prefix", &self.con_node_address_prefix),
        ];

        for (field, prefix) in prefixes {
            validate_prefix(prefix).map_err(|e| {
                IndexerError::invalid_config(format!("Invalid {}: {}", field, e))
                    .with_details(self.network.clone())
            })?;
        }

        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::crypto_org_mainnet()
    }
}

impl FromStr for NetworkConfig {
    type Err = IndexerError;

    /// Look up a built-in network by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "crypto-org-mainnet" | "mainnet" | "cro" => Ok(Self::crypto_org_mainnet()),
            "crypto-org-testnet" | "testnet" | "tcro" => Ok(Self::crypto_org_testnet()),
            "cosmos-hub" | "cosmos" => Ok(Self::cosmos_hub()),
            _ => Err(IndexerError::invalid_config(format!("Unknown network: {}", s))),
        }
    }
}
