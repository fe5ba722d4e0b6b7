//! Unified error type for the indexing core
//!
//! Each module reports its own `thiserror` enum. Callers that need a single
//! serializable error (for a failed-block log, an admin API, ...) convert
//! into [`IndexerError`], which keeps a stable category code.

use crate::address::AddressError;
use crate::command::CreateTransactionError;
use crate::parser::SignerParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for indexing operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl IndexerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, msg)
    }

    pub fn command_failed(command: &str, error: &dyn std::error::Error) -> Self {
        Self::new(ErrorCode::CommandFailed, error.to_string()).with_details(command.to_string())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for IndexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for IndexerError {}

/// Error codes for categorization
///
/// None of these are transient: they describe malformed input or a
/// rejected command, and retrying the same input fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Configuration
    InvalidConfig,

    // Signer parsing
    MalformedSequence,
    MissingPublicKey,

    // Address derivation
    InvalidPublicKeyEncoding,
    InvalidThreshold,
    EncodingFailure,

    // Commands
    CommandFailed,

    // Parse errors
    JsonError,

    // Internal
    Internal,
}

/// Result type alias for indexing operations
pub type IndexerResult<T> = Result<T, IndexerError>;

// Conversions from module error types

impl From<AddressError> for IndexerError {
    fn from(e: AddressError) -> Self {
        let code = match e {
            AddressError::InvalidPublicKeyEncoding(_) => ErrorCode::InvalidPublicKeyEncoding,
            AddressError::InvalidThreshold { .. } => ErrorCode::InvalidThreshold,
            AddressError::EncodingFailure(_) => ErrorCode::EncodingFailure,
        };
        IndexerError::new(code, e.to_string())
    }
}

impl From<SignerParseError> for IndexerError {
    fn from(e: SignerParseError) -> Self {
        let message = e.to_string();
        let error = match e {
            SignerParseError::MalformedSequence { .. } => {
                IndexerError::new(ErrorCode::MalformedSequence, message)
            }
            SignerParseError::MissingPublicKey { .. } => {
                IndexerError::new(ErrorCode::MissingPublicKey, message)
            }
            SignerParseError::Address { ref source, .. } => IndexerError {
                message,
                ..IndexerError::from(source.clone())
            },
            SignerParseError::Json(_) => IndexerError::new(ErrorCode::JsonError, message),
        };

        match e.signer_index() {
            Some(index) => error.with_details(format!("signer index {}", index)),
            None => error,
        }
    }
}

impl From<CreateTransactionError> for IndexerError {
    fn from(e: CreateTransactionError) -> Self {
        IndexerError::command_failed(crate::command::create_transaction::CREATE_TRANSACTION, &e)
    }
}

impl From<serde_json::Error> for IndexerError {
    fn from(e: serde_json::Error) -> Self {
        IndexerError::new(ErrorCode::JsonError, e.to_string())
    }
}
