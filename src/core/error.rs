use solana_client::client_error::ClientError;
use thiserror::Error;

use crate::core::field_extractor::PoolField;

/// A matched instruction whose account list does not fit the expected layout.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedInstruction {
    #[error("layout {layout} needs {required} account indices, instruction has {actual}")]
    TooFewAccounts {
        layout: &'static str,
        required: usize,
        actual: usize,
    },
    #[error("{field} points at account {index}, transaction only has {available}")]
    AccountIndexOutOfRange {
        field: PoolField,
        index: usize,
        available: usize,
    },
    #[error("{field} resolved to an undecodable address {value:?}")]
    InvalidAddress { field: PoolField, value: String },
    #[error("layout {layout} has no offset for {field}")]
    UnmappedField {
        layout: &'static str,
        field: PoolField,
    },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("rpc request failed: {0}")]
    Rpc(#[from] ClientError),
    #[error("unsupported transaction encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("failed to decode transaction payload: {0}")]
    Payload(String),
}

impl LedgerError {
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload(message.into())
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("insert was not acknowledged by the store")]
    NotAcknowledged,
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl SinkError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Per-signature failure; none of these stop the process or a batch.
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("invalid transaction signature {0:?}")]
    InvalidSignature(String),
    #[error("ledger transport failed: {0}")]
    Transport(#[from] LedgerError),
    #[error("no transaction found for signature {0}")]
    NotFound(String),
    #[error("malformed pool instruction: {0}")]
    Malformed(#[from] MalformedInstruction),
    #[error("persisting pool record failed: {0}")]
    Persistence(#[from] SinkError),
}

impl IndexerError {
    pub fn invalid_signature(signature: impl Into<String>) -> Self {
        Self::InvalidSignature(signature.into())
    }

    pub fn not_found(signature: impl Into<String>) -> Self {
        Self::NotFound(signature.into())
    }
}
