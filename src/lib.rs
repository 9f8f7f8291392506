//! Decodes AMM pool-creation transactions into normalized pool records.

pub mod config;
pub mod core;
pub mod protocols;
pub mod rpc;
pub mod store;
pub mod types;

pub use crate::config::{DecoderConfig, IndexerConfig};
pub use crate::core::error::{IndexerError, LedgerError, MalformedInstruction, SinkError};
pub use crate::core::pool_indexer::{decode_pool, PoolIndexer, ProcessOutcome, StoredPool};
pub use crate::core::priority_fee::{
    compute_budget_instructions, estimate_priority_fee, suggested_priority_fee,
};
pub use crate::rpc::{Ledger, RpcLedger};
pub use crate::store::{InsertAck, MemorySink, PoolSink, SqliteSink};
pub use crate::types::{LedgerTransaction, PoolRecord, TransactionMessage};
