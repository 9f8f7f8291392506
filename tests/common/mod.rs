#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use async_trait::async_trait;
use solana_client::rpc_response::RpcPrioritizationFee;
use solana_pool_decoder::{InsertAck, Ledger, LedgerError, LedgerTransaction, PoolRecord, PoolSink, SinkError};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

pub fn load_transaction(name: &str) -> Result<LedgerTransaction> {
    let path = format!("tests/fixtures/{name}.json");
    let data = fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {path}"))
}

pub fn load_expected(name: &str) -> Result<serde_json::Value> {
    let path = format!("tests/expected/{name}.json");
    let data = fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {path}"))
}

/// In-memory ledger serving canned transactions and fee samples.
#[derive(Default)]
pub struct StaticLedger {
    transactions: HashMap<String, LedgerTransaction>,
    unreachable: HashSet<String>,
    fees: Option<Vec<RpcPrioritizationFee>>,
    pub fee_queries: AtomicUsize,
}

impl StaticLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction(mut self, tx: LedgerTransaction) -> Self {
        self.transactions.insert(tx.signature.clone(), tx);
        self
    }

    /// Fee samples, oldest first. Without this the fee query fails.
    pub fn with_fees(mut self, fees: &[u64]) -> Self {
        self.fees = Some(
            fees.iter()
                .enumerate()
                .map(|(slot, fee)| RpcPrioritizationFee {
                    slot: slot as u64,
                    prioritization_fee: *fee,
                })
                .collect(),
        );
        self
    }

    pub fn with_unreachable(mut self, signature: &str) -> Self {
        self.unreachable.insert(signature.to_string());
        self
    }
}

#[async_trait]
impl Ledger for StaticLedger {
    async fn get_transaction(
        &self,
        signature: &Signature,
    ) -> Result<Option<LedgerTransaction>, LedgerError> {
        let key = signature.to_string();
        if self.unreachable.contains(&key) {
            return Err(LedgerError::payload("connection refused"));
        }
        Ok(self.transactions.get(&key).cloned())
    }

    async fn get_recent_prioritization_fees(
        &self,
        _accounts: &[Pubkey],
    ) -> Result<Vec<RpcPrioritizationFee>, LedgerError> {
        self.fee_queries.fetch_add(1, Ordering::SeqCst);
        self.fees
            .clone()
            .ok_or_else(|| LedgerError::payload("fee endpoint unavailable"))
    }
}

/// Sink whose inserts are never acknowledged.
pub struct RejectingSink;

#[async_trait]
impl PoolSink for RejectingSink {
    async fn insert_one(&self, _record: &PoolRecord) -> Result<InsertAck, SinkError> {
        Ok(InsertAck {
            acknowledged: false,
            id: None,
        })
    }
}

/// Sink that always errors.
pub struct BrokenSink;

#[async_trait]
impl PoolSink for BrokenSink {
    async fn insert_one(&self, _record: &PoolRecord) -> Result<InsertAck, SinkError> {
        Err(SinkError::unavailable("store is down"))
    }
}
