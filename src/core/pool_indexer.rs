use std::str::FromStr;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use solana_sdk::signature::Signature;
use tracing::{debug, info, warn};

use crate::config::DecoderConfig;
use crate::core::account_resolver::{resolve, ResolvedMessage};
use crate::core::error::{IndexerError, MalformedInstruction, SinkError};
use crate::core::field_extractor::extract_pool;
use crate::core::instruction_filter::find_program_instruction;
use crate::core::mint_normalizer::normalize_mints;
use crate::core::priority_fee::estimate_priority_fee;
use crate::rpc::Ledger;
use crate::store::PoolSink;
use crate::types::{PoolRecord, TransactionMessage};

/// Decode the pool created by `message`, if any, without touching the network.
///
/// `Ok(None)` is the common case: the transaction never calls the AMM.
pub fn decode_pool(
    message: TransactionMessage,
    config: &DecoderConfig,
) -> Result<Option<PoolRecord>, MalformedInstruction> {
    decode_resolved(&resolve(message), config)
}

fn decode_resolved(
    resolved: &ResolvedMessage,
    config: &DecoderConfig,
) -> Result<Option<PoolRecord>, MalformedInstruction> {
    let Some(instruction) = find_program_instruction(
        &resolved.accounts,
        &resolved.instructions,
        &config.amm_program_id,
    ) else {
        return Ok(None);
    };
    let record = extract_pool(&resolved.accounts, instruction, &config.layout)?;
    Ok(Some(normalize_mints(record)))
}

/// A record that made it into the sink.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredPool {
    pub signature: String,
    pub record: PoolRecord,
    pub inserted_id: Option<String>,
    /// Advisory only; never persisted with the record.
    pub priority_fee: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessOutcome {
    Stored(StoredPool),
    NoMatch,
}

/// Fetch, decode and persist pool creations, one signature at a time.
pub struct PoolIndexer<L, S> {
    ledger: L,
    sink: S,
    config: DecoderConfig,
}

impl<L, S> PoolIndexer<L, S>
where
    L: Ledger,
    S: PoolSink,
{
    pub fn new(ledger: L, sink: S, config: DecoderConfig) -> Self {
        Self {
            ledger,
            sink,
            config,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub async fn process_signature(
        &self,
        signature: &str,
    ) -> Result<ProcessOutcome, IndexerError> {
        let parsed =
            Signature::from_str(signature).map_err(|_| IndexerError::invalid_signature(signature))?;

        let tx = self
            .ledger
            .get_transaction(&parsed)
            .await?
            .ok_or_else(|| IndexerError::not_found(signature))?;
        let resolved = resolve(tx.message);

        let (priority_fee, decoded) = tokio::join!(
            estimate_priority_fee(&self.ledger, &resolved.accounts),
            async { decode_resolved(&resolved, &self.config) }
        );

        let record = match decoded {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(%signature, "no pool initialization in transaction");
                return Ok(ProcessOutcome::NoMatch);
            }
            Err(err) => {
                debug!(%signature, error = %err, "pool instruction does not fit layout");
                return Err(err.into());
            }
        };

        let ack = self.sink.insert_one(&record).await?;
        if !ack.acknowledged {
            return Err(SinkError::NotAcknowledged.into());
        }

        info!(
            %signature,
            amm_id = %record.amm_id,
            token = %record.token_address,
            inserted_id = ack.id.as_deref().unwrap_or("-"),
            priority_fee,
            "pool record stored"
        );

        Ok(ProcessOutcome::Stored(StoredPool {
            signature: tx.signature,
            record,
            inserted_id: ack.id,
            priority_fee,
        }))
    }

    /// Process signatures in order; each result is independent of the others.
    pub async fn process_batch<I>(
        &self,
        signatures: I,
    ) -> Vec<(String, Result<ProcessOutcome, IndexerError>)>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        stream::iter(signatures.into_iter().map(Into::into))
            .then(|signature: String| async move {
                let result = self.process_signature(&signature).await;
                if let Err(err) = &result {
                    warn!(%signature, error = %err, "signature not processed");
                }
                (signature, result)
            })
            .collect()
            .await
    }
}
