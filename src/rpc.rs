use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_client::rpc_request::RpcRequest;
use solana_client::rpc_response::RpcPrioritizationFee;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, EncodedTransaction, TransactionBinaryEncoding,
    UiCompiledInstruction, UiLoadedAddresses, UiMessage, UiRawMessage, UiTransaction,
    UiTransactionEncoding, UiTransactionStatusMeta,
};

use crate::core::error::LedgerError;
use crate::types::{
    CompiledInstruction, LedgerTransaction, LegacyInstruction, LegacyMessage, LoadedAddresses,
    TransactionMessage, VersionedMessageV0,
};

/// Read access to the ledger the indexer observes.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// `Ok(None)` when the ledger has no transaction for `signature`.
    async fn get_transaction(
        &self,
        signature: &Signature,
    ) -> Result<Option<LedgerTransaction>, LedgerError>;

    async fn get_recent_prioritization_fees(
        &self,
        accounts: &[Pubkey],
    ) -> Result<Vec<RpcPrioritizationFee>, LedgerError>;
}

/// [`Ledger`] backed by a Solana JSON-RPC node.
pub struct RpcLedger {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcLedger {
    pub fn new(rpc_url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url.into(), commitment),
            commitment,
        }
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn get_transaction(
        &self,
        signature: &Signature,
    ) -> Result<Option<LedgerTransaction>, LedgerError> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
        };
        // `send` rather than `get_transaction_with_config` so a null result stays `None`.
        let response: Option<EncodedConfirmedTransactionWithStatusMeta> = self
            .client
            .send(
                RpcRequest::GetTransaction,
                json!([signature.to_string(), config]),
            )
            .await?;
        response.map(convert_transaction).transpose()
    }

    async fn get_recent_prioritization_fees(
        &self,
        accounts: &[Pubkey],
    ) -> Result<Vec<RpcPrioritizationFee>, LedgerError> {
        Ok(self.client.get_recent_prioritization_fees(accounts).await?)
    }
}

/// Convert an RPC `getTransaction` result into the decoder's transaction type.
pub fn convert_transaction(
    tx: EncodedConfirmedTransactionWithStatusMeta,
) -> Result<LedgerTransaction, LedgerError> {
    let (signature, mut message) = decode_message(&tx.transaction.transaction)?;
    if let Some(loaded) = tx.transaction.meta.as_ref().and_then(loaded_addresses) {
        message = message.with_loaded_addresses(loaded);
    }

    Ok(LedgerTransaction {
        signature,
        slot: tx.slot,
        block_time: tx.block_time,
        message,
    })
}

fn loaded_addresses(meta: &UiTransactionStatusMeta) -> Option<LoadedAddresses> {
    Option::<&UiLoadedAddresses>::from(meta.loaded_addresses.as_ref()).map(|loaded| {
        LoadedAddresses {
            writable: loaded.writable.clone(),
            readonly: loaded.readonly.clone(),
        }
    })
}

fn decode_message(
    encoded: &EncodedTransaction,
) -> Result<(String, TransactionMessage), LedgerError> {
    match encoded {
        EncodedTransaction::LegacyBinary(blob) => {
            decode_binary(blob, TransactionBinaryEncoding::Base58)
        }
        EncodedTransaction::Binary(blob, encoding) => decode_binary(blob, *encoding),
        EncodedTransaction::Json(tx) => decode_json(tx),
        EncodedTransaction::Accounts(_) => Err(LedgerError::UnsupportedEncoding(
            "accounts-only transaction details".to_string(),
        )),
    }
}

fn decode_binary(
    blob: &str,
    encoding: TransactionBinaryEncoding,
) -> Result<(String, TransactionMessage), LedgerError> {
    let bytes = match encoding {
        TransactionBinaryEncoding::Base58 => bs58::decode(blob)
            .into_vec()
            .map_err(|err| LedgerError::payload(format!("base58: {err}")))?,
        TransactionBinaryEncoding::Base64 => BASE64
            .decode(blob)
            .map_err(|err| LedgerError::payload(format!("base64: {err}")))?,
    };
    let tx: VersionedTransaction = bincode::deserialize(&bytes)
        .map_err(|err| LedgerError::payload(format!("bincode: {err}")))?;
    let signature = tx
        .signatures
        .first()
        .map(Signature::to_string)
        .ok_or_else(|| LedgerError::payload("transaction has no signatures"))?;
    Ok((signature, tx.message.into()))
}

fn decode_json(tx: &UiTransaction) -> Result<(String, TransactionMessage), LedgerError> {
    let signature = tx
        .signatures
        .first()
        .cloned()
        .ok_or_else(|| LedgerError::payload("transaction has no signatures"))?;
    match &tx.message {
        UiMessage::Raw(raw) => Ok((signature, convert_raw_message(raw)?)),
        UiMessage::Parsed(_) => Err(LedgerError::UnsupportedEncoding(
            "jsonParsed message".to_string(),
        )),
    }
}

fn convert_raw_message(raw: &UiRawMessage) -> Result<TransactionMessage, LedgerError> {
    let message = if raw.address_table_lookups.is_some() {
        TransactionMessage::Versioned(VersionedMessageV0 {
            static_account_keys: raw.account_keys.clone(),
            compiled_instructions: raw
                .instructions
                .iter()
                .map(|ix| {
                    Ok(CompiledInstruction {
                        program_id_index: ix.program_id_index,
                        account_key_indexes: ix.accounts.clone(),
                        data: decode_instruction_data(ix)?,
                    })
                })
                .collect::<Result<_, LedgerError>>()?,
            loaded_addresses: None,
        })
    } else {
        TransactionMessage::Legacy(LegacyMessage {
            account_keys: raw.account_keys.clone(),
            instructions: raw
                .instructions
                .iter()
                .map(|ix| {
                    Ok(LegacyInstruction {
                        program_id_index: ix.program_id_index,
                        accounts: ix.accounts.clone(),
                        data: decode_instruction_data(ix)?,
                    })
                })
                .collect::<Result<_, LedgerError>>()?,
        })
    };
    Ok(message)
}

fn decode_instruction_data(ix: &UiCompiledInstruction) -> Result<Vec<u8>, LedgerError> {
    bs58::decode(&ix.data)
        .into_vec()
        .map_err(|err| LedgerError::payload(format!("instruction data: {err}")))
}
