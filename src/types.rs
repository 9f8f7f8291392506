use serde::{Deserialize, Deserializer, Serialize};
use solana_sdk::message::VersionedMessage;
use solana_sdk::pubkey::Pubkey;

use crate::core::utils::{base58_bytes, pubkey_string};

/// Compiled instruction as exposed by a legacy message (`accounts`, base58 `data`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyInstruction {
    pub program_id_index: u8,
    #[serde(default)]
    pub accounts: Vec<u8>,
    #[serde(default, with = "base58_bytes")]
    pub data: Vec<u8>,
}

/// Compiled instruction as exposed by a versioned message (`accountKeyIndexes`, raw `data`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    #[serde(default)]
    pub account_key_indexes: Vec<u8>,
    #[serde(default)]
    pub data: Vec<u8>,
}

/// Addresses pulled in through address lookup tables, in ledger order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoadedAddresses {
    #[serde(default)]
    pub writable: Vec<String>,
    #[serde(default)]
    pub readonly: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMessage {
    pub account_keys: Vec<String>,
    pub instructions: Vec<LegacyInstruction>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VersionedMessageV0 {
    pub static_account_keys: Vec<String>,
    pub compiled_instructions: Vec<CompiledInstruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded_addresses: Option<LoadedAddresses>,
}

/// The two message encodings the ledger hands out for the same conceptual data.
///
/// Deserialization picks the account list (`staticAccountKeys`, else
/// `accountKeys`) and the instruction list (`compiledInstructions`, else
/// `instructions`) independently, so mixed payloads still resolve. The key
/// list decides the variant.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TransactionMessage {
    Versioned(VersionedMessageV0),
    Legacy(LegacyMessage),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    static_account_keys: Option<Vec<String>>,
    account_keys: Option<Vec<String>>,
    compiled_instructions: Option<Vec<CompiledInstruction>>,
    instructions: Option<Vec<LegacyInstruction>>,
    #[serde(default)]
    loaded_addresses: Option<LoadedAddresses>,
}

impl From<LegacyInstruction> for CompiledInstruction {
    fn from(ix: LegacyInstruction) -> Self {
        Self {
            program_id_index: ix.program_id_index,
            account_key_indexes: ix.accounts,
            data: ix.data,
        }
    }
}

impl From<CompiledInstruction> for LegacyInstruction {
    fn from(ix: CompiledInstruction) -> Self {
        Self {
            program_id_index: ix.program_id_index,
            accounts: ix.account_key_indexes,
            data: ix.data,
        }
    }
}

impl TryFrom<RawMessage> for TransactionMessage {
    type Error = &'static str;

    fn try_from(raw: RawMessage) -> Result<Self, Self::Error> {
        let instructions: Vec<CompiledInstruction> =
            match (raw.compiled_instructions, raw.instructions) {
                (Some(compiled), _) => compiled,
                (None, Some(legacy)) => legacy.into_iter().map(CompiledInstruction::from).collect(),
                (None, None) => return Err("message has no compiledInstructions or instructions"),
            };

        if let Some(static_account_keys) = raw.static_account_keys {
            return Ok(Self::Versioned(VersionedMessageV0 {
                static_account_keys,
                compiled_instructions: instructions,
                loaded_addresses: raw.loaded_addresses,
            }));
        }

        let account_keys = raw
            .account_keys
            .ok_or("message has no staticAccountKeys or accountKeys")?;
        Ok(Self::Legacy(LegacyMessage {
            account_keys,
            instructions: instructions.into_iter().map(LegacyInstruction::from).collect(),
        }))
    }
}

impl<'de> Deserialize<'de> for TransactionMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawMessage::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl TransactionMessage {
    pub fn is_versioned(&self) -> bool {
        matches!(self, Self::Versioned(_))
    }

    /// Attach lookup-table addresses; a no-op for legacy messages.
    pub fn with_loaded_addresses(mut self, loaded: LoadedAddresses) -> Self {
        if let Self::Versioned(message) = &mut self {
            message.loaded_addresses = Some(loaded);
        }
        self
    }
}

impl From<VersionedMessage> for TransactionMessage {
    fn from(message: VersionedMessage) -> Self {
        match message {
            VersionedMessage::Legacy(message) => Self::Legacy(LegacyMessage {
                account_keys: message.account_keys.iter().map(Pubkey::to_string).collect(),
                instructions: message
                    .instructions
                    .into_iter()
                    .map(|ix| LegacyInstruction {
                        program_id_index: ix.program_id_index,
                        accounts: ix.accounts,
                        data: ix.data,
                    })
                    .collect(),
            }),
            VersionedMessage::V0(message) => Self::Versioned(VersionedMessageV0 {
                static_account_keys: message.account_keys.iter().map(Pubkey::to_string).collect(),
                compiled_instructions: message
                    .instructions
                    .into_iter()
                    .map(|ix| CompiledInstruction {
                        program_id_index: ix.program_id_index,
                        account_key_indexes: ix.accounts,
                        data: ix.data,
                    })
                    .collect(),
                loaded_addresses: None,
            }),
        }
    }
}

/// A fetched transaction, scoped to a single decode attempt.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    pub signature: String,
    #[serde(default)]
    pub slot: u64,
    #[serde(default)]
    pub block_time: Option<i64>,
    pub message: TransactionMessage,
}

/// Normalized pool-creation record handed to the persistence sink.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoolRecord {
    #[serde(with = "pubkey_string")]
    pub program_id: Pubkey,
    #[serde(with = "pubkey_string")]
    pub amm_id: Pubkey,
    #[serde(with = "pubkey_string")]
    pub amm_authority: Pubkey,
    #[serde(with = "pubkey_string")]
    pub amm_open_orders: Pubkey,
    #[serde(with = "pubkey_string")]
    pub lp_mint: Pubkey,
    /// Base mint; the non-native side once normalized.
    #[serde(with = "pubkey_string")]
    pub token_address: Pubkey,
    /// Quote mint; the wrapped-native side once normalized.
    #[serde(with = "pubkey_string")]
    pub sol_address: Pubkey,
    #[serde(with = "pubkey_string")]
    pub token_vault: Pubkey,
    #[serde(with = "pubkey_string")]
    pub sol_vault: Pubkey,
    #[serde(with = "pubkey_string")]
    pub amm_target_orders: Pubkey,
    #[serde(with = "pubkey_string")]
    pub deployer: Pubkey,
    #[serde(with = "pubkey_string")]
    pub system_program_id: Pubkey,
    #[serde(with = "pubkey_string")]
    pub token_program_id: Pubkey,
    #[serde(with = "pubkey_string")]
    pub associated_token_program_id: Pubkey,
}
