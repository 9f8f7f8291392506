use crate::types::{LoadedAddresses, TransactionMessage};

/// Instruction with its program and accounts still expressed as indices
/// into [`ResolvedMessage::accounts`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedInstruction {
    pub program_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

/// One account list and one instruction list, whatever encoding the ledger used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedMessage {
    pub accounts: Vec<String>,
    pub instructions: Vec<ResolvedInstruction>,
}

impl ResolvedMessage {
    #[inline]
    pub fn account(&self, index: usize) -> Option<&str> {
        self.accounts.get(index).map(String::as_str)
    }
}

/// Normalize either message encoding. Lookup-table addresses of a versioned
/// message follow its static keys, writable before readonly.
pub fn resolve(message: TransactionMessage) -> ResolvedMessage {
    match message {
        TransactionMessage::Legacy(message) => ResolvedMessage {
            accounts: message.account_keys,
            instructions: message
                .instructions
                .into_iter()
                .map(|ix| ResolvedInstruction {
                    program_index: ix.program_id_index,
                    account_indices: ix.accounts,
                    data: ix.data,
                })
                .collect(),
        },
        TransactionMessage::Versioned(message) => {
            let mut accounts = message.static_account_keys;
            if let Some(LoadedAddresses { writable, readonly }) = message.loaded_addresses {
                accounts.reserve(writable.len() + readonly.len());
                accounts.extend(writable);
                accounts.extend(readonly);
            }
            ResolvedMessage {
                accounts,
                instructions: message
                    .compiled_instructions
                    .into_iter()
                    .map(|ix| ResolvedInstruction {
                        program_index: ix.program_id_index,
                        account_indices: ix.account_key_indexes,
                        data: ix.data,
                    })
                    .collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CompiledInstruction, LegacyInstruction, LegacyMessage, VersionedMessageV0,
    };

    fn keys(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("key-{i}")).collect()
    }

    #[test]
    fn legacy_and_versioned_shapes_resolve_identically() {
        let legacy = TransactionMessage::Legacy(LegacyMessage {
            account_keys: keys(3),
            instructions: vec![LegacyInstruction {
                program_id_index: 2,
                accounts: vec![0, 1],
                data: vec![1, 2, 3],
            }],
        });
        let versioned = TransactionMessage::Versioned(VersionedMessageV0 {
            static_account_keys: keys(3),
            compiled_instructions: vec![CompiledInstruction {
                program_id_index: 2,
                account_key_indexes: vec![0, 1],
                data: vec![1, 2, 3],
            }],
            loaded_addresses: None,
        });

        assert_eq!(resolve(legacy), resolve(versioned));
    }

    #[test]
    fn loaded_addresses_follow_static_keys() {
        let message = TransactionMessage::Versioned(VersionedMessageV0 {
            static_account_keys: keys(2),
            compiled_instructions: Vec::new(),
            loaded_addresses: Some(LoadedAddresses {
                writable: vec!["w0".to_string()],
                readonly: vec!["r0".to_string(), "r1".to_string()],
            }),
        });

        let resolved = resolve(message);
        assert_eq!(resolved.accounts, vec!["key-0", "key-1", "w0", "r0", "r1"]);
        assert_eq!(resolved.account(2), Some("w0"));
        assert_eq!(resolved.account(5), None);
    }
}
