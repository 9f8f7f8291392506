use std::fmt;

use solana_sdk::pubkey::Pubkey;

use crate::core::account_resolver::ResolvedInstruction;
use crate::core::constants::program_ids;
use crate::core::error::MalformedInstruction;
use crate::core::utils::parse_pubkey;
use crate::types::PoolRecord;

/// Record fields taken from the instruction's account list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoolField {
    ProgramId,
    AmmId,
    AmmAuthority,
    AmmOpenOrders,
    LpMint,
    BaseMint,
    QuoteMint,
    BaseVault,
    QuoteVault,
    AmmTargetOrders,
    Deployer,
}

impl PoolField {
    pub const ALL: [PoolField; 11] = [
        PoolField::ProgramId,
        PoolField::AmmId,
        PoolField::AmmAuthority,
        PoolField::AmmOpenOrders,
        PoolField::LpMint,
        PoolField::BaseMint,
        PoolField::QuoteMint,
        PoolField::BaseVault,
        PoolField::QuoteVault,
        PoolField::AmmTargetOrders,
        PoolField::Deployer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PoolField::ProgramId => "programId",
            PoolField::AmmId => "ammId",
            PoolField::AmmAuthority => "ammAuthority",
            PoolField::AmmOpenOrders => "ammOpenOrders",
            PoolField::LpMint => "lpMint",
            PoolField::BaseMint => "baseMint",
            PoolField::QuoteMint => "quoteMint",
            PoolField::BaseVault => "baseVault",
            PoolField::QuoteVault => "quoteVault",
            PoolField::AmmTargetOrders => "ammTargetOrders",
            PoolField::Deployer => "deployer",
        }
    }
}

impl fmt::Display for PoolField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positional schema of one program version's pool-initialization accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountLayout {
    pub name: &'static str,
    pub version: &'static str,
    pub offsets: &'static [(PoolField, usize)],
}

impl AccountLayout {
    pub fn offset(&self, field: PoolField) -> Option<usize> {
        self.offsets
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, offset)| *offset)
    }

    /// Shortest account-index list this layout can be read from.
    pub fn required_accounts(&self) -> usize {
        self.offsets
            .iter()
            .map(|(_, offset)| offset + 1)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for AccountLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// Read every layout field out of `instruction` into an unnormalized record.
pub fn extract_pool(
    accounts: &[String],
    instruction: &ResolvedInstruction,
    layout: &AccountLayout,
) -> Result<PoolRecord, MalformedInstruction> {
    let required = layout.required_accounts();
    if instruction.account_indices.len() < required {
        return Err(MalformedInstruction::TooFewAccounts {
            layout: layout.name,
            required,
            actual: instruction.account_indices.len(),
        });
    }

    let field = |field: PoolField| -> Result<Pubkey, MalformedInstruction> {
        let offset = layout
            .offset(field)
            .ok_or(MalformedInstruction::UnmappedField {
                layout: layout.name,
                field,
            })?;
        let index = instruction.account_indices[offset] as usize;
        let key = accounts
            .get(index)
            .ok_or(MalformedInstruction::AccountIndexOutOfRange {
                field,
                index,
                available: accounts.len(),
            })?;
        parse_pubkey(key).ok_or_else(|| MalformedInstruction::InvalidAddress {
            field,
            value: key.clone(),
        })
    };

    Ok(PoolRecord {
        program_id: field(PoolField::ProgramId)?,
        amm_id: field(PoolField::AmmId)?,
        amm_authority: field(PoolField::AmmAuthority)?,
        amm_open_orders: field(PoolField::AmmOpenOrders)?,
        lp_mint: field(PoolField::LpMint)?,
        token_address: field(PoolField::BaseMint)?,
        sol_address: field(PoolField::QuoteMint)?,
        token_vault: field(PoolField::BaseVault)?,
        sol_vault: field(PoolField::QuoteVault)?,
        amm_target_orders: field(PoolField::AmmTargetOrders)?,
        deployer: field(PoolField::Deployer)?,
        system_program_id: program_ids::SYSTEM_PROGRAM,
        token_program_id: program_ids::TOKEN_PROGRAM,
        associated_token_program_id: program_ids::ASSOCIATED_TOKEN_PROGRAM,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::raydium::AMM_V4_INITIALIZE2;

    fn fixture(count: usize) -> (Vec<Pubkey>, Vec<String>, ResolvedInstruction) {
        let keys: Vec<Pubkey> = (0..count).map(|_| Pubkey::new_unique()).collect();
        let accounts = keys.iter().map(Pubkey::to_string).collect();
        // Reverse the indices so offset and account position differ.
        let instruction = ResolvedInstruction {
            program_index: 0,
            account_indices: (0..count as u8).rev().collect(),
            data: vec![1],
        };
        (keys, accounts, instruction)
    }

    #[test]
    fn fields_come_from_their_offsets() {
        let (keys, accounts, instruction) = fixture(18);
        let at = |offset: usize| keys[17 - offset];

        let record = extract_pool(&accounts, &instruction, &AMM_V4_INITIALIZE2).unwrap();
        assert_eq!(record.program_id, at(0));
        assert_eq!(record.amm_id, at(4));
        assert_eq!(record.amm_authority, at(5));
        assert_eq!(record.amm_open_orders, at(6));
        assert_eq!(record.lp_mint, at(7));
        assert_eq!(record.token_address, at(8));
        assert_eq!(record.sol_address, at(9));
        assert_eq!(record.token_vault, at(10));
        assert_eq!(record.sol_vault, at(11));
        assert_eq!(record.amm_target_orders, at(13));
        assert_eq!(record.deployer, at(17));
        assert_eq!(record.system_program_id, program_ids::SYSTEM_PROGRAM);
        assert_eq!(record.token_program_id, program_ids::TOKEN_PROGRAM);
        assert_eq!(
            record.associated_token_program_id,
            program_ids::ASSOCIATED_TOKEN_PROGRAM
        );
    }

    #[test]
    fn short_account_list_is_malformed() {
        let (_, accounts, mut instruction) = fixture(18);
        instruction.account_indices.truncate(17);

        let err = extract_pool(&accounts, &instruction, &AMM_V4_INITIALIZE2).unwrap_err();
        assert_eq!(
            err,
            MalformedInstruction::TooFewAccounts {
                layout: AMM_V4_INITIALIZE2.name,
                required: 18,
                actual: 17,
            }
        );
    }

    #[test]
    fn index_past_account_list_is_malformed() {
        let (_, accounts, mut instruction) = fixture(18);
        instruction.account_indices[4] = 200;

        let err = extract_pool(&accounts, &instruction, &AMM_V4_INITIALIZE2).unwrap_err();
        assert_eq!(
            err,
            MalformedInstruction::AccountIndexOutOfRange {
                field: PoolField::AmmId,
                index: 200,
                available: 18,
            }
        );
    }

    #[test]
    fn undecodable_address_is_malformed() {
        let (_, mut accounts, instruction) = fixture(18);
        // offset 17 reads account 0 because indices are reversed
        accounts[0] = "0OIl-not-base58".to_string();

        let err = extract_pool(&accounts, &instruction, &AMM_V4_INITIALIZE2).unwrap_err();
        assert!(matches!(
            err,
            MalformedInstruction::InvalidAddress {
                field: PoolField::Deployer,
                ..
            }
        ));
    }

    #[test]
    fn layout_without_field_is_reported() {
        const PARTIAL: AccountLayout = AccountLayout {
            name: "partial",
            version: "test",
            offsets: &[(PoolField::ProgramId, 0)],
        };
        let (_, accounts, instruction) = fixture(18);

        let err = extract_pool(&accounts, &instruction, &PARTIAL).unwrap_err();
        assert_eq!(
            err,
            MalformedInstruction::UnmappedField {
                layout: "partial",
                field: PoolField::AmmId,
            }
        );
    }
}
