use crate::core::constants::WRAPPED_SOL_MINT;
use crate::types::PoolRecord;

/// Move wrapped SOL into the quote mint slot when the pool lists it as base.
/// Only the two mint fields move; vaults keep their extracted positions.
///
/// Idempotent: after a swap the base slot holds the other mint, so a second
/// call changes nothing. Records with no wrapped-SOL side pass through.
pub fn normalize_mints(mut record: PoolRecord) -> PoolRecord {
    if record.token_address == WRAPPED_SOL_MINT {
        std::mem::swap(&mut record.token_address, &mut record.sol_address);
    }
    record
}

#[cfg(test)]
mod tests {
    use solana_sdk::pubkey::Pubkey;

    use super::*;
    use crate::core::constants::program_ids;

    fn record(base: Pubkey, quote: Pubkey) -> PoolRecord {
        PoolRecord {
            program_id: Pubkey::new_unique(),
            amm_id: Pubkey::new_unique(),
            amm_authority: Pubkey::new_unique(),
            amm_open_orders: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            token_address: base,
            sol_address: quote,
            token_vault: Pubkey::new_unique(),
            sol_vault: Pubkey::new_unique(),
            amm_target_orders: Pubkey::new_unique(),
            deployer: Pubkey::new_unique(),
            system_program_id: program_ids::SYSTEM_PROGRAM,
            token_program_id: program_ids::TOKEN_PROGRAM,
            associated_token_program_id: program_ids::ASSOCIATED_TOKEN_PROGRAM,
        }
    }

    #[test]
    fn wrapped_sol_base_moves_to_quote() {
        let mint = Pubkey::new_unique();
        let before = record(WRAPPED_SOL_MINT, mint);

        let after = normalize_mints(before.clone());
        assert_eq!(after.sol_address, WRAPPED_SOL_MINT);
        assert_eq!(after.token_address, mint);
        assert_eq!(after.token_vault, before.token_vault);
        assert_eq!(after.sol_vault, before.sol_vault);
        assert_eq!(after.amm_id, before.amm_id);
    }

    #[test]
    fn already_normalized_record_is_untouched() {
        let before = record(Pubkey::new_unique(), WRAPPED_SOL_MINT);
        assert_eq!(normalize_mints(before.clone()), before);
    }

    #[test]
    fn record_without_wrapped_sol_is_untouched() {
        let before = record(Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(normalize_mints(before.clone()), before);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let before = record(WRAPPED_SOL_MINT, Pubkey::new_unique());
        let once = normalize_mints(before);
        assert_eq!(normalize_mints(once.clone()), once);
    }
}
