use solana_client::rpc_response::RpcPrioritizationFee;
use solana_sdk::compute_budget::ComputeBudgetInstruction;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

use crate::core::constants::{
    MAX_FEE_ACCOUNTS, MIN_PRIORITY_FEE, PRIORITY_FEE_DENOMINATOR, PRIORITY_FEE_NUMERATOR,
};
use crate::core::utils::parse_pubkey;
use crate::rpc::Ledger;

/// Latest sample plus 30%, rounded down; [`MIN_PRIORITY_FEE`] when there is none.
///
/// Samples are taken to be ordered oldest to newest, so the last one wins.
pub fn suggested_priority_fee(samples: &[RpcPrioritizationFee]) -> u64 {
    let Some(latest) = samples.last() else {
        return MIN_PRIORITY_FEE;
    };
    let scaled = u128::from(latest.prioritization_fee) * PRIORITY_FEE_NUMERATOR
        / PRIORITY_FEE_DENOMINATOR;
    u64::try_from(scaled)
        .unwrap_or(u64::MAX)
        .max(MIN_PRIORITY_FEE)
}

/// Best-effort fee estimate for a transaction touching `accounts`.
///
/// Never fails: transport errors fall back to [`MIN_PRIORITY_FEE`].
pub async fn estimate_priority_fee<L>(ledger: &L, accounts: &[String]) -> u64
where
    L: Ledger + ?Sized,
{
    let keys: Vec<Pubkey> = accounts
        .iter()
        .filter_map(|key| parse_pubkey(key))
        .take(MAX_FEE_ACCOUNTS)
        .collect();

    match ledger.get_recent_prioritization_fees(&keys).await {
        Ok(samples) => {
            let fee = suggested_priority_fee(&samples);
            debug!(samples = samples.len(), fee, "priority fee estimated");
            fee
        }
        Err(err) => {
            warn!(error = %err, fallback = MIN_PRIORITY_FEE, "priority fee query failed");
            MIN_PRIORITY_FEE
        }
    }
}

/// Compute-budget prefix for a follow-up transaction paying `fee` micro-lamports per CU.
pub fn compute_budget_instructions(fee: u64, unit_limit: u32) -> [Instruction; 2] {
    [
        ComputeBudgetInstruction::set_compute_unit_limit(unit_limit),
        ComputeBudgetInstruction::set_compute_unit_price(fee),
    ]
}
