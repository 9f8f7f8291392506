use solana_sdk::pubkey::Pubkey;

pub mod program_ids {
    use solana_sdk::pubkey::Pubkey;

    pub const RAYDIUM_AMM_V4: Pubkey = solana_sdk::pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");
    pub const SYSTEM_PROGRAM: Pubkey = solana_sdk::system_program::ID;
    pub const TOKEN_PROGRAM: Pubkey = solana_sdk::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
    pub const ASSOCIATED_TOKEN_PROGRAM: Pubkey =
        solana_sdk::pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
}

/// Native SOL represented as an SPL mint.
pub const WRAPPED_SOL_MINT: Pubkey = solana_sdk::pubkey!("So11111111111111111111111111111111111111112");

/// Minimum priority fee (micro-lamports per CU) when no usable sample exists.
pub const MIN_PRIORITY_FEE: u64 = 1;

/// Premium applied to the latest fee sample, as a ratio (13/10 = +30%).
pub const PRIORITY_FEE_NUMERATOR: u128 = 13;
pub const PRIORITY_FEE_DENOMINATOR: u128 = 10;

/// `getRecentPrioritizationFees` rejects more keys than this.
pub const MAX_FEE_ACCOUNTS: usize = 128;

pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 120_000;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
