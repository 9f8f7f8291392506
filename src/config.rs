use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_sdk::pubkey::Pubkey;

use crate::core::constants::{program_ids, DEFAULT_COMPUTE_UNIT_LIMIT, DEFAULT_RPC_URL};
use crate::core::field_extractor::AccountLayout;
use crate::core::utils::pubkey_string;
use crate::protocols::raydium::{self, AMM_V4_INITIALIZE2};

/// Process-level settings, read from the environment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexerConfig {
    #[serde(default = "IndexerConfig::default_rpc_url")]
    pub solana_rpc_url: String,
    #[serde(
        default = "IndexerConfig::default_amm_program_id",
        with = "pubkey_string"
    )]
    pub raydium_amm_program_id: Pubkey,
    #[serde(default = "IndexerConfig::default_commitment")]
    pub commitment: String,
    #[serde(default = "IndexerConfig::default_compute_unit_limit")]
    pub compute_unit_limit: u32,
    #[serde(default = "IndexerConfig::default_account_layout")]
    pub account_layout: String,
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            solana_rpc_url: Self::default_rpc_url(),
            raydium_amm_program_id: Self::default_amm_program_id(),
            commitment: Self::default_commitment(),
            compute_unit_limit: Self::default_compute_unit_limit(),
            account_layout: Self::default_account_layout(),
            database_path: None,
        }
    }
}

impl IndexerConfig {
    fn default_rpc_url() -> String {
        DEFAULT_RPC_URL.to_string()
    }

    const fn default_amm_program_id() -> Pubkey {
        program_ids::RAYDIUM_AMM_V4
    }

    fn default_commitment() -> String {
        "confirmed".to_string()
    }

    const fn default_compute_unit_limit() -> u32 {
        DEFAULT_COMPUTE_UNIT_LIMIT
    }

    fn default_account_layout() -> String {
        AMM_V4_INITIALIZE2.to_string()
    }

    /// Read `SOLANA_RPC_URL`, `RAYDIUM_AMM_PROGRAM_ID`, `COMMITMENT`,
    /// `COMPUTE_UNIT_LIMIT`, `ACCOUNT_LAYOUT` and `DATABASE_PATH`.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn commitment_config(&self) -> anyhow::Result<CommitmentConfig> {
        let commitment = CommitmentLevel::from_str(&self.commitment)
            .map_err(|_| anyhow::anyhow!("unknown commitment level {:?}", self.commitment))?;
        Ok(CommitmentConfig { commitment })
    }

    pub fn decoder_config(&self) -> anyhow::Result<DecoderConfig> {
        let layout = raydium::layout(&self.account_layout)
            .ok_or_else(|| anyhow::anyhow!("unknown account layout {:?}", self.account_layout))?;
        Ok(DecoderConfig {
            amm_program_id: self.raydium_amm_program_id,
            layout,
        })
    }
}

/// What the pure decoder needs: which program to match and how to read it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub amm_program_id: Pubkey,
    pub layout: AccountLayout,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            amm_program_id: program_ids::RAYDIUM_AMM_V4,
            layout: AMM_V4_INITIALIZE2,
        }
    }
}
