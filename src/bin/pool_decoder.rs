use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solana_pool_decoder::{
    compute_budget_instructions, decode_pool, IndexerConfig, LedgerTransaction, MemorySink,
    PoolIndexer, PoolSink, ProcessOutcome, RpcLedger, SqliteSink,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Decode AMM pool-creation transactions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a transaction JSON file without touching the network
    DecodeFile {
        /// Path to a JSON file containing a transaction
        #[arg(long)]
        file: PathBuf,
    },
    /// Fetch transactions by signature, decode them and store the pools found
    Process {
        /// Transaction signatures to process, in order
        #[arg(long = "signature", required = true, num_args = 1..)]
        signatures: Vec<String>,
        /// RPC endpoint URL (overrides SOLANA_RPC_URL)
        #[arg(long)]
        rpc_url: Option<String>,
        /// SQLite database file (overrides DATABASE_PATH); records stay in memory without one
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = IndexerConfig::from_env().context("invalid environment configuration")?;

    match cli.command {
        Commands::DecodeFile { file } => {
            let data = fs::read(&file).with_context(|| format!("failed to read {:?}", file))?;
            let tx: LedgerTransaction = serde_json::from_slice(&data)
                .with_context(|| format!("failed to parse transaction in {:?}", file))?;
            match decode_pool(tx.message, &config.decoder_config()?)? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => println!("{}: no pool initialization found", tx.signature),
            }
        }
        Commands::Process {
            signatures,
            rpc_url,
            database,
        } => {
            let rpc_url = rpc_url.unwrap_or_else(|| config.solana_rpc_url.clone());
            let ledger = RpcLedger::new(rpc_url, config.commitment_config()?);
            let runtime = tokio::runtime::Runtime::new()?;
            match database.or_else(|| config.database_path.clone()) {
                Some(path) => {
                    let sink = SqliteSink::open(&path)
                        .with_context(|| format!("failed to open database {:?}", path))?;
                    runtime.block_on(process(ledger, sink, &config, signatures))?;
                }
                None => runtime.block_on(process(ledger, MemorySink::new(), &config, signatures))?,
            }
        }
    }

    Ok(())
}

async fn process<S: PoolSink>(
    ledger: RpcLedger,
    sink: S,
    config: &IndexerConfig,
    signatures: Vec<String>,
) -> Result<()> {
    let indexer = PoolIndexer::new(ledger, sink, config.decoder_config()?);
    for (signature, result) in indexer.process_batch(signatures).await {
        match result {
            Ok(ProcessOutcome::Stored(stored)) => {
                println!(
                    "{signature}: stored pool {} (id {}), priority fee {} micro-lamports/CU at {} CU",
                    stored.record.amm_id,
                    stored.inserted_id.as_deref().unwrap_or("-"),
                    stored.priority_fee,
                    config.compute_unit_limit,
                );
                println!("{}", serde_json::to_string_pretty(&stored.record)?);
                let budget =
                    compute_budget_instructions(stored.priority_fee, config.compute_unit_limit);
                debug!(%signature, ?budget, "compute budget for follow-up transaction");
            }
            Ok(ProcessOutcome::NoMatch) => println!("{signature}: no pool initialization"),
            Err(err) => println!("{signature}: {err}"),
        }
    }
    Ok(())
}
