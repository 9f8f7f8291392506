use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::error::SinkError;
use crate::types::PoolRecord;

/// Store response to a single insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertAck {
    pub acknowledged: bool,
    pub id: Option<String>,
}

/// Destination for decoded pool records. Deduplication is up to the store.
#[async_trait]
pub trait PoolSink: Send + Sync {
    async fn insert_one(&self, record: &PoolRecord) -> Result<InsertAck, SinkError>;
}

/// Keeps records in memory; ids are insertion positions.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<PoolRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<PoolRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PoolSink for MemorySink {
    async fn insert_one(&self, record: &PoolRecord) -> Result<InsertAck, SinkError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| SinkError::unavailable("memory sink lock poisoned"))?;
        records.push(record.clone());
        Ok(InsertAck {
            acknowledged: true,
            id: Some((records.len() - 1).to_string()),
        })
    }
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS pool_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amm_id TEXT NOT NULL UNIQUE,
    program_id TEXT NOT NULL,
    amm_authority TEXT NOT NULL,
    amm_open_orders TEXT NOT NULL,
    lp_mint TEXT NOT NULL,
    token_address TEXT NOT NULL,
    sol_address TEXT NOT NULL,
    token_vault TEXT NOT NULL,
    sol_vault TEXT NOT NULL,
    amm_target_orders TEXT NOT NULL,
    deployer TEXT NOT NULL,
    system_program_id TEXT NOT NULL,
    token_program_id TEXT NOT NULL,
    associated_token_program_id TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const INSERT_RECORD: &str = "INSERT INTO pool_records (
    amm_id, program_id, amm_authority, amm_open_orders, lp_mint, token_address,
    sol_address, token_vault, sol_vault, amm_target_orders, deployer,
    system_program_id, token_program_id, associated_token_program_id
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
ON CONFLICT(amm_id) DO NOTHING";

/// SQLite-backed sink. A pool already stored under the same `amm_id` is
/// acknowledged with its existing row id instead of being inserted again.
#[derive(Clone)]
pub struct SqliteSink {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, SinkError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, SinkError> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn count(&self) -> Result<u64, SinkError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| SinkError::unavailable("sqlite connection lock poisoned"))?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pool_records", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn insert_blocking(conn: &Connection, record: &PoolRecord) -> Result<InsertAck, SinkError> {
        let amm_id = record.amm_id.to_string();
        let inserted = conn.execute(
            INSERT_RECORD,
            params![
                amm_id,
                record.program_id.to_string(),
                record.amm_authority.to_string(),
                record.amm_open_orders.to_string(),
                record.lp_mint.to_string(),
                record.token_address.to_string(),
                record.sol_address.to_string(),
                record.token_vault.to_string(),
                record.sol_vault.to_string(),
                record.amm_target_orders.to_string(),
                record.deployer.to_string(),
                record.system_program_id.to_string(),
                record.token_program_id.to_string(),
                record.associated_token_program_id.to_string(),
            ],
        )?;

        let id = if inserted == 1 {
            Some(conn.last_insert_rowid())
        } else {
            conn.query_row(
                "SELECT id FROM pool_records WHERE amm_id = ?1",
                params![amm_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
        };

        Ok(InsertAck {
            acknowledged: id.is_some(),
            id: id.map(|id| id.to_string()),
        })
    }
}

#[async_trait]
impl PoolSink for SqliteSink {
    async fn insert_one(&self, record: &PoolRecord) -> Result<InsertAck, SinkError> {
        let conn = Arc::clone(&self.conn);
        let record = record.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| SinkError::unavailable("sqlite connection lock poisoned"))?;
            Self::insert_blocking(&conn, &record)
        })
        .await
        .map_err(|err| SinkError::unavailable(format!("sqlite insert task failed: {err}")))?
    }
}
