//! Storage collaborators
//!
//! The transfer pipeline reaches users and transfers only through these
//! traits. Handles are injected; nothing here is ambient state.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::domain::{NewTransfer, TransferRecord, TransferTotals, UserRecord};

pub use memory::{MemoryLedgerStore, MemoryUserDirectory};
pub use postgres::{PgLedgerStore, PgUserDirectory};

/// Errors raised by a storage collaborator itself (not "no row" outcomes)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend refused to serve the call
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only lookup of users by their public username
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn lookup_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;
}

/// Sole writer and id generator for transfer rows
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Insert one transfer. `Ok(None)` means the store created no row.
    async fn insert_transfer(
        &self,
        transfer: &NewTransfer,
    ) -> Result<Option<TransferRecord>, StoreError>;

    /// Sum and count over every transfer
    async fn aggregate_totals(&self) -> Result<TransferTotals, StoreError>;

    /// Transfers sent or received by `user_id`, oldest first
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<TransferRecord>, StoreError>;
}
