//! In-memory collaborators
//!
//! Same contract as the Postgres stores. They also count calls, which
//! lets tests assert that rejected requests never reached storage.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{NewTransfer, TransferRecord, TransferTotals, UserRecord};

use super::{LedgerStore, StoreError, UserDirectory};

/// Fixed set of users keyed by username
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: Vec<UserRecord>,
    lookups: AtomicUsize,
    unavailable: bool,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, id: i64, username: impl Into<String>) -> Self {
        self.users.push(UserRecord {
            id,
            username: username.into(),
        });
        self
    }

    /// Make every lookup fail with `StoreError::Unavailable`
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Number of lookups served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn lookup_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(StoreError::Unavailable("user directory".to_string()));
        }
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }
}

/// Append-only transfer list with sequential ids starting at 1
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    rows: Mutex<Vec<TransferRecord>>,
    writes: AtomicUsize,
    reject_writes: bool,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert report that no row was created
    pub fn rejecting_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    /// Number of insert attempts so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Snapshot of stored rows
    pub fn rows(&self) -> Vec<TransferRecord> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    fn lock_rows(&self) -> Result<std::sync::MutexGuard<'_, Vec<TransferRecord>>, StoreError> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Unavailable("ledger lock poisoned".to_string()))
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn insert_transfer(
        &self,
        transfer: &NewTransfer,
    ) -> Result<Option<TransferRecord>, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        // Mirrors the table's CHECK (amount > 0)
        if self.reject_writes || transfer.amount <= 0 {
            return Ok(None);
        }

        let mut rows = self.lock_rows()?;
        let id = rows.len() as i64 + 1;
        let record = transfer.clone().into_record(id);
        rows.push(record.clone());
        Ok(Some(record))
    }

    async fn aggregate_totals(&self) -> Result<TransferTotals, StoreError> {
        let rows = self.lock_rows()?;
        let total = rows
            .iter()
            .try_fold(0i64, |acc, r| acc.checked_add(r.amount))
            .ok_or_else(|| StoreError::Unavailable("transfer total overflows i64".to_string()))?;

        Ok(TransferTotals {
            total,
            count: rows.len() as i64,
        })
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<TransferRecord>, StoreError> {
        let rows = self.lock_rows()?;
        Ok(rows
            .iter()
            .filter(|r| r.sender == user_id || r.receiver == user_id)
            .cloned()
            .collect())
    }
}
