//! Report Handler
//!
//! Read-side queries over the ledger.

use std::sync::Arc;

use crate::domain::{TransferRecord, TransferTotals};
use crate::error::AppError;
use crate::store::LedgerStore;

/// Aggregate and per-user views of recorded transfers
#[derive(Clone)]
pub struct ReportHandler {
    ledger: Arc<dyn LedgerStore>,
}

impl ReportHandler {
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self { ledger }
    }

    /// Sum and count of every transfer
    pub async fn totals(&self) -> Result<TransferTotals, AppError> {
        Ok(self.ledger.aggregate_totals().await?)
    }

    /// Transfers the user sent or received
    pub async fn history(&self, user_id: i64) -> Result<Vec<TransferRecord>, AppError> {
        let transfers = self.ledger.list_by_user(user_id).await?;
        tracing::debug!(user_id, count = transfers.len(), "Loaded transfer history");
        Ok(transfers)
    }
}
