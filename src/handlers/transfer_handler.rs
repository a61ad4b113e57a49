//! Transfer Handler
//!
//! Resolves the receiver's username and records the transfer.

use std::sync::Arc;

use crate::domain::{OperationContext, TransferError, TransferRecord};
use crate::error::AppError;
use crate::store::{LedgerStore, UserDirectory};

use super::{SelfTransferRule, TransferCommand};

/// Resolver/writer for validated transfers.
///
/// One directory read, then at most one ledger write, strictly in that
/// order. No retries; a failed write leaves nothing behind.
#[derive(Clone)]
pub struct TransferHandler {
    users: Arc<dyn UserDirectory>,
    ledger: Arc<dyn LedgerStore>,
    rule: SelfTransferRule,
}

impl TransferHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        ledger: Arc<dyn LedgerStore>,
        rule: SelfTransferRule,
    ) -> Self {
        Self { users, ledger, rule }
    }

    /// Execute the transfer command
    pub async fn execute(
        &self,
        command: TransferCommand,
        context: &OperationContext,
    ) -> Result<TransferRecord, AppError> {
        let receiver = self
            .users
            .lookup_by_username(&command.receiver)
            .await?
            .ok_or(TransferError::ReceiverNotFound)?;

        if self.rule == SelfTransferRule::ResolvedId && receiver.id == command.sender {
            return Err(TransferError::SelfTransfer.into());
        }

        let transfer = command.resolve(receiver.id);

        let record = self
            .ledger
            .insert_transfer(&transfer)
            .await?
            .ok_or(TransferError::TransferNotCompleted)?;

        tracing::info!(
            transfer_id = record.id,
            sender = record.sender,
            receiver = record.receiver,
            amount = record.amount,
            caller = ?context.identity.map(|i| i.id),
            correlation_id = ?context.correlation_id,
            "Transfer recorded"
        );

        Ok(record)
    }
}
