//! Command definitions
//!
//! Commands represent intentions to change the system state.

use serde::{Deserialize, Serialize};

use crate::domain::NewTransfer;

/// A validated transfer whose receiver is still a username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCommand {
    /// User ID of the sender, taken from the path
    pub sender: i64,
    /// Username of the recipient, resolved by the directory
    pub receiver: String,
    /// Whole units to move
    pub amount: i64,
}

impl TransferCommand {
    pub fn new(sender: i64, receiver: String, amount: i64) -> Self {
        Self {
            sender,
            receiver,
            amount,
        }
    }

    /// Swap the username for the directory's user id
    pub fn resolve(self, receiver_id: i64) -> NewTransfer {
        NewTransfer::new(self.sender, receiver_id, self.amount)
    }
}
