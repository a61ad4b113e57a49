//! Transfer data model
//!
//! Ids are the store's integer keys. Amounts are whole units.

use serde::{Deserialize, Serialize};

/// A transfer row as persisted by the ledger store.
///
/// `id` is assigned by the store; `receiver` is always the resolved user id,
/// never the username the client submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: i64,
    pub sender: i64,
    pub receiver: i64,
    pub amount: i64,
}

/// A transfer ready to be written: receiver already resolved, no id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTransfer {
    pub sender: i64,
    pub receiver: i64,
    pub amount: i64,
}

impl NewTransfer {
    pub fn new(sender: i64, receiver: i64, amount: i64) -> Self {
        Self {
            sender,
            receiver,
            amount,
        }
    }

    /// Attach a store-generated id.
    pub fn into_record(self, id: i64) -> TransferRecord {
        TransferRecord {
            id,
            sender: self.sender,
            receiver: self.receiver,
            amount: self.amount,
        }
    }
}

/// Aggregate over every transfer in the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTotals {
    pub total: i64,
    pub count: i64,
}

/// A user as seen by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
}

/// The caller, as established by the identity verifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    pub id: i64,
}
