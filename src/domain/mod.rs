//! Domain module
//!
//! Core domain types and business logic.

pub mod context;
pub mod error;
pub mod transfer;

pub use context::OperationContext;
pub use error::TransferError;
pub use transfer::{AuthenticatedIdentity, NewTransfer, TransferRecord, TransferTotals, UserRecord};
