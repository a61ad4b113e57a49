//! transfer_ledger Library
//!
//! Re-exports modules for integration testing and for the binary.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod store;

mod error;

pub use config::Config;
pub use domain::{
    AuthenticatedIdentity, NewTransfer, TransferError, TransferRecord, TransferTotals, UserRecord,
};
pub use error::{AppError, AppResult, ErrorResponse};
