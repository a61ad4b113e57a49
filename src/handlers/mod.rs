//! Command Handlers module
//!
//! The submission pipeline: `TransferValidator` checks the request,
//! `TransferHandler` resolves the receiver and writes the row.

mod commands;
mod report_handler;
mod transfer_handler;
mod validator;


pub use commands::*;
pub use report_handler::ReportHandler;
pub use transfer_handler::TransferHandler;
pub use validator::{parse_leading_int, SelfTransferRule, TransferValidator};
