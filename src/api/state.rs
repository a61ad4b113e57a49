//! Shared application state
//!
//! Collaborator handles injected into every route.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{IdentityVerifier, JwtVerifier};
use crate::handlers::{ReportHandler, SelfTransferRule, TransferHandler, TransferValidator};
use crate::store::{LedgerStore, PgLedgerStore, PgUserDirectory, UserDirectory};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserDirectory>,
    pub ledger: Arc<dyn LedgerStore>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub self_transfer_rule: SelfTransferRule,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        ledger: Arc<dyn LedgerStore>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            users,
            ledger,
            verifier,
            self_transfer_rule: SelfTransferRule::default(),
        }
    }

    /// Postgres-backed state with an HS256 verifier
    pub fn postgres(pool: PgPool, jwt_secret: &str) -> Self {
        Self::new(
            Arc::new(PgUserDirectory::new(pool.clone())),
            Arc::new(PgLedgerStore::new(pool)),
            Arc::new(JwtVerifier::new(jwt_secret)),
        )
    }

    pub fn with_self_transfer_rule(mut self, rule: SelfTransferRule) -> Self {
        self.self_transfer_rule = rule;
        self
    }

    pub fn validator(&self) -> TransferValidator {
        TransferValidator::new(self.self_transfer_rule)
    }

    pub fn transfer_handler(&self) -> TransferHandler {
        TransferHandler::new(
            self.users.clone(),
            self.ledger.clone(),
            self.self_transfer_rule,
        )
    }

    pub fn report_handler(&self) -> ReportHandler {
        ReportHandler::new(self.ledger.clone())
    }
}
