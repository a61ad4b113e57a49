//! Postgres-backed collaborators
//!
//! Expects `users(id, username)` and `transfers(id, sender, receiver, amount)`.
//! Integer columns are cast to BIGINT so either INTEGER or BIGINT schemas work.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{NewTransfer, TransferRecord, TransferTotals, UserRecord};

use super::{LedgerStore, StoreError, UserDirectory};

/// User directory over the `users` table
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn lookup_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let row: Option<(i64, String)> = sqlx::query_as(
            r#"
            SELECT id::BIGINT, username
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, username)| UserRecord { id, username }))
    }
}

/// Ledger over the `transfers` table
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE class 22: data exception (out-of-range values and the like)
const DATA_EXCEPTION_CLASS: &str = "22";

/// Constraint violations and data exceptions mean "no row created", not a fault.
fn is_rejected_write(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_foreign_key_violation()
                || db.is_check_violation()
                || db.is_unique_violation()
                || db
                    .code()
                    .map_or(false, |code| code.starts_with(DATA_EXCEPTION_CLASS))
        }
        _ => false,
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn insert_transfer(
        &self,
        transfer: &NewTransfer,
    ) -> Result<Option<TransferRecord>, StoreError> {
        let result: Result<Option<(i64, i64, i64, i64)>, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO transfers (sender, receiver, amount)
            VALUES ($1, $2, $3)
            RETURNING id::BIGINT, sender::BIGINT, receiver::BIGINT, amount::BIGINT
            "#,
        )
        .bind(transfer.sender)
        .bind(transfer.receiver)
        .bind(transfer.amount)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.map(|(id, sender, receiver, amount)| TransferRecord {
                id,
                sender,
                receiver,
                amount,
            })),
            Err(e) if is_rejected_write(&e) => {
                tracing::debug!("Transfer insert rejected by constraint: {}", e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn aggregate_totals(&self) -> Result<TransferTotals, StoreError> {
        let (total, count): (Option<i64>, Option<i64>) = sqlx::query_as(
            r#"
            SELECT SUM(amount)::BIGINT AS total, COUNT(*) AS count
            FROM transfers
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(TransferTotals {
            total: total.unwrap_or(0),
            count: count.unwrap_or(0),
        })
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<TransferRecord>, StoreError> {
        let rows: Vec<(i64, i64, i64, i64)> = sqlx::query_as(
            r#"
            SELECT id::BIGINT, sender::BIGINT, receiver::BIGINT, amount::BIGINT
            FROM transfers
            WHERE sender = $1 OR receiver = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, sender, receiver, amount)| TransferRecord {
                id,
                sender,
                receiver,
                amount,
            })
            .collect())
    }
}
