use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use crate::persistence::{ResultExt, SqliteRepositoryBase};
use kindling_domain::reward::{AppendOutcome, LedgerEntry, RewardLedger, RewardType};
use kindling_domain::shared::{DomainError, LedgerEntryId, UserId};

#[derive(FromRow)]
struct LedgerRow {
    id: String,
    user_id: String,
    amount: i64,
    entry_type: String,
    idempotency_key: Option<String>,
    related_id: Option<String>,
    description: String,
    created_at: DateTime<Utc>,
}

impl LedgerRow {
    fn into_entry(self) -> Result<LedgerEntry, DomainError> {
        Ok(LedgerEntry::restore(
            LedgerEntryId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            self.amount,
            RewardType::from_str(&self.entry_type)?,
            self.idempotency_key,
            self.related_id,
            self.description,
            self.created_at,
        ))
    }
}

const SELECT_COLUMNS: &str =
    "id, user_id, amount, entry_type, idempotency_key, related_id, description, created_at";

pub struct SqliteRewardLedger {
    base: SqliteRepositoryBase,
}

impl SqliteRewardLedger {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    async fn find_by_key(
        &self,
        user_id: &UserId,
        idempotency_key: &str,
    ) -> Result<Option<LedgerEntry>, DomainError> {
        let query = format!(
            "SELECT {} FROM reward_ledger WHERE user_id = ?1 AND idempotency_key = ?2",
            SELECT_COLUMNS
        );

        let row: Option<LedgerRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(user_id.as_str())
                    .bind(idempotency_key),
                "Find ledger entry by idempotency key",
            )
            .await?;

        row.map(|r| r.into_entry()).transpose()
    }
}

#[async_trait]
impl RewardLedger for SqliteRewardLedger {
    async fn append(&self, entry: &LedgerEntry) -> Result<AppendOutcome, DomainError> {
        // The unique index on (user_id, idempotency_key) makes this a
        // single atomic statement; concurrent appends with the same key
        // leave exactly one row.
        let query = r#"
            INSERT INTO reward_ledger (
                id, user_id, amount, entry_type, idempotency_key,
                related_id, description, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(user_id, idempotency_key) DO NOTHING
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(entry.id().as_str())
                    .bind(entry.user_id().as_str())
                    .bind(entry.amount())
                    .bind(entry.entry_type().as_str())
                    .bind(entry.idempotency_key())
                    .bind(entry.related_id())
                    .bind(entry.description())
                    .bind(entry.created_at()),
                "Append ledger entry",
            )
            .await?;

        if result.rows_affected() > 0 {
            return Ok(AppendOutcome::Created(entry.clone()));
        }

        let key = entry.idempotency_key().ok_or_else(|| {
            DomainError::Repository(
                "Keyless ledger append affected no rows".to_string(),
            )
        })?;

        let existing = self.find_by_key(entry.user_id(), key).await?.ok_or_else(|| {
            DomainError::Repository(format!(
                "Ledger entry vanished after conflict on key {}",
                key
            ))
        })?;

        Ok(AppendOutcome::Duplicate(existing))
    }

    async fn balance(&self, user_id: &UserId) -> Result<i64, DomainError> {
        let query = "SELECT COALESCE(SUM(amount), 0) FROM reward_ledger WHERE user_id = ?1";

        sqlx::query_scalar(query)
            .bind(user_id.as_str())
            .fetch_one(self.base.pool())
            .await
            .map_repo_error("Sum ledger balance")
    }

    async fn find_recent(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<LedgerEntry>, DomainError> {
        let query = format!(
            "SELECT {} FROM reward_ledger WHERE user_id = ?1 ORDER BY created_at DESC LIMIT ?2",
            SELECT_COLUMNS
        );

        let rows: Vec<LedgerRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query)
                    .bind(user_id.as_str())
                    .bind(limit as i64),
                "Find recent ledger entries",
            )
            .await?;

        rows.into_iter().map(|r| r.into_entry()).collect()
    }
}
