use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::{ResultExt, SqliteRepositoryBase};
use kindling_domain::shared::{DomainError, UserId};
use kindling_domain::streak::{StreakStateRepository, StreakTrack, UserStreakState};

#[derive(FromRow)]
struct UserStreakRow {
    user_id: String,
    presence_count: i64,
    presence_cycle: i64,
    presence_last_active: Option<NaiveDate>,
    kindness_count: i64,
    kindness_cycle: i64,
    kindness_last_active: Option<NaiveDate>,
    response_count: i64,
    response_cycle: i64,
    response_last_active: Option<NaiveDate>,
    grace_period_used_at: Option<DateTime<Utc>>,
    total_active_days: i64,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserStreakRow {
    fn into_state(self) -> UserStreakState {
        UserStreakState::restore(
            UserId::from_string(&self.user_id),
            StreakTrack::restore(
                self.presence_count as u32,
                self.presence_cycle as u32,
                self.presence_last_active,
            ),
            StreakTrack::restore(
                self.kindness_count as u32,
                self.kindness_cycle as u32,
                self.kindness_last_active,
            ),
            StreakTrack::restore(
                self.response_count as u32,
                self.response_cycle as u32,
                self.response_last_active,
            ),
            self.grace_period_used_at,
            self.total_active_days as u32,
            self.version,
            self.created_at,
            self.updated_at,
        )
    }
}

const SELECT_COLUMNS: &str = "user_id, \
     presence_count, presence_cycle, presence_last_active, \
     kindness_count, kindness_cycle, kindness_last_active, \
     response_count, response_cycle, response_last_active, \
     grace_period_used_at, total_active_days, version, created_at, updated_at";

pub struct SqliteStreakStateRepository {
    base: SqliteRepositoryBase,
}

impl SqliteStreakStateRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl StreakStateRepository for SqliteStreakStateRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStreakState>, DomainError> {
        let query = format!(
            "SELECT {} FROM user_streaks WHERE user_id = ?1",
            SELECT_COLUMNS
        );

        let row: Option<UserStreakRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(user_id.as_str()),
                "Find streak state by user",
            )
            .await?;

        Ok(row.map(|r| r.into_state()))
    }

    async fn insert(&self, state: &UserStreakState) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO user_streaks (
                user_id,
                presence_count, presence_cycle, presence_last_active,
                kindness_count, kindness_cycle, kindness_last_active,
                response_count, response_cycle, response_last_active,
                grace_period_used_at, total_active_days, version,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
        "#;

        sqlx::query(query)
            .bind(state.user_id().as_str())
            .bind(state.presence().count as i64)
            .bind(state.presence().cycle as i64)
            .bind(state.presence().last_active_date)
            .bind(state.kindness().count as i64)
            .bind(state.kindness().cycle as i64)
            .bind(state.kindness().last_active_date)
            .bind(state.response().count as i64)
            .bind(state.response().cycle as i64)
            .bind(state.response().last_active_date)
            .bind(state.grace_period_used_at())
            .bind(state.total_active_days() as i64)
            .bind(state.version())
            .bind(state.created_at())
            .bind(state.updated_at())
            .execute(self.base.pool())
            .await
            .map_err(|e| match &e {
                // A concurrent first write for the same user: callers
                // re-read and retry, like any other stale-state outcome.
                sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::StaleState(
                    format!("Streak state already exists for user {}", state.user_id()),
                ),
                _ => DomainError::Repository(format!("Insert streak state: {}", e)),
            })?;

        Ok(())
    }

    async fn update(&self, state: &UserStreakState) -> Result<(), DomainError> {
        let query = r#"
            UPDATE user_streaks SET
                presence_count = ?2, presence_cycle = ?3, presence_last_active = ?4,
                kindness_count = ?5, kindness_cycle = ?6, kindness_last_active = ?7,
                response_count = ?8, response_cycle = ?9, response_last_active = ?10,
                grace_period_used_at = ?11, total_active_days = ?12,
                version = version + 1, updated_at = ?13
            WHERE user_id = ?1 AND version = ?14
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(state.user_id().as_str())
                    .bind(state.presence().count as i64)
                    .bind(state.presence().cycle as i64)
                    .bind(state.presence().last_active_date)
                    .bind(state.kindness().count as i64)
                    .bind(state.kindness().cycle as i64)
                    .bind(state.kindness().last_active_date)
                    .bind(state.response().count as i64)
                    .bind(state.response().cycle as i64)
                    .bind(state.response().last_active_date)
                    .bind(state.grace_period_used_at())
                    .bind(state.total_active_days() as i64)
                    .bind(state.updated_at())
                    .bind(state.version()),
                "Update streak state",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::StaleState(format!(
                "Streak state for user {} changed since version {}",
                state.user_id(),
                state.version()
            )));
        }

        Ok(())
    }

    async fn list_user_ids(&self, offset: u32, limit: u32) -> Result<Vec<UserId>, DomainError> {
        let query = "SELECT user_id FROM user_streaks ORDER BY user_id LIMIT ?1 OFFSET ?2";

        let ids: Vec<String> = sqlx::query_scalar(query)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(self.base.pool())
            .await
            .map_repo_error("List streak user ids")?;

        Ok(ids.iter().map(|id| UserId::from_string(id)).collect())
    }
}
