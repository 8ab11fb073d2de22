use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::persistence::{ResultExt, SqliteRepositoryBase};
use kindling_domain::season::{SeasonCounterRepository, SeasonalRuleType};
use kindling_domain::shared::{DomainError, UserId};

pub struct SqliteSeasonCounterRepository {
    base: SqliteRepositoryBase,
}

impl SqliteSeasonCounterRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl SeasonCounterRepository for SqliteSeasonCounterRepository {
    async fn try_increment(
        &self,
        user_id: &UserId,
        season_id: &str,
        rule_type: SeasonalRuleType,
        max_total: u32,
    ) -> Result<Option<u32>, DomainError> {
        if max_total == 0 {
            return Ok(None);
        }

        // Single atomic statement: the conditional upsert either lands
        // below the cap and returns the new count, or returns no row.
        let query = r#"
            INSERT INTO season_rule_counters (user_id, season_id, rule_type, count)
            VALUES (?1, ?2, ?3, 1)
            ON CONFLICT(user_id, season_id, rule_type)
            DO UPDATE SET count = count + 1
            WHERE season_rule_counters.count < ?4
            RETURNING count
        "#;

        let count: Option<i64> = sqlx::query_scalar(query)
            .bind(user_id.as_str())
            .bind(season_id)
            .bind(rule_type.as_str())
            .bind(max_total as i64)
            .fetch_optional(self.base.pool())
            .await
            .map_repo_error("Increment season rule counter")?;

        Ok(count.map(|c| c as u32))
    }

    async fn count(
        &self,
        user_id: &UserId,
        season_id: &str,
        rule_type: SeasonalRuleType,
    ) -> Result<u32, DomainError> {
        let query = "SELECT count FROM season_rule_counters \
                     WHERE user_id = ?1 AND season_id = ?2 AND rule_type = ?3";

        let count: Option<i64> = sqlx::query_scalar(query)
            .bind(user_id.as_str())
            .bind(season_id)
            .bind(rule_type.as_str())
            .fetch_optional(self.base.pool())
            .await
            .map_repo_error("Read season rule counter")?;

        Ok(count.unwrap_or(0) as u32)
    }
}
