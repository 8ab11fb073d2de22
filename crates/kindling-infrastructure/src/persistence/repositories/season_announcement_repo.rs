use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use kindling_domain::season::SeasonAnnouncementRepository;
use kindling_domain::shared::{DomainError, UserId};

pub struct SqliteSeasonAnnouncementRepository {
    base: SqliteRepositoryBase,
}

impl SqliteSeasonAnnouncementRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl SeasonAnnouncementRepository for SqliteSeasonAnnouncementRepository {
    async fn try_mark_announced(
        &self,
        user_id: &UserId,
        season_id: &str,
    ) -> Result<bool, DomainError> {
        let query = "INSERT OR IGNORE INTO season_announcements (user_id, season_id, announced_at) \
                     VALUES (?1, ?2, ?3)";

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(user_id.as_str())
                    .bind(season_id)
                    .bind(Utc::now()),
                "Mark season announced",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
