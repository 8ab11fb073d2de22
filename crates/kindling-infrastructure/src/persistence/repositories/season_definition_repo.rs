use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use kindling_domain::season::{SeasonDefinitionRepository, SeasonalEventDefinition, SeasonalRule};
use kindling_domain::shared::DomainError;

#[derive(FromRow)]
struct SeasonRow {
    id: String,
    name: String,
    year: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    rules: String,
    is_active: bool,
}

impl SeasonRow {
    fn into_definition(self) -> Result<SeasonalEventDefinition, DomainError> {
        let rules: Vec<SeasonalRule> = serde_json::from_str(&self.rules).map_err(|e| {
            DomainError::Deserialization(format!("Season {} rules: {}", self.id, e))
        })?;

        SeasonalEventDefinition::new(
            self.id,
            self.name,
            self.year as i32,
            self.start_date,
            self.end_date,
            rules,
            self.is_active,
        )
    }
}

const SELECT_COLUMNS: &str = "id, name, year, start_date, end_date, rules, is_active";

pub struct SqliteSeasonDefinitionRepository {
    base: SqliteRepositoryBase,
}

impl SqliteSeasonDefinitionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl SeasonDefinitionRepository for SqliteSeasonDefinitionRepository {
    async fn save(&self, definition: &SeasonalEventDefinition) -> Result<(), DomainError> {
        let rules = serde_json::to_string(definition.rules())
            .map_err(|e| DomainError::Serialization(format!("Season rules: {}", e)))?;

        let query = r#"
            INSERT INTO season_definitions (id, name, year, start_date, end_date, rules, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                name = ?2,
                year = ?3,
                start_date = ?4,
                end_date = ?5,
                rules = ?6,
                is_active = ?7
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(definition.id())
                    .bind(definition.name())
                    .bind(definition.year() as i64)
                    .bind(definition.start_date())
                    .bind(definition.end_date())
                    .bind(rules)
                    .bind(definition.is_active()),
                "Save season definition",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<SeasonalEventDefinition>, DomainError> {
        let query = format!(
            "SELECT {} FROM season_definitions WHERE id = ?1",
            SELECT_COLUMNS
        );

        let row: Option<SeasonRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(id), "Find season by id")
            .await?;

        row.map(|r| r.into_definition()).transpose()
    }

    async fn find_all(&self) -> Result<Vec<SeasonalEventDefinition>, DomainError> {
        let query = format!(
            "SELECT {} FROM season_definitions ORDER BY start_date",
            SELECT_COLUMNS
        );

        let rows: Vec<SeasonRow> = self
            .base
            .fetch_all(sqlx::query_as(&query), "Find all seasons")
            .await?;

        rows.into_iter().map(|r| r.into_definition()).collect()
    }

    async fn find_open_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<SeasonalEventDefinition>, DomainError> {
        let query = format!(
            "SELECT {} FROM season_definitions \
             WHERE is_active = 1 AND start_date <= ?1 AND end_date >= ?1 \
             ORDER BY start_date",
            SELECT_COLUMNS
        );

        let rows: Vec<SeasonRow> = self
            .base
            .fetch_all(sqlx::query_as(&query).bind(date), "Find open seasons")
            .await?;

        rows.into_iter().map(|r| r.into_definition()).collect()
    }
}
