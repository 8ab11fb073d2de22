use async_trait::async_trait;
use chrono::NaiveDate;

use super::definition::{SeasonalEventDefinition, SeasonalRuleType};
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait SeasonDefinitionRepository: Send + Sync {
    async fn save(&self, definition: &SeasonalEventDefinition) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str)
        -> Result<Option<SeasonalEventDefinition>, DomainError>;

    async fn find_all(&self) -> Result<Vec<SeasonalEventDefinition>, DomainError>;

    /// Active definitions whose window contains the given date.
    async fn find_open_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<SeasonalEventDefinition>, DomainError>;
}

/// Capped per-(user, season, rule) counters.
///
/// `try_increment` must be atomic: concurrent calls at the cap boundary
/// yield exactly `max_total` successful increments in total.
#[async_trait]
pub trait SeasonCounterRepository: Send + Sync {
    /// Increment if the counter is below `max_total`. Returns the new
    /// count on success, `None` once the cap is reached.
    async fn try_increment(
        &self,
        user_id: &UserId,
        season_id: &str,
        rule_type: SeasonalRuleType,
        max_total: u32,
    ) -> Result<Option<u32>, DomainError>;

    async fn count(
        &self,
        user_id: &UserId,
        season_id: &str,
        rule_type: SeasonalRuleType,
    ) -> Result<u32, DomainError>;
}

/// One-time per-(user, season) announcement gate.
#[async_trait]
pub trait SeasonAnnouncementRepository: Send + Sync {
    /// Mark the season as announced for the user. Returns true when this
    /// call newly marked it, false when it was already announced.
    async fn try_mark_announced(
        &self,
        user_id: &UserId,
        season_id: &str,
    ) -> Result<bool, DomainError>;
}
