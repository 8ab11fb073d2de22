use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ledger::RewardType;
use crate::shared::{DomainError, UserId};

/// Payload for a granted-reward notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardNotification {
    pub user_id: UserId,
    pub reward_type: RewardType,
    pub amount: i64,
    pub related_id: Option<String>,
    pub description: String,
}

/// Payload for the one-time season-start announcement; carries no credit
/// payout and is gated separately from reward evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonAnnouncement {
    pub user_id: UserId,
    pub season_id: String,
    pub season_name: String,
}

/// Best-effort outbound side channel. Failures are reported to the caller
/// for logging but must never roll back a ledger entry.
#[async_trait]
pub trait RewardNotifier: Send + Sync {
    async fn notify_reward(&self, notification: &RewardNotification) -> Result<(), DomainError>;

    async fn notify_season_start(
        &self,
        announcement: &SeasonAnnouncement,
    ) -> Result<(), DomainError>;
}
