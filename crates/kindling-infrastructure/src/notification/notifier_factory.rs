use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use kindling_domain::reward::{RewardNotification, RewardNotifier, SeasonAnnouncement};
use kindling_domain::shared::DomainError;

use super::webhook::WebhookRewardNotifier;

/// Notification channel configuration.
#[derive(Debug, Clone)]
pub enum NotifierConfig {
    Webhook { url: String },
    Disabled,
}

/// Create a notifier based on channel configuration.
pub fn create_notifier(config: &NotifierConfig) -> Result<Arc<dyn RewardNotifier>, DomainError> {
    match config {
        NotifierConfig::Webhook { url } => Ok(Arc::new(WebhookRewardNotifier::new(url)?)),
        NotifierConfig::Disabled => Ok(Arc::new(DisabledNotifier)),
    }
}

/// Swallows notifications when no channel is configured.
struct DisabledNotifier;

#[async_trait]
impl RewardNotifier for DisabledNotifier {
    async fn notify_reward(&self, notification: &RewardNotification) -> Result<(), DomainError> {
        debug!(
            "[notify] channel disabled, dropping reward notification user_id={} type={}",
            notification.user_id, notification.reward_type
        );
        Ok(())
    }

    async fn notify_season_start(
        &self,
        announcement: &SeasonAnnouncement,
    ) -> Result<(), DomainError> {
        debug!(
            "[notify] channel disabled, dropping season announcement user_id={} season={}",
            announcement.user_id, announcement.season_id
        );
        Ok(())
    }
}
