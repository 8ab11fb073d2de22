use async_trait::async_trait;
use serde_json::json;
use url::Url;

use kindling_domain::reward::{RewardNotification, RewardNotifier, SeasonAnnouncement};
use kindling_domain::shared::DomainError;

/// Posts reward and season-start events to the app's notification relay,
/// which owns push delivery and message copy.
pub struct WebhookRewardNotifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl WebhookRewardNotifier {
    pub fn new(endpoint: &str) -> Result<Self, DomainError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| DomainError::Validation(format!("Invalid webhook URL: {}", e)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    fn reward_payload(notification: &RewardNotification) -> serde_json::Value {
        json!({
            "event": "reward_granted",
            "user_id": notification.user_id.as_str(),
            "reward_type": notification.reward_type.as_str(),
            "amount": notification.amount,
            "related_id": notification.related_id,
            "description": notification.description,
        })
    }

    fn season_payload(announcement: &SeasonAnnouncement) -> serde_json::Value {
        json!({
            "event": "season_started",
            "user_id": announcement.user_id.as_str(),
            "season_id": announcement.season_id,
            "season_name": announcement.season_name,
        })
    }

    async fn post(&self, payload: &serde_json::Value) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                DomainError::Infrastructure(format!("Failed to send webhook notification: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Infrastructure(format!(
                "Notification webhook failed with status {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl RewardNotifier for WebhookRewardNotifier {
    async fn notify_reward(&self, notification: &RewardNotification) -> Result<(), DomainError> {
        self.post(&Self::reward_payload(notification)).await
    }

    async fn notify_season_start(
        &self,
        announcement: &SeasonAnnouncement,
    ) -> Result<(), DomainError> {
        self.post(&Self::season_payload(announcement)).await
    }
}
