use log::{debug, info, warn};
use std::sync::Arc;

use kindling_domain::reward::{
    AppendOutcome, ConsistencyPolicy, LedgerEntry, MilestoneCatalog, RewardLedger,
    RewardNotification, RewardNotifier, RewardType,
};
use kindling_domain::shared::{DomainError, UserId};
use kindling_domain::streak::StreakKind;

/// Reward application service
///
/// Owns the award-then-notify flow: every credit goes through the
/// idempotent ledger first, and a notification is dispatched only for
/// entries that were actually created. Notification dispatch is
/// fire-and-forget; a delivery failure never touches the ledger.
pub struct RewardService {
    ledger: Arc<dyn RewardLedger>,
    notifier: Arc<dyn RewardNotifier>,
    milestones: MilestoneCatalog,
    consistency: ConsistencyPolicy,
}

impl RewardService {
    pub fn new(
        ledger: Arc<dyn RewardLedger>,
        notifier: Arc<dyn RewardNotifier>,
        milestones: MilestoneCatalog,
        consistency: ConsistencyPolicy,
    ) -> Self {
        Self {
            ledger,
            notifier,
            milestones,
            consistency,
        }
    }

    /// Append a reward to the ledger and notify on success.
    pub async fn grant(
        &self,
        user_id: &UserId,
        amount: i64,
        reward_type: RewardType,
        idempotency_key: Option<String>,
        related_id: Option<String>,
        description: String,
    ) -> Result<AppendOutcome, DomainError> {
        let entry = LedgerEntry::new(
            user_id.clone(),
            amount,
            reward_type,
            idempotency_key,
            related_id,
            description,
        )?;

        let outcome = self.ledger.append(&entry).await?;

        match &outcome {
            AppendOutcome::Created(created) => {
                info!(
                    "[reward] granted user_id={} type={} amount={} key={}",
                    user_id,
                    reward_type,
                    created.amount(),
                    created.idempotency_key().unwrap_or("-")
                );
                self.dispatch_notification(RewardNotification {
                    user_id: user_id.clone(),
                    reward_type,
                    amount: created.amount(),
                    related_id: created.related_id().map(str::to_string),
                    description: created.description().to_string(),
                });
            }
            AppendOutcome::Duplicate(existing) => {
                debug!(
                    "[reward] duplicate suppressed user_id={} key={}",
                    user_id,
                    existing.idempotency_key().unwrap_or("-")
                );
            }
        }

        Ok(outcome)
    }

    /// Award any milestone matching a freshly updated streak count.
    pub async fn evaluate_milestones(
        &self,
        user_id: &UserId,
        kind: StreakKind,
        new_count: u32,
    ) -> Result<(), DomainError> {
        for milestone in self.milestones.matching(kind, new_count) {
            self.grant(
                user_id,
                milestone.reward_credits,
                RewardType::StreakReward,
                Some(milestone.idempotency_key()),
                None,
                milestone.display_name.clone(),
            )
            .await?;
        }
        Ok(())
    }

    /// Award the lifetime active-day bonus when the total hits a
    /// multiple of the configured interval.
    pub async fn evaluate_consistency(
        &self,
        user_id: &UserId,
        total_active_days: u32,
    ) -> Result<(), DomainError> {
        if let Some(bonus) = self.consistency.bonus_for(total_active_days) {
            self.grant(
                user_id,
                bonus.credits,
                RewardType::BalancedActivityBonus,
                Some(bonus.idempotency_key),
                None,
                format!("Balanced activity bonus: {} active days", bonus.total_active_days),
            )
            .await?;
        }
        Ok(())
    }

    fn dispatch_notification(&self, notification: RewardNotification) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify_reward(&notification).await {
                warn!(
                    "[reward] notification dispatch failed user_id={} type={} err={}",
                    notification.user_id, notification.reward_type, e
                );
            }
        });
    }
}
