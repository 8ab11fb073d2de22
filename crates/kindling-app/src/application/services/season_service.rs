use log::{debug, warn};
use std::sync::Arc;

use chrono::NaiveDate;

use kindling_domain::reward::{RewardNotifier, RewardType, SeasonAnnouncement};
use kindling_domain::season::{
    SeasonAnnouncementRepository, SeasonCounterRepository, SeasonDefinitionRepository,
    SeasonalEventDefinition, SeasonalRuleType,
};
use kindling_domain::shared::{DomainError, UserId};

use super::reward_service::RewardService;

/// Seasonal rule engine
///
/// Applies date-windowed, per-user capped bonus rules and owns the
/// one-time season-start announcement gate.
pub struct SeasonService {
    definitions: Arc<dyn SeasonDefinitionRepository>,
    counters: Arc<dyn SeasonCounterRepository>,
    announcements: Arc<dyn SeasonAnnouncementRepository>,
    rewards: Arc<RewardService>,
    notifier: Arc<dyn RewardNotifier>,
}

impl SeasonService {
    pub fn new(
        definitions: Arc<dyn SeasonDefinitionRepository>,
        counters: Arc<dyn SeasonCounterRepository>,
        announcements: Arc<dyn SeasonAnnouncementRepository>,
        rewards: Arc<RewardService>,
        notifier: Arc<dyn RewardNotifier>,
    ) -> Self {
        Self {
            definitions,
            counters,
            announcements,
            rewards,
            notifier,
        }
    }

    /// Evaluate one qualifying event against every open season. Returns
    /// how many bonuses were granted.
    pub async fn evaluate(
        &self,
        user_id: &UserId,
        rule_type: SeasonalRuleType,
        date: NaiveDate,
        related_id: Option<&str>,
    ) -> Result<u32, DomainError> {
        let open = self.definitions.find_open_on(date).await?;
        if open.is_empty() {
            return Ok(0);
        }

        let mut granted = 0;
        for definition in &open {
            for rule in definition.rules_matching(rule_type) {
                if rule.max_total == 0 {
                    continue;
                }

                let count = self
                    .counters
                    .try_increment(user_id, definition.id(), rule_type, rule.max_total)
                    .await?;

                match count {
                    Some(n) => {
                        // The counter value keys the reward, so each of
                        // the capped slots pays at most once even when
                        // the event is re-delivered.
                        let key =
                            format!("SEASON_{}_{}_{}", definition.id(), rule_type.as_str(), n);
                        self.rewards
                            .grant(
                                user_id,
                                rule.bonus_credits,
                                RewardType::SeasonReward,
                                Some(key),
                                related_id.map(str::to_string),
                                format!("{} Appreciation", definition.name()),
                            )
                            .await?;
                        granted += 1;
                    }
                    None => {
                        debug!(
                            "[season] cap reached user_id={} season={} rule={}",
                            user_id,
                            definition.id(),
                            rule_type
                        );
                    }
                }
            }
        }

        Ok(granted)
    }

    /// One-time season-start announcement for a user. Returns true when
    /// this call newly announced the season. The mark is the atomic
    /// gate; a failed notification afterwards is logged, not retried.
    pub async fn announce_to_user(
        &self,
        user_id: &UserId,
        definition: &SeasonalEventDefinition,
    ) -> Result<bool, DomainError> {
        let newly_marked = self
            .announcements
            .try_mark_announced(user_id, definition.id())
            .await?;

        if !newly_marked {
            return Ok(false);
        }

        let announcement = SeasonAnnouncement {
            user_id: user_id.clone(),
            season_id: definition.id().to_string(),
            season_name: definition.name().to_string(),
        };

        if let Err(e) = self.notifier.notify_season_start(&announcement).await {
            warn!(
                "[season] announcement dispatch failed user_id={} season={} err={}",
                user_id,
                definition.id(),
                e
            );
        }

        Ok(true)
    }
}
