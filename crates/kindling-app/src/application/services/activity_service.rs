use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::instrument;

use chrono::{NaiveDate, Utc};

use kindling_domain::activity::{ActivityType, Sentiment};
use kindling_domain::season::SeasonalRuleType;
use kindling_domain::shared::{DomainError, UserId};
use kindling_domain::streak::{StreakKind, StreakStateRepository, TrackTransition, UserStreakState};

use super::reward_service::RewardService;
use super::season_service::SeasonService;
use crate::application::config::EngineConfig;
use crate::application::dtos::UserStreakStatusDto;

/// One activity event with the caller's resolved local calendar date.
///
/// Timezone resolution happens upstream; the engine never substitutes
/// server time for the user's day.
#[derive(Debug, Clone)]
pub struct RecordActivityCommand {
    pub user_id: String,
    pub activity_type: ActivityType,
    pub sentiment: Option<Sentiment>,
    pub local_date: NaiveDate,
    pub source_id: Option<String>,
}

/// Activity ingestion service
///
/// Serializes per-user streak updates, then runs reward evaluation
/// against the new state. Reward failures are logged and swallowed so
/// the triggering user action always succeeds.
pub struct ActivityService {
    streak_repo: Arc<dyn StreakStateRepository>,
    rewards: Arc<RewardService>,
    seasons: Arc<SeasonService>,
    config: EngineConfig,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ActivityService {
    pub fn new(
        streak_repo: Arc<dyn StreakStateRepository>,
        rewards: Arc<RewardService>,
        seasons: Arc<SeasonService>,
        config: EngineConfig,
    ) -> Self {
        Self {
            streak_repo,
            rewards,
            seasons,
            config,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    #[instrument(skip(self, command), fields(user_id = %command.user_id, activity = %command.activity_type))]
    pub async fn record_activity(
        &self,
        command: RecordActivityCommand,
    ) -> Result<UserStreakStatusDto, DomainError> {
        Self::validate(&command)?;
        let user_id = UserId::from_string(&command.user_id);

        let lock = self.user_lock(&command.user_id).await;
        let _guard = lock.lock().await;

        let (state, transitions) = self.apply_transitions(&user_id, &command).await?;

        self.evaluate_rewards(&user_id, &command, &state, &transitions)
            .await;

        Ok(UserStreakStatusDto::from_state(&state))
    }

    /// Zero all tracks for a user (account reset). Ledger history is
    /// untouched.
    pub async fn reset_streaks(&self, user_id: &str) -> Result<(), DomainError> {
        let user = UserId::from_string(user_id);

        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut attempts = 0;
        loop {
            let Some(mut state) = self.streak_repo.find_by_user(&user).await? else {
                return Ok(());
            };

            state.reset(Utc::now());

            match self.streak_repo.update(&state).await {
                Ok(()) => {
                    info!("[activity] streaks reset user_id={}", user);
                    return Ok(());
                }
                Err(DomainError::StaleState(msg)) => {
                    attempts += 1;
                    if attempts >= self.config.state_update_retries {
                        return Err(DomainError::StaleState(msg));
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn validate(command: &RecordActivityCommand) -> Result<(), DomainError> {
        if command.user_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "User id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Which streak tracks an event drives.
    fn tracks_for(command: &RecordActivityCommand) -> Vec<StreakKind> {
        match command.activity_type {
            ActivityType::PresenceOpen => vec![StreakKind::Presence],
            ActivityType::MessageSent => {
                if command.sentiment.is_some_and(|s| s.is_positive()) {
                    vec![StreakKind::Kindness]
                } else {
                    vec![]
                }
            }
            ActivityType::EchoBackSent => vec![StreakKind::Response],
        }
    }

    /// Read-modify-write of the user's streak row with a bounded retry
    /// on version conflicts.
    async fn apply_transitions(
        &self,
        user_id: &UserId,
        command: &RecordActivityCommand,
    ) -> Result<(UserStreakState, Vec<(StreakKind, TrackTransition)>), DomainError> {
        let kinds = Self::tracks_for(command);
        let grace_cooldown = chrono::Duration::days(self.config.grace_cooldown_days);

        let mut attempts = 0;
        loop {
            let existing = self.streak_repo.find_by_user(user_id).await?;
            let is_new = existing.is_none();
            let mut state =
                existing.unwrap_or_else(|| UserStreakState::new(user_id.clone()));

            let now = Utc::now();
            let transitions: Vec<(StreakKind, TrackTransition)> = kinds
                .iter()
                .map(|&kind| {
                    (
                        kind,
                        state.advance(kind, command.local_date, now, grace_cooldown),
                    )
                })
                .collect();

            // Same-day repeats and non-tracked events change nothing;
            // skip the write and keep the stored version.
            let changed = transitions.iter().any(|(_, t)| t.counted_day);
            if !changed {
                return Ok((state, transitions));
            }

            let result = if is_new {
                self.streak_repo.insert(&state).await
            } else {
                self.streak_repo.update(&state).await
            };

            match result {
                Ok(()) => return Ok((state, transitions)),
                Err(DomainError::StaleState(msg)) => {
                    attempts += 1;
                    if attempts >= self.config.state_update_retries {
                        return Err(DomainError::StaleState(msg));
                    }
                    debug!(
                        "[activity] stale streak state, retrying user_id={} attempt={}",
                        user_id, attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Run milestone, consistency and seasonal evaluation against the
    /// freshly persisted state. Each evaluator failure is isolated.
    async fn evaluate_rewards(
        &self,
        user_id: &UserId,
        command: &RecordActivityCommand,
        state: &UserStreakState,
        transitions: &[(StreakKind, TrackTransition)],
    ) {
        for (kind, transition) in transitions {
            if !transition.counted_day {
                continue;
            }

            if let Err(e) = self
                .rewards
                .evaluate_milestones(user_id, *kind, transition.track.count)
                .await
            {
                warn!(
                    "[activity] milestone evaluation failed user_id={} kind={} err={}",
                    user_id, kind, e
                );
            }

            if *kind == StreakKind::Presence {
                if let Err(e) = self
                    .rewards
                    .evaluate_consistency(user_id, state.total_active_days())
                    .await
                {
                    warn!(
                        "[activity] consistency evaluation failed user_id={} err={}",
                        user_id, e
                    );
                }
            }
        }

        for rule_type in Self::seasonal_events(command, state, transitions) {
            if let Err(e) = self
                .seasons
                .evaluate(
                    user_id,
                    rule_type,
                    command.local_date,
                    command.source_id.as_deref(),
                )
                .await
            {
                warn!(
                    "[activity] seasonal evaluation failed user_id={} rule={} err={}",
                    user_id, rule_type, e
                );
            }
        }
    }

    /// Map an activity event (and the transitions it caused) onto the
    /// seasonal event kinds it qualifies for.
    fn seasonal_events(
        command: &RecordActivityCommand,
        state: &UserStreakState,
        transitions: &[(StreakKind, TrackTransition)],
    ) -> Vec<SeasonalRuleType> {
        let mut events = Vec::new();

        match command.activity_type {
            ActivityType::MessageSent
                if command.sentiment.is_some_and(|s| s.is_positive()) =>
            {
                events.push(SeasonalRuleType::SendPositive);
            }
            ActivityType::EchoBackSent => {
                events.push(SeasonalRuleType::Respond);
            }
            _ => {}
        }

        // Returning after a real break (the presence streak restarted
        // today) is a comeback.
        let presence_broke = transitions
            .iter()
            .any(|(kind, t)| *kind == StreakKind::Presence && t.broke);
        if presence_broke {
            events.push(SeasonalRuleType::Comeback);
        }

        // The event that completes all three tracks on the same calendar
        // day earns the balanced-day bonus; same-day repeats do not.
        let counted = transitions.iter().any(|(_, t)| t.counted_day);
        if counted && state.balanced_day(command.local_date) {
            events.push(SeasonalRuleType::BalancedDayMultiplier);
        }

        events
    }

    async fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        Arc::clone(
            locks
                .entry(user_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}
