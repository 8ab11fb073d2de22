use log::{error, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::instrument;

use chrono::{NaiveDate, Utc};

use kindling_domain::season::SeasonDefinitionRepository;
use kindling_domain::shared::DomainError;
use kindling_domain::streak::StreakStateRepository;

use super::season_service::SeasonService;
use crate::application::config::EngineConfig;

#[derive(Debug, Default, Clone, Copy)]
pub struct SweepStats {
    pub announced: u32,
    pub failed: u32,
}

/// Periodic background sweep delivering season-start announcements.
///
/// Users are processed in bounded batches and failures are isolated per
/// user, so one bad record never stalls the whole sweep.
pub struct SeasonSweep {
    streak_repo: Arc<dyn StreakStateRepository>,
    definitions: Arc<dyn SeasonDefinitionRepository>,
    seasons: Arc<SeasonService>,
    batch_size: u32,
    period: std::time::Duration,
}

impl SeasonSweep {
    pub fn new(
        streak_repo: Arc<dyn StreakStateRepository>,
        definitions: Arc<dyn SeasonDefinitionRepository>,
        seasons: Arc<SeasonService>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            streak_repo,
            definitions,
            seasons,
            batch_size: config.sweep_batch_size.max(1),
            period: config.sweep_period,
        }
    }

    /// Spawn the periodic sweep loop.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        let sweep = self;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep.period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let today = Utc::now().date_naive();
                if let Err(e) = sweep.run_once(today).await {
                    error!("[sweep] season sweep failed err={}", e);
                }
            }
        })
    }

    #[instrument(skip(self))]
    pub async fn run_once(&self, today: NaiveDate) -> Result<SweepStats, DomainError> {
        let open = self.definitions.find_open_on(today).await?;
        if open.is_empty() {
            return Ok(SweepStats::default());
        }

        let mut stats = SweepStats::default();
        let mut offset = 0u32;

        loop {
            let batch = self
                .streak_repo
                .list_user_ids(offset, self.batch_size)
                .await?;
            if batch.is_empty() {
                break;
            }

            for user_id in &batch {
                for definition in &open {
                    match self.seasons.announce_to_user(user_id, definition).await {
                        Ok(true) => stats.announced += 1,
                        Ok(false) => {}
                        Err(e) => {
                            stats.failed += 1;
                            warn!(
                                "[sweep] announce failed user_id={} season={} err={}",
                                user_id,
                                definition.id(),
                                e
                            );
                        }
                    }
                }
            }

            offset += batch.len() as u32;
            if (batch.len() as u32) < self.batch_size {
                break;
            }
        }

        info!(
            "[sweep] season sweep complete seasons={} announced={} failed={}",
            open.len(),
            stats.announced,
            stats.failed
        );

        Ok(stats)
    }
}
