use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use kindling_app::application::config::EngineConfig;
use kindling_app::application::season_seeder;
use kindling_app::application::services::{RewardService, SeasonService, SeasonSweep};
use kindling_domain::reward::{MilestoneCatalog, RewardLedger};
use kindling_domain::season::{
    SeasonAnnouncementRepository, SeasonCounterRepository, SeasonDefinitionRepository,
};
use kindling_domain::streak::StreakStateRepository;
use kindling_infrastructure::logging;
use kindling_infrastructure::notification::{create_notifier, NotifierConfig};
use kindling_infrastructure::persistence::repositories::{
    SqliteRewardLedger, SqliteSeasonAnnouncementRepository, SqliteSeasonCounterRepository,
    SqliteSeasonDefinitionRepository, SqliteStreakStateRepository,
};
use kindling_infrastructure::persistence::Database;

fn data_dir() -> PathBuf {
    std::env::var("KINDLING_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("kindling")
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    let data_dir = data_dir();
    logging::init_logger(data_dir.join("logs"))?;

    let db_path = data_dir.join("kindling.db");
    let database = Database::new(db_path.to_str().context("Data dir is not valid UTF-8")?).await?;
    database.run_migrations().await?;
    let pool = Arc::new(database.pool().clone());

    let streak_repo: Arc<dyn StreakStateRepository> =
        Arc::new(SqliteStreakStateRepository::new(Arc::clone(&pool)));
    let ledger: Arc<dyn RewardLedger> = Arc::new(SqliteRewardLedger::new(Arc::clone(&pool)));
    let definitions: Arc<dyn SeasonDefinitionRepository> =
        Arc::new(SqliteSeasonDefinitionRepository::new(Arc::clone(&pool)));
    let counters: Arc<dyn SeasonCounterRepository> =
        Arc::new(SqliteSeasonCounterRepository::new(Arc::clone(&pool)));
    let announcements: Arc<dyn SeasonAnnouncementRepository> =
        Arc::new(SqliteSeasonAnnouncementRepository::new(Arc::clone(&pool)));

    season_seeder::seed_builtin_seasons(Arc::clone(&definitions)).await?;

    let notifier_config = match std::env::var("KINDLING_REWARD_WEBHOOK") {
        Ok(url) => NotifierConfig::Webhook { url },
        Err(_) => NotifierConfig::Disabled,
    };
    let notifier = create_notifier(&notifier_config)?;

    let config = EngineConfig::default();
    let rewards = Arc::new(RewardService::new(
        Arc::clone(&ledger),
        Arc::clone(&notifier),
        MilestoneCatalog::default(),
        config.consistency.clone(),
    ));
    let seasons = Arc::new(SeasonService::new(
        Arc::clone(&definitions),
        counters,
        announcements,
        rewards,
        Arc::clone(&notifier),
    ));

    let sweep = Arc::new(SeasonSweep::new(
        Arc::clone(&streak_repo),
        Arc::clone(&definitions),
        seasons,
        &config,
    ));
    let sweep_handle = sweep.start();

    info!("[engine] started data_dir={}", data_dir.display());

    tokio::signal::ctrl_c().await?;
    info!("[engine] shutdown requested");
    sweep_handle.abort();

    Ok(())
}
