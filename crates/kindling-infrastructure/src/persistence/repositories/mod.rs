mod reward_ledger_repo;
mod season_announcement_repo;
mod season_counter_repo;
mod season_definition_repo;
mod streak_state_repo;

pub use reward_ledger_repo::SqliteRewardLedger;
pub use season_announcement_repo::SqliteSeasonAnnouncementRepository;
pub use season_counter_repo::SqliteSeasonCounterRepository;
pub use season_definition_repo::SqliteSeasonDefinitionRepository;
pub use streak_state_repo::SqliteStreakStateRepository;
