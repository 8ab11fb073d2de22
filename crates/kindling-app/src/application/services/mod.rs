mod activity_service;
mod reward_service;
mod season_service;
mod season_sweep;


pub use activity_service::{ActivityService, RecordActivityCommand};
pub use reward_service::RewardService;
pub use season_service::SeasonService;
pub use season_sweep::{SeasonSweep, SweepStats};
