pub mod reward_queries;
pub mod streak_status_queries;
