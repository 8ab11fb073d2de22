use serde::{Deserialize, Serialize};

use kindling_domain::streak::{StreakTrack, UserStreakState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakTrackDto {
    pub count: u32,
    pub cycle: u32,
    pub last_active_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
}

impl StreakTrackDto {
    fn from_track(track: &StreakTrack) -> Self {
        Self {
            count: track.count,
            cycle: track.cycle,
            last_active_date: track
                .last_active_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }

    fn zero() -> Self {
        Self {
            count: 0,
            cycle: 0,
            last_active_date: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStreakStatusDto {
    pub user_id: String,
    pub presence: StreakTrackDto,
    pub kindness: StreakTrackDto,
    pub response: StreakTrackDto,
    pub total_active_days: u32,
    pub grace_period_used_at: Option<String>, // ISO 8601 timestamp
}

impl UserStreakStatusDto {
    pub fn from_state(state: &UserStreakState) -> Self {
        Self {
            user_id: state.user_id().as_str().to_string(),
            presence: StreakTrackDto::from_track(state.presence()),
            kindness: StreakTrackDto::from_track(state.kindness()),
            response: StreakTrackDto::from_track(state.response()),
            total_active_days: state.total_active_days(),
            grace_period_used_at: state.grace_period_used_at().map(|t| t.to_rfc3339()),
        }
    }

    /// Default record for users with no activity yet.
    pub fn zero(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            presence: StreakTrackDto::zero(),
            kindness: StreakTrackDto::zero(),
            response: StreakTrackDto::zero(),
            total_active_days: 0,
            grace_period_used_at: None,
        }
    }
}
