mod reward_dto;
mod streak_dto;

pub use reward_dto::LedgerEntryDto;
pub use streak_dto::{StreakTrackDto, UserStreakStatusDto};
