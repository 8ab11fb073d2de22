use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the three independently-evolving streak lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreakKind {
    Presence,
    Kindness,
    Response,
}

impl StreakKind {
    /// Wire name used in idempotency keys and persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakKind::Presence => "PRESENCE",
            StreakKind::Kindness => "KINDNESS",
            StreakKind::Response => "RESPONSE",
        }
    }

    /// Only the presence track may spend the shared grace period.
    pub fn grace_eligible(&self) -> bool {
        matches!(self, StreakKind::Presence)
    }
}

impl std::fmt::Display for StreakKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Daily-activity counter for a single streak line.
///
/// `cycle` counts how many times the track has been restarted after a
/// break of more than one accumulated day; it is display data, but must
/// still evolve deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakTrack {
    pub count: u32,
    pub cycle: u32,
    pub last_active_date: Option<NaiveDate>,
}

impl StreakTrack {
    pub fn empty() -> Self {
        Self {
            count: 0,
            cycle: 0,
            last_active_date: None,
        }
    }

    pub fn restore(count: u32, cycle: u32, last_active_date: Option<NaiveDate>) -> Self {
        Self {
            count,
            cycle,
            last_active_date,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.last_active_date.is_some()
    }

    /// Whether this track was active on the given calendar day.
    pub fn active_on(&self, date: NaiveDate) -> bool {
        self.last_active_date == Some(date)
    }
}

impl Default for StreakTrack {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_presence_is_grace_eligible() {
        assert!(StreakKind::Presence.grace_eligible());
        assert!(!StreakKind::Kindness.grace_eligible());
        assert!(!StreakKind::Response.grace_eligible());
    }

    #[test]
    fn test_empty_track() {
        let track = StreakTrack::empty();
        assert_eq!(track.count, 0);
        assert_eq!(track.cycle, 0);
        assert!(!track.is_initialized());
    }

    #[test]
    fn test_active_on() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let track = StreakTrack::restore(3, 1, Some(date));
        assert!(track.active_on(date));
        assert!(!track.active_on(date.succ_opt().unwrap()));
    }
}
