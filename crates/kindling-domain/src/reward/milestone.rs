use serde::{Deserialize, Serialize};

use crate::streak::StreakKind;

/// One streak-count threshold paying a one-time lifetime reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub streak_kind: StreakKind,
    pub required_count: u32,
    pub reward_credits: i64,
    pub display_name: String,
}

impl Milestone {
    /// Idempotency key independent of the track's cycle: the milestone is
    /// a lifetime achievement, paid once ever per streak kind.
    pub fn idempotency_key(&self) -> String {
        format!(
            "STREAK_REWARD_{}_{}",
            self.streak_kind.as_str(),
            self.required_count
        )
    }
}

/// Immutable milestone table, injected where needed so tests can swap it.
#[derive(Debug, Clone)]
pub struct MilestoneCatalog {
    milestones: Vec<Milestone>,
}

impl MilestoneCatalog {
    pub fn new(milestones: Vec<Milestone>) -> Self {
        Self { milestones }
    }

    /// Milestones matching a freshly updated count. Exact match only: a
    /// milestone fires at the crossing update, never retroactively.
    pub fn matching(&self, kind: StreakKind, count: u32) -> Vec<&Milestone> {
        self.milestones
            .iter()
            .filter(|m| m.streak_kind == kind && m.required_count == count)
            .collect()
    }

    pub fn all(&self) -> &[Milestone] {
        &self.milestones
    }
}

impl Default for MilestoneCatalog {
    fn default() -> Self {
        let entry = |id: &str, kind: StreakKind, count: u32, credits: i64, name: &str| Milestone {
            id: id.to_string(),
            streak_kind: kind,
            required_count: count,
            reward_credits: credits,
            display_name: name.to_string(),
        };

        Self::new(vec![
            entry("presence-3", StreakKind::Presence, 3, 15, "3-Day Presence Streak"),
            entry("presence-7", StreakKind::Presence, 7, 40, "One Week of Presence"),
            entry("presence-14", StreakKind::Presence, 14, 90, "Two Weeks of Presence"),
            entry("presence-30", StreakKind::Presence, 30, 200, "30-Day Presence Streak"),
            entry("presence-60", StreakKind::Presence, 60, 450, "60-Day Presence Streak"),
            entry("presence-100", StreakKind::Presence, 100, 800, "100-Day Presence Streak"),
            entry("kindness-7", StreakKind::Kindness, 7, 50, "One Week of Kindness"),
            entry("kindness-30", StreakKind::Kindness, 30, 250, "30 Days of Kindness"),
            entry("response-7", StreakKind::Response, 7, 50, "One Week of Responses"),
            entry("response-30", StreakKind::Response, 30, 250, "30 Days of Responses"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let catalog = MilestoneCatalog::default();

        assert_eq!(catalog.matching(StreakKind::Presence, 7).len(), 1);
        assert!(catalog.matching(StreakKind::Presence, 8).is_empty());
        assert!(catalog.matching(StreakKind::Presence, 6).is_empty());
    }

    #[test]
    fn test_kinds_do_not_cross_match() {
        let catalog = MilestoneCatalog::default();

        assert!(catalog.matching(StreakKind::Kindness, 3).is_empty());
        assert_eq!(catalog.matching(StreakKind::Kindness, 7).len(), 1);
    }

    #[test]
    fn test_idempotency_key_ignores_cycle() {
        let catalog = MilestoneCatalog::default();
        let milestone = catalog.matching(StreakKind::Presence, 7)[0];

        assert_eq!(milestone.idempotency_key(), "STREAK_REWARD_PRESENCE_7");
    }

    #[test]
    fn test_custom_catalog_is_injectable() {
        let catalog = MilestoneCatalog::new(vec![Milestone {
            id: "response-2".to_string(),
            streak_kind: StreakKind::Response,
            required_count: 2,
            reward_credits: 10,
            display_name: "Quick Echo".to_string(),
        }]);

        assert_eq!(catalog.matching(StreakKind::Response, 2).len(), 1);
        assert!(catalog.matching(StreakKind::Presence, 7).is_empty());
    }
}
