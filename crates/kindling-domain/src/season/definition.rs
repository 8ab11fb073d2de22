use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Event kinds a seasonal rule can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeasonalRuleType {
    SendPositive,
    Respond,
    Comeback,
    BalancedDayMultiplier,
}

impl SeasonalRuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonalRuleType::SendPositive => "SEND_POSITIVE",
            SeasonalRuleType::Respond => "RESPOND",
            SeasonalRuleType::Comeback => "COMEBACK",
            SeasonalRuleType::BalancedDayMultiplier => "BALANCED_DAY_MULTIPLIER",
        }
    }
}

impl FromStr for SeasonalRuleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SEND_POSITIVE" => Ok(SeasonalRuleType::SendPositive),
            "RESPOND" => Ok(SeasonalRuleType::Respond),
            "COMEBACK" => Ok(SeasonalRuleType::Comeback),
            "BALANCED_DAY_MULTIPLIER" => Ok(SeasonalRuleType::BalancedDayMultiplier),
            other => Err(DomainError::Deserialization(format!(
                "Unknown seasonal rule type: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SeasonalRuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-event-type bonus with a hard per-user cap for the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalRule {
    pub rule_type: SeasonalRuleType,
    pub bonus_credits: i64,
    pub max_total: u32,
}

/// A named, date-windowed seasonal campaign.
///
/// Ids encode the year (e.g. "VALENTINE_2026"), so a new season's
/// counters start fresh without explicit rollover logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalEventDefinition {
    id: String,
    name: String,
    year: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    rules: Vec<SeasonalRule>,
    is_active: bool,
}

impl SeasonalEventDefinition {
    pub fn new(
        id: String,
        name: String,
        year: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rules: Vec<SeasonalRule>,
        is_active: bool,
    ) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::Validation(
                "Season id cannot be empty".to_string(),
            ));
        }

        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Season name cannot be empty".to_string(),
            ));
        }

        if start_date > end_date {
            return Err(DomainError::Validation(format!(
                "Season window is inverted: {} > {}",
                start_date, end_date
            )));
        }

        Ok(Self {
            id,
            name,
            year,
            start_date,
            end_date,
            rules,
            is_active,
        })
    }

    /// Whether this season applies on the given calendar date.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.is_active && self.start_date <= date && date <= self.end_date
    }

    /// Two active definitions for the same year may not overlap; this is
    /// checked where definitions are created, not by the evaluator.
    pub fn overlaps_window(&self, other: &SeasonalEventDefinition) -> bool {
        self.is_active
            && other.is_active
            && self.year == other.year
            && self.start_date <= other.end_date
            && other.start_date <= self.end_date
    }

    pub fn rules_matching(&self, rule_type: SeasonalRuleType) -> Vec<&SeasonalRule> {
        self.rules
            .iter()
            .filter(|r| r.rule_type == rule_type)
            .collect()
    }

    // Getters
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn rules(&self) -> &[SeasonalRule] {
        &self.rules
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valentine() -> SeasonalEventDefinition {
        SeasonalEventDefinition::new(
            "VALENTINE_2026".to_string(),
            "Valentine Week".to_string(),
            2026,
            day(2026, 2, 7),
            day(2026, 2, 14),
            vec![SeasonalRule {
                rule_type: SeasonalRuleType::SendPositive,
                bonus_credits: 3,
                max_total: 5,
            }],
            true,
        )
        .expect("valid definition")
    }

    #[test]
    fn test_inverted_window_rejected() {
        let result = SeasonalEventDefinition::new(
            "VALENTINE_2026".to_string(),
            "Valentine Week".to_string(),
            2026,
            day(2026, 2, 14),
            day(2026, 2, 7),
            vec![],
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_window_is_inclusive_on_both_ends() {
        let season = valentine();

        assert!(season.is_open_on(day(2026, 2, 7)));
        assert!(season.is_open_on(day(2026, 2, 14)));
        assert!(!season.is_open_on(day(2026, 2, 6)));
        assert!(!season.is_open_on(day(2026, 2, 15)));
    }

    #[test]
    fn test_inactive_season_is_closed() {
        let season = SeasonalEventDefinition::new(
            "VALENTINE_2026".to_string(),
            "Valentine Week".to_string(),
            2026,
            day(2026, 2, 7),
            day(2026, 2, 14),
            vec![],
            false,
        )
        .expect("valid definition");

        assert!(!season.is_open_on(day(2026, 2, 10)));
    }

    #[test]
    fn test_overlap_detection() {
        let first = valentine();
        let same_year = SeasonalEventDefinition::new(
            "SPRING_2026".to_string(),
            "Spring Days".to_string(),
            2026,
            day(2026, 2, 12),
            day(2026, 2, 20),
            vec![],
            true,
        )
        .expect("valid definition");
        let disjoint = SeasonalEventDefinition::new(
            "GRATITUDE_2026".to_string(),
            "Gratitude Week".to_string(),
            2026,
            day(2026, 11, 23),
            day(2026, 11, 29),
            vec![],
            true,
        )
        .expect("valid definition");

        assert!(first.overlaps_window(&same_year));
        assert!(!first.overlaps_window(&disjoint));
    }

    #[test]
    fn test_rules_matching_filters_by_type() {
        let season = valentine();

        assert_eq!(
            season.rules_matching(SeasonalRuleType::SendPositive).len(),
            1
        );
        assert!(season.rules_matching(SeasonalRuleType::Comeback).is_empty());
    }

    #[test]
    fn test_rule_type_parse_roundtrip() {
        for raw in [
            "SEND_POSITIVE",
            "RESPOND",
            "COMEBACK",
            "BALANCED_DAY_MULTIPLIER",
        ] {
            let parsed: SeasonalRuleType = raw.parse().expect("known type");
            assert_eq!(parsed.as_str(), raw);
        }
        assert!(SeasonalRuleType::from_str("DOUBLE_XP").is_err());
    }
}
