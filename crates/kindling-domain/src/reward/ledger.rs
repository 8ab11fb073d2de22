use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, LedgerEntryId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardType {
    StreakReward,
    BalancedActivityBonus,
    SeasonReward,
    Purchase,
}

impl RewardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardType::StreakReward => "STREAK_REWARD",
            RewardType::BalancedActivityBonus => "BALANCED_ACTIVITY_BONUS",
            RewardType::SeasonReward => "SEASON_REWARD",
            RewardType::Purchase => "PURCHASE",
        }
    }
}

impl FromStr for RewardType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STREAK_REWARD" => Ok(RewardType::StreakReward),
            "BALANCED_ACTIVITY_BONUS" => Ok(RewardType::BalancedActivityBonus),
            "SEASON_REWARD" => Ok(RewardType::SeasonReward),
            "PURCHASE" => Ok(RewardType::Purchase),
            other => Err(DomainError::Deserialization(format!(
                "Unknown reward type: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for RewardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable credit transaction.
///
/// For any non-null idempotency key, at most one entry with that
/// (user, key) pair may ever exist; entries without a key always append
/// (non-deduplicated transactions such as purchases).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    id: LedgerEntryId,
    user_id: UserId,
    amount: i64,
    entry_type: RewardType,
    idempotency_key: Option<String>,
    related_id: Option<String>,
    description: String,
    created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(
        user_id: UserId,
        amount: i64,
        entry_type: RewardType,
        idempotency_key: Option<String>,
        related_id: Option<String>,
        description: String,
    ) -> Result<Self, DomainError> {
        if amount == 0 {
            return Err(DomainError::Validation(
                "Ledger entry amount cannot be zero".to_string(),
            ));
        }

        if let Some(key) = &idempotency_key {
            if key.trim().is_empty() {
                return Err(DomainError::Validation(
                    "Idempotency key cannot be blank".to_string(),
                ));
            }
        }

        Ok(Self {
            id: LedgerEntryId::new(),
            user_id,
            amount,
            entry_type,
            idempotency_key,
            related_id,
            description,
            created_at: Utc::now(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: LedgerEntryId,
        user_id: UserId,
        amount: i64,
        entry_type: RewardType,
        idempotency_key: Option<String>,
        related_id: Option<String>,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            amount,
            entry_type,
            idempotency_key,
            related_id,
            description,
            created_at,
        }
    }

    // Getters
    pub fn id(&self) -> &LedgerEntryId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn entry_type(&self) -> RewardType {
        self.entry_type
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    pub fn related_id(&self) -> Option<&str> {
        self.related_id.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Result of an idempotent append.
#[derive(Debug, Clone)]
pub enum AppendOutcome {
    /// A new entry was recorded.
    Created(LedgerEntry),
    /// An entry with this (user, key) already existed; nothing was
    /// written and no balance changed.
    Duplicate(LedgerEntry),
}

impl AppendOutcome {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AppendOutcome::Duplicate(_))
    }

    pub fn entry(&self) -> &LedgerEntry {
        match self {
            AppendOutcome::Created(entry) | AppendOutcome::Duplicate(entry) => entry,
        }
    }
}
