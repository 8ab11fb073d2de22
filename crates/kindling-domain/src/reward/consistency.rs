use serde::{Deserialize, Serialize};

/// Lifetime active-day bonus rule: every `interval_days`-th presence day
/// pays `bonus_credits`, keyed on the lifetime total so each multiple pays
/// once ever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyPolicy {
    pub interval_days: u32,
    pub bonus_credits: i64,
}

impl Default for ConsistencyPolicy {
    fn default() -> Self {
        Self {
            interval_days: 10,
            bonus_credits: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyBonus {
    pub idempotency_key: String,
    pub credits: i64,
    pub total_active_days: u32,
}

impl ConsistencyPolicy {
    pub fn bonus_for(&self, total_active_days: u32) -> Option<ConsistencyBonus> {
        if total_active_days == 0 || total_active_days % self.interval_days != 0 {
            return None;
        }

        Some(ConsistencyBonus {
            idempotency_key: format!("CONSISTENCY_{}", total_active_days),
            credits: self.bonus_credits,
            total_active_days,
        })
    }
}
