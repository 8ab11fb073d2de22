use std::time::Duration;

use kindling_domain::reward::ConsistencyPolicy;

/// Centralized engine tuning knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Days between grace-period uses (default: 7)
    pub grace_cooldown_days: i64,

    /// Bounded retries for optimistic streak-state writes (default: 3)
    pub state_update_retries: u32,

    /// Users per batch in the seasonal sweep (default: 100)
    pub sweep_batch_size: u32,

    /// Interval between seasonal sweep runs (default: 1 hour)
    pub sweep_period: Duration,

    /// Lifetime active-day bonus rule
    pub consistency: ConsistencyPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grace_cooldown_days: 7,
            state_update_retries: 3,
            sweep_batch_size: 100,
            sweep_period: Duration::from_secs(60 * 60),
            consistency: ConsistencyPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set grace cooldown in days
    pub fn with_grace_cooldown_days(mut self, days: i64) -> Self {
        self.grace_cooldown_days = days;
        self
    }

    /// Builder pattern: set retry bound for state writes
    pub fn with_state_update_retries(mut self, retries: u32) -> Self {
        self.state_update_retries = retries;
        self
    }

    /// Builder pattern: set sweep batch size
    pub fn with_sweep_batch_size(mut self, size: u32) -> Self {
        self.sweep_batch_size = size;
        self
    }

    /// Builder pattern: set sweep period
    pub fn with_sweep_period(mut self, period: Duration) -> Self {
        self.sweep_period = period;
        self
    }

    /// Builder pattern: set the consistency bonus policy
    pub fn with_consistency(mut self, policy: ConsistencyPolicy) -> Self {
        self.consistency = policy;
        self
    }
}
