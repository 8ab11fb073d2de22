use async_trait::async_trait;

use super::state::UserStreakState;
use crate::shared::{DomainError, UserId};

/// Durable store for per-user streak state.
///
/// `update` is a versioned conditional write: implementations must fail
/// with `DomainError::StaleState` when the stored version no longer
/// matches `state.version()`, and `insert` must map a concurrent
/// first-write collision the same way so callers can re-read and retry.
#[async_trait]
pub trait StreakStateRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStreakState>, DomainError>;

    async fn insert(&self, state: &UserStreakState) -> Result<(), DomainError>;

    async fn update(&self, state: &UserStreakState) -> Result<(), DomainError>;

    /// Page through known user ids for background sweeps.
    async fn list_user_ids(&self, offset: u32, limit: u32) -> Result<Vec<UserId>, DomainError>;
}
