use async_trait::async_trait;

use super::ledger::{AppendOutcome, LedgerEntry};
use crate::shared::{DomainError, UserId};

/// Append-only credit transaction log.
///
/// Implementations must make `append` atomic for keyed entries: two
/// concurrent appends with the same (user, key) must yield exactly one
/// stored entry, with the loser observing `AppendOutcome::Duplicate`.
#[async_trait]
pub trait RewardLedger: Send + Sync {
    async fn append(&self, entry: &LedgerEntry) -> Result<AppendOutcome, DomainError>;

    async fn balance(&self, user_id: &UserId) -> Result<i64, DomainError>;

    async fn find_recent(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<LedgerEntry>, DomainError>;
}
