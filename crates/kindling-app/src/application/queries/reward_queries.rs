use kindling_domain::reward::RewardLedger;
use kindling_domain::shared::{DomainError, UserId};

use crate::application::dtos::LedgerEntryDto;

/// Current credit balance for a user.
pub async fn get_balance(ledger: &dyn RewardLedger, user_id: &str) -> Result<i64, DomainError> {
    ledger.balance(&UserId::from_string(user_id)).await
}

/// Most recent ledger entries for a user, newest first.
pub async fn get_recent_rewards(
    ledger: &dyn RewardLedger,
    user_id: &str,
    limit: u32,
) -> Result<Vec<LedgerEntryDto>, DomainError> {
    let entries = ledger
        .find_recent(&UserId::from_string(user_id), limit)
        .await?;

    Ok(entries.iter().map(LedgerEntryDto::from).collect())
}
