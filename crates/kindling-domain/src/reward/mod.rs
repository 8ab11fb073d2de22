mod consistency;
mod ledger;
mod milestone;
mod notifier;
mod repository;

pub use consistency::{ConsistencyBonus, ConsistencyPolicy};
pub use ledger::{AppendOutcome, LedgerEntry, RewardType};
pub use milestone::{Milestone, MilestoneCatalog};
pub use notifier::{RewardNotification, RewardNotifier, SeasonAnnouncement};
pub use repository::RewardLedger;
