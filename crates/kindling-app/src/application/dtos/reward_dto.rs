use serde::{Deserialize, Serialize};

use kindling_domain::reward::LedgerEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryDto {
    pub id: String,
    pub user_id: String,
    pub amount: i64,
    pub entry_type: String,
    pub description: String,
    pub related_id: Option<String>,
    pub created_at: String, // ISO 8601 timestamp
}

impl From<&LedgerEntry> for LedgerEntryDto {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: entry.id().as_str().to_string(),
            user_id: entry.user_id().as_str().to_string(),
            amount: entry.amount(),
            entry_type: entry.entry_type().as_str().to_string(),
            description: entry.description().to_string(),
            related_id: entry.related_id().map(str::to_string),
            created_at: entry.created_at().to_rfc3339(),
        }
    }
}
