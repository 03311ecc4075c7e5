//! Burn history.
//!
//! A capped, most-recent-first list of confirmed burns kept in the local
//! store under [`BURN_HISTORY_KEY`]. It is a convenience for the operator
//! and never consulted for ledger state.

use crate::config::Network;
use crate::error::ConsoleResult;
use crate::store::LocalStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const BURN_HISTORY_KEY: &str = "tokenBurnHistory";
pub const MAX_RECORDS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Confirmed,
    Failed,
}

/// One burn as shown in the history table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    pub signature: String,
    pub mint_address: String,
    /// Amount as the user typed it.
    pub amount: String,
    pub raw_amount: String,
    pub decimals: u8,
    pub timestamp: DateTime<Utc>,
    pub network: Network,
    pub status: RecordStatus,
}

pub struct OperationLog {
    store: LocalStore,
    key: &'static str,
}

impl OperationLog {
    pub fn burns(store: LocalStore) -> Self {
        Self {
            store,
            key: BURN_HISTORY_KEY,
        }
    }

    /// All records, newest first.
    pub fn list(&self) -> ConsoleResult<Vec<OperationRecord>> {
        Ok(self.store.get(self.key)?.unwrap_or_default())
    }

    /// Put `record` at the head and drop anything past [`MAX_RECORDS`].
    pub fn record(&self, record: OperationRecord) -> ConsoleResult<Vec<OperationRecord>> {
        let mut records = self.list()?;
        records.insert(0, record);
        records.truncate(MAX_RECORDS);
        self.store.set(self.key, &records)?;
        debug!(key = self.key, len = records.len(), "history updated");
        Ok(records)
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn clear(&self) -> ConsoleResult<()> {
        self.store.remove(self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::temp_store;

    fn record(n: usize) -> OperationRecord {
        OperationRecord {
            signature: format!("sig{}", n),
            mint_address: "So11111111111111111111111111111111111111112".to_string(),
            amount: "1.5".to_string(),
            raw_amount: "1500000".to_string(),
            decimals: 6,
            timestamp: Utc::now(),
            network: Network::Devnet,
            status: RecordStatus::Confirmed,
        }
    }

    #[test]
    fn test_newest_first() {
        let log = OperationLog::burns(temp_store("history-order"));
        log.record(record(1)).unwrap();
        log.record(record(2)).unwrap();

        let records = log.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].signature, "sig2");
        log.clear().unwrap();
    }

    #[test]
    fn test_capped_at_fifty() {
        let log = OperationLog::burns(temp_store("history-cap"));
        for n in 0..MAX_RECORDS {
            log.record(record(n)).unwrap();
        }
        let records = log.record(record(999)).unwrap();

        assert_eq!(records.len(), MAX_RECORDS);
        assert_eq!(records[0].signature, "sig999");
        // oldest one fell off the tail
        assert!(records.iter().all(|r| r.signature != "sig0"));
        log.clear().unwrap();
    }

    #[test]
    fn test_stored_shape() {
        let store = temp_store("history-shape");
        let log = OperationLog::burns(store.clone());
        log.record(record(1)).unwrap();

        let raw: serde_json::Value = store.get(BURN_HISTORY_KEY).unwrap().unwrap();
        let first = &raw[0];
        assert_eq!(first["mintAddress"], "So11111111111111111111111111111111111111112");
        assert_eq!(first["rawAmount"], "1500000");
        assert_eq!(first["network"], "devnet");
        assert_eq!(first["status"], "confirmed");
        log.clear().unwrap();
    }
}
