//! Wallet read-path models

use chrono::{TimeZone, Utc};

/// Point-in-time view of an address: balance plus recent history.
/// Refreshed wholesale on each read; the last fetch wins, nothing is merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletSnapshot {
    pub address: String,
    /// Balance in nanotons; `None` when unknown (never read, or a read failed)
    pub balance: Option<u64>,
    pub transactions: Vec<TransactionRecord>,
}

impl WalletSnapshot {
    /// The snapshot returned when a read fails: balance unset, no history
    pub fn empty(address: &str) -> Self {
        WalletSnapshot {
            address: address.to_string(),
            balance: None,
            transactions: Vec::new(),
        }
    }
}

/// One entry of the recent-transaction list
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Unix timestamp of the transaction
    pub utime: i64,
    /// Inbound value in nanotons; 0 for outgoing records
    pub value_nano: u64,
    /// Counterparty address of the inbound message, when present
    pub source: Option<String>,
    pub inbound: bool,
}

impl TransactionRecord {
    pub fn timestamp(&self) -> String {
        Utc.timestamp_opt(self.utime, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = WalletSnapshot::empty("EQDrjaLahLkMB");
        assert_eq!(snapshot.address, "EQDrjaLahLkMB");
        assert_eq!(snapshot.balance, None);
        assert!(snapshot.transactions.is_empty());
    }

    #[test]
    fn test_record_timestamp_rendering() {
        let record = TransactionRecord {
            utime: 0,
            value_nano: 0,
            source: None,
            inbound: false,
        };
        assert_eq!(record.timestamp(), "1970-01-01 00:00:00");
    }
}
