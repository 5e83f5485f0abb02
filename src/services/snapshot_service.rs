use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::api::toncenter::models::{ApiError, RawTransaction};
use crate::api::toncenter::ToncenterClient;
use crate::models::snapshot::{TransactionRecord, WalletSnapshot};

/// Fixed window of history fetched per refresh
pub const HISTORY_FETCH_LIMIT: u32 = 10;

lazy_static! {
    // Generation counter per address. A refresh bumps the counter before its
    // reads go out and may only commit its result while still current, so a
    // late resolution cannot clobber a newer snapshot.
    static ref SNAPSHOT_GENERATIONS: Mutex<HashMap<String, u64>> = Mutex::new(HashMap::new());

    static ref SNAPSHOT_CACHE: Mutex<HashMap<String, WalletSnapshot>> = Mutex::new(HashMap::new());
}

fn to_record(raw: &RawTransaction) -> TransactionRecord {
    let value_nano = raw
        .in_msg
        .as_ref()
        .map(|msg| msg.value_nano())
        .unwrap_or(0);

    TransactionRecord {
        utime: raw.utime,
        value_nano,
        source: raw
            .in_msg
            .as_ref()
            .and_then(|msg| msg.source.clone())
            .filter(|s| !s.is_empty()),
        inbound: value_nano > 0,
    }
}

/// Join the two concurrent reads into one snapshot.
///
/// All-or-nothing policy: when either read fails, both partial results are
/// discarded and the empty snapshot is returned; the failure is only logged.
/// Balance and history therefore always come from the same instant.
pub fn join_snapshot(
    address: &str,
    balance: Result<u64, ApiError>,
    transactions: Result<Vec<RawTransaction>, ApiError>,
) -> WalletSnapshot {
    match (balance, transactions) {
        (Ok(balance), Ok(transactions)) => WalletSnapshot {
            address: address.to_string(),
            balance: Some(balance),
            transactions: transactions.iter().map(to_record).collect(),
        },
        (balance, transactions) => {
            if let Err(e) = balance {
                warn!("Balance read for {} failed: {}", address, e);
            }
            if let Err(e) = transactions {
                warn!("History read for {} failed: {}", address, e);
            }
            WalletSnapshot::empty(address)
        }
    }
}

/// Read balance and recent history concurrently and join them
pub async fn read_snapshot(client: &ToncenterClient, address: &str) -> WalletSnapshot {
    let (balance, transactions) = tokio::join!(
        client.get_address_balance(address),
        client.get_transactions(address, HISTORY_FETCH_LIMIT),
    );

    join_snapshot(address, balance, transactions)
}

/// Start a refresh: bump and return the address's current generation
fn begin_refresh(address: &str) -> u64 {
    let mut generations = SNAPSHOT_GENERATIONS.lock().unwrap();
    let generation = generations.entry(address.to_string()).or_insert(0);
    *generation += 1;
    *generation
}

/// Commit a finished refresh unless a newer one has started since.
/// Returns false when the result was stale and discarded.
fn commit_refresh(address: &str, generation: u64, snapshot: WalletSnapshot) -> bool {
    let generations = SNAPSHOT_GENERATIONS.lock().unwrap();
    if generations.get(address).copied() != Some(generation) {
        return false;
    }

    SNAPSHOT_CACHE
        .lock()
        .unwrap()
        .insert(address.to_string(), snapshot);
    true
}

/// Last committed snapshot for an address, if any
pub fn cached_snapshot(address: &str) -> Option<WalletSnapshot> {
    SNAPSHOT_CACHE.lock().unwrap().get(address).cloned()
}

/// Refresh the cached snapshot for an address and return the winning result.
/// When a newer refresh committed while this one was in flight, the stale
/// result is discarded and the newer snapshot is returned instead.
pub async fn refresh_snapshot(client: &ToncenterClient, address: &str) -> WalletSnapshot {
    let generation = begin_refresh(address);
    let snapshot = read_snapshot(client, address).await;

    if commit_refresh(address, generation, snapshot.clone()) {
        snapshot
    } else {
        debug!("Discarding stale snapshot of {} (gen {})", address, generation);
        cached_snapshot(address).unwrap_or(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::toncenter::models::RawMessage;

    fn sample_tx(value: &str, source: &str) -> RawTransaction {
        RawTransaction {
            utime: 1_700_000_000,
            in_msg: Some(RawMessage {
                source: Some(source.to_string()),
                destination: None,
                value: Some(value.to_string()),
                message: None,
            }),
        }
    }

    #[test]
    fn test_join_both_reads_succeed() {
        let snapshot = join_snapshot(
            "EQAaddr",
            Ok(1_500_000_000),
            Ok(vec![sample_tx("250000000", "EQAsender")]),
        );

        assert_eq!(snapshot.balance, Some(1_500_000_000));
        assert_eq!(snapshot.transactions.len(), 1);
        assert!(snapshot.transactions[0].inbound);
        assert_eq!(snapshot.transactions[0].value_nano, 250_000_000);
        assert_eq!(snapshot.transactions[0].source.as_deref(), Some("EQAsender"));
    }

    #[test]
    fn test_join_discards_history_when_balance_fails() {
        // Documents the all-or-nothing policy: the surviving read is dropped
        let snapshot = join_snapshot(
            "EQAaddr",
            Err(ApiError::ServerError(503, "unavailable".to_string())),
            Ok(vec![sample_tx("250000000", "EQAsender")]),
        );

        assert_eq!(snapshot, WalletSnapshot::empty("EQAaddr"));
    }

    #[test]
    fn test_join_discards_balance_when_history_fails() {
        let snapshot = join_snapshot(
            "EQAaddr",
            Ok(1_500_000_000),
            Err(ApiError::RequestError("connection reset".to_string())),
        );

        assert_eq!(snapshot, WalletSnapshot::empty("EQAaddr"));
    }

    #[test]
    fn test_outbound_record_has_no_inbound_value() {
        let raw = RawTransaction {
            utime: 1_700_000_000,
            in_msg: Some(RawMessage {
                source: Some(String::new()),
                destination: None,
                value: Some("0".to_string()),
                message: None,
            }),
        };

        let record = to_record(&raw);
        assert!(!record.inbound);
        assert_eq!(record.value_nano, 0);
        assert_eq!(record.source, None);
    }

    #[test]
    fn test_stale_refresh_is_discarded() {
        let address = "EQAgeneration-test";

        let first = begin_refresh(address);
        let second = begin_refresh(address);

        let stale = WalletSnapshot {
            address: address.to_string(),
            balance: Some(1),
            transactions: Vec::new(),
        };
        let fresh = WalletSnapshot {
            address: address.to_string(),
            balance: Some(2),
            transactions: Vec::new(),
        };

        // The newer refresh commits; the older one resolves late and is dropped
        assert!(commit_refresh(address, second, fresh));
        assert!(!commit_refresh(address, first, stale));

        assert_eq!(cached_snapshot(address).unwrap().balance, Some(2));
    }
}
