//! Transfer request construction and submission results
//!
//! A [`TransferRequest`] is the normalized payload handed to the wallet
//! bridge: amounts converted to nanotons and rendered as decimal strings
//! (the bridge transport format), plus an absolute expiry timestamp.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::utils::errors::WalletError;
use crate::utils::format::NANO_PER_TON;

/// Validity window for outgoing transfer requests, in seconds
pub const TRANSFER_TTL_SECS: u64 = 300;

/// Largest display amount that still fits u64 nanotons
const MAX_AMOUNT_TON: f64 = (u64::MAX / NANO_PER_TON) as f64;

/// Floor a display-unit TON amount to whole nanotons.
///
/// Sub-nanoton precision is discarded. This is the conversion policy for
/// every outgoing amount; callers must validate the input first (see
/// [`TransferRequest::build`]).
pub fn floor_to_nano(amount_ton: f64) -> u64 {
    (amount_ton * NANO_PER_TON as f64).floor() as u64
}

/// One destination of a transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferMessage {
    pub address: String,
    /// Amount in nanotons as a decimal string, per the bridge transport format
    pub amount: String,
    /// Optional comment payload; empty string when absent
    #[serde(default)]
    pub payload: String,
}

/// A normalized transfer request ready for user approval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Absolute unix expiry: submission wall-clock + [`TRANSFER_TTL_SECS`]
    #[serde(rename = "validUntil")]
    pub valid_until: u64,
    pub messages: Vec<TransferMessage>,
}

impl TransferRequest {
    /// Build a single-destination transfer request.
    ///
    /// Amounts are validated before conversion: negative, non-finite and
    /// u64-overflowing values are rejected rather than clamped.
    pub fn build(
        destination: &str,
        amount_ton: f64,
        comment: Option<&str>,
    ) -> Result<TransferRequest, WalletError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(WalletError::InvalidAddress(
                "destination address is empty".to_string(),
            ));
        }
        if !amount_ton.is_finite() {
            return Err(WalletError::InvalidAmount(
                "amount must be a finite number".to_string(),
            ));
        }
        if amount_ton < 0.0 {
            return Err(WalletError::InvalidAmount(
                "amount must not be negative".to_string(),
            ));
        }
        if amount_ton > MAX_AMOUNT_TON {
            return Err(WalletError::InvalidAmount(format!(
                "amount exceeds the maximum of {} TON",
                MAX_AMOUNT_TON
            )));
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Ok(TransferRequest {
            valid_until: now + TRANSFER_TTL_SECS,
            messages: vec![TransferMessage {
                address: destination.to_string(),
                amount: floor_to_nano(amount_ton).to_string(),
                payload: comment.unwrap_or_default().to_string(),
            }],
        })
    }

    /// Seconds until this request expires, zero once past `valid_until`
    pub fn remaining_ttl(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.valid_until.saturating_sub(now)
    }
}

/// Result handle of a successful submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransferReceipt {
    /// Opaque serialized confirmation blob returned by the signer, when provided
    pub boc: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEST: &str = "EQDrjaLahLkMB-hMCmkzOyBuHJ139ZUYmPHu6RRBKnbdLIYI";

    fn unix_now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn test_floor_to_nano_unit() {
        assert_eq!(floor_to_nano(1.0), 1_000_000_000);
        assert_eq!(floor_to_nano(0.0), 0);
    }

    #[test]
    fn test_floor_to_nano_matches_floor_formula() {
        for amount in [0.0, 0.1, 0.5, 1.0, 1.5, 2.000000001, 123.456789, 9999.9] {
            assert_eq!(
                floor_to_nano(amount),
                (amount * 1e9).floor() as u64,
                "amount {}",
                amount
            );
        }
    }

    #[test]
    fn test_floor_to_nano_truncates_sub_nanoton() {
        // 1.9999999999 TON is 1999999999.9 nanotons; the tail is discarded
        assert_eq!(floor_to_nano(1.9999999999), 1_999_999_999);
        assert_eq!(floor_to_nano(0.0000000019), 1);
    }

    #[test]
    fn test_build_amount_transport_string() {
        let request = TransferRequest::build(DEST, 1.0, None).unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].amount, "1000000000");
        assert_eq!(request.messages[0].address, DEST);
        assert_eq!(request.messages[0].payload, "");
    }

    #[test]
    fn test_build_serialized_form() {
        let request = TransferRequest::build(DEST, 0.5, Some("thanks")).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("validUntil").is_some());
        assert_eq!(value["messages"][0]["amount"], "500000000");
        assert_eq!(value["messages"][0]["payload"], "thanks");
    }

    #[test]
    fn test_build_expiry_window() {
        let before = unix_now();
        let request = TransferRequest::build(DEST, 1.0, None).unwrap();
        let after = unix_now();

        assert!(request.valid_until >= before + TRANSFER_TTL_SECS);
        assert!(request.valid_until <= after + TRANSFER_TTL_SECS);
        assert!(request.remaining_ttl() <= TRANSFER_TTL_SECS);
        assert!(request.remaining_ttl() > TRANSFER_TTL_SECS - 5);
    }

    #[test]
    fn test_build_rejects_negative_amount() {
        let err = TransferRequest::build(DEST, -0.1, None).unwrap_err();
        assert!(matches!(err, WalletError::InvalidAmount(_)));
    }

    #[test]
    fn test_build_rejects_non_finite_amounts() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = TransferRequest::build(DEST, bad, None).unwrap_err();
            assert!(matches!(err, WalletError::InvalidAmount(_)), "{}", bad);
        }
    }

    #[test]
    fn test_build_rejects_overflowing_amount() {
        let err = TransferRequest::build(DEST, 1e12, None).unwrap_err();
        assert!(matches!(err, WalletError::InvalidAmount(_)));
    }

    #[test]
    fn test_build_rejects_empty_destination() {
        let err = TransferRequest::build("   ", 1.0, None).unwrap_err();
        assert!(matches!(err, WalletError::InvalidAddress(_)));
    }
}
