//! Outcome notifications
//!
//! Every submission result is converted into the same user-facing shape:
//! a title, a description and a severity. Commands render it as an embed.

use crate::models::transfer::TransferReceipt;
use crate::utils::errors::WalletError;

/// Notification severity; maps to the embed colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Destructive,
}

impl Severity {
    pub fn color(self) -> u32 {
        match self {
            Severity::Normal => 0x00ff00,
            Severity::Destructive => 0xff3333,
        }
    }
}

/// Uniform user-facing outcome of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeNotification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Convert a submission result into a notification, invoking the matching
/// callback. On success the callback receives the confirmation blob (empty
/// string when the signer returned none); on failure it receives the error.
/// Performs no retries.
pub fn report<S, E>(
    result: Result<TransferReceipt, WalletError>,
    on_success: S,
    on_error: E,
) -> OutcomeNotification
where
    S: FnOnce(&str),
    E: FnOnce(&WalletError),
{
    match result {
        Ok(receipt) => {
            let boc = receipt.boc.unwrap_or_default();
            on_success(&boc);
            let description = if boc.is_empty() {
                "Your transaction has been sent to the TON blockchain".to_string()
            } else {
                format!("Transaction sent! BOC: {}", boc)
            };
            OutcomeNotification {
                title: "Transaction sent".to_string(),
                description,
                severity: Severity::Normal,
            }
        }
        Err(error) => {
            let message = error.to_string();
            let description = if message.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                message
            };
            on_error(&error);
            OutcomeNotification {
                title: "Transaction failed".to_string(),
                description,
                severity: Severity::Destructive,
            }
        }
    }
}

/// The notification shown when an action needs a wallet and none is connected
pub fn connection_prompt() -> OutcomeNotification {
    OutcomeNotification {
        title: "Wallet not connected".to_string(),
        description: "Please connect your TON wallet to send a transaction".to_string(),
        severity: Severity::Destructive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_invokes_callback_with_boc() {
        let mut seen = None;
        let notification = report(
            Ok(TransferReceipt {
                boc: Some("te6cckEBAQEA".to_string()),
            }),
            |boc| seen = Some(boc.to_string()),
            |_| panic!("error callback must not fire on success"),
        );

        assert_eq!(seen.as_deref(), Some("te6cckEBAQEA"));
        assert_eq!(notification.severity, Severity::Normal);
        assert_eq!(notification.title, "Transaction sent");
        assert!(notification.description.contains("te6cckEBAQEA"));
    }

    #[test]
    fn test_success_without_blob_uses_empty_string() {
        let mut seen = None;
        let notification = report(
            Ok(TransferReceipt::default()),
            |boc| seen = Some(boc.to_string()),
            |_| {},
        );

        assert_eq!(seen.as_deref(), Some(""));
        assert_eq!(notification.severity, Severity::Normal);
    }

    #[test]
    fn test_declined_message_passes_through_verbatim() {
        let mut error_seen = false;
        let notification = report(
            Err(WalletError::SubmissionFailed("User declined".to_string())),
            |_| panic!("success callback must not fire on failure"),
            |_| error_seen = true,
        );

        assert!(error_seen);
        assert_eq!(notification.severity, Severity::Destructive);
        assert_eq!(notification.description, "User declined");
    }

    #[test]
    fn test_messageless_failure_reports_unknown_error() {
        let notification = report(
            Err(WalletError::SubmissionFailed(String::new())),
            |_| {},
            |_| {},
        );

        assert_eq!(notification.severity, Severity::Destructive);
        assert_eq!(notification.description, "Unknown error");
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Normal.color(), 0x00ff00);
        assert_eq!(Severity::Destructive.color(), 0xff3333);
    }

    #[test]
    fn test_connection_prompt_is_destructive() {
        let prompt = connection_prompt();
        assert_eq!(prompt.title, "Wallet not connected");
        assert_eq!(prompt.severity, Severity::Destructive);
    }
}
