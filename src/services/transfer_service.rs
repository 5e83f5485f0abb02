use serenity::builder::CreateEmbed;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::bridge::WalletConnector;
use crate::models::notification::OutcomeNotification;
use crate::models::transfer::{TransferReceipt, TransferRequest};
use crate::utils::errors::WalletError;
use crate::utils::format::truncate_address;

/// Submit a built request through the wallet bridge.
///
/// Precondition: the user has an approved wallet session. When they do not,
/// this fails fast with `NotConnected` and the bridge is never called; the
/// command layer reacts by posting the connection prompt. One submission per
/// invocation, no queuing and no idempotency.
pub async fn submit_transfer(
    connector: &dyn WalletConnector,
    discord_id: u64,
    request: &TransferRequest,
) -> Result<TransferReceipt, WalletError> {
    if !connector.is_connected(discord_id).await {
        return Err(WalletError::NotConnected);
    }

    connector.send_transfer(discord_id, request).await
}

/// Build and submit a single-destination transfer
pub async fn execute_send(
    connector: &dyn WalletConnector,
    discord_id: u64,
    destination: &str,
    amount_ton: f64,
    comment: Option<&str>,
) -> Result<TransferReceipt, WalletError> {
    let request = TransferRequest::build(destination, amount_ton, comment)?;

    let request_id = Uuid::new_v4();
    info!(
        "Submitting transfer {} for user {}: {} nanotons to {}",
        request_id,
        discord_id,
        request.messages[0].amount,
        truncate_address(destination)
    );

    match submit_transfer(connector, discord_id, &request).await {
        Ok(receipt) => {
            info!("Transfer {} approved by the wallet", request_id);
            Ok(receipt)
        }
        Err(e) => {
            warn!("Transfer {} failed: {}", request_id, e);
            Err(e)
        }
    }
}

/// Render an outcome notification as an embed
pub fn create_outcome_embed(notification: &OutcomeNotification) -> CreateEmbed {
    CreateEmbed::default()
        .title(notification.title.clone())
        .description(notification.description.clone())
        .color(notification.severity.color())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::bridge::LinkState;
    use crate::models::notification::{report, Severity};
    use serenity::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Connector stub: configurable connection state and submission result
    struct MockConnector {
        connected: bool,
        decline_with: Option<String>,
        send_calls: AtomicUsize,
    }

    impl MockConnector {
        fn new(connected: bool, decline_with: Option<&str>) -> Self {
            Self {
                connected,
                decline_with: decline_with.map(|s| s.to_string()),
                send_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WalletConnector for MockConnector {
        async fn is_connected(&self, _discord_id: u64) -> bool {
            self.connected
        }

        async fn begin_connect(&self, _discord_id: u64) -> Result<String, WalletError> {
            Ok("https://wallet.example/connect".to_string())
        }

        async fn link_state(&self, _discord_id: u64) -> Result<LinkState, WalletError> {
            Ok(LinkState {
                connected: self.connected,
                ..LinkState::default()
            })
        }

        async fn stored_state(&self, _discord_id: u64) -> Option<LinkState> {
            self.connected.then(|| LinkState {
                connected: true,
                address: Some("EQAmockaddress0000".to_string()),
                ..LinkState::default()
            })
        }

        async fn send_transfer(
            &self,
            _discord_id: u64,
            _request: &TransferRequest,
        ) -> Result<TransferReceipt, WalletError> {
            self.send_calls.fetch_add(1, Ordering::SeqCst);
            match &self.decline_with {
                Some(message) => Err(WalletError::SubmissionFailed(message.clone())),
                None => Ok(TransferReceipt {
                    boc: Some("te6cckEBAQEA".to_string()),
                }),
            }
        }

        async fn disconnect(&self, _discord_id: u64) -> Result<(), WalletError> {
            Ok(())
        }
    }

    const DEST: &str = "EQDrjaLahLkMB-hMCmkzOyBuHJ139ZUYmPHu6RRBKnbdLIYI";

    #[tokio::test]
    async fn test_disconnected_submit_never_reaches_the_bridge() {
        let connector = MockConnector::new(false, None);

        let err = execute_send(&connector, 1, DEST, 1.0, None)
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::NotConnected));
        assert_eq!(connector.send_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_connected_submit_returns_receipt() {
        let connector = MockConnector::new(true, None);

        let receipt = execute_send(&connector, 1, DEST, 1.0, None).await.unwrap();

        assert_eq!(receipt.boc.as_deref(), Some("te6cckEBAQEA"));
        assert_eq!(connector.send_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_declined_submission_reports_verbatim_message() {
        let connector = MockConnector::new(true, Some("User declined"));

        let result = execute_send(&connector, 1, DEST, 1.0, None).await;
        let notification = report(result, |_| {}, |_| {});

        assert_eq!(notification.severity, Severity::Destructive);
        assert_eq!(notification.description, "User declined");
    }

    #[tokio::test]
    async fn test_invalid_amount_rejected_before_submission() {
        let connector = MockConnector::new(true, None);

        let err = execute_send(&connector, 1, DEST, -1.0, None)
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::InvalidAmount(_)));
        assert_eq!(connector.send_calls.load(Ordering::SeqCst), 0);
    }
}
