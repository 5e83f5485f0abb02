use reqwest::Client as HttpClient;
use serenity::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::models::{
    BridgeErrorBody, LinkState, SessionCreated, SessionRequest, SessionState, TransferResponse,
};
use super::session::SessionStore;
use crate::models::transfer::{TransferReceipt, TransferRequest};
use crate::utils::errors::WalletError;

/// Timeout for the short bridge calls (pairing, state polls, teardown)
const BRIDGE_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// The wallet-connect provider boundary.
///
/// Everything behind this trait is a black box: pairing protocol,
/// signing and broadcast all happen in the external wallet. The bot only
/// ever sees connection state, a connect link, and submission results.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Whether the user currently has an approved wallet session.
    /// Answers from stored state; never issues a bridge call.
    async fn is_connected(&self, discord_id: u64) -> bool;

    /// Begin a pairing session and return the universal connect link the
    /// user opens in their wallet to approve it.
    async fn begin_connect(&self, discord_id: u64) -> Result<String, WalletError>;

    /// Poll the bridge for the current session state and persist it
    async fn link_state(&self, discord_id: u64) -> Result<LinkState, WalletError>;

    /// Last persisted connection state; answers without a bridge call
    async fn stored_state(&self, discord_id: u64) -> Option<LinkState>;

    /// Submit a transfer for user approval and broadcast. Blocks until the
    /// wallet resolves the request or the request's own validity window
    /// runs out; there is no retry and no idempotency.
    async fn send_transfer(
        &self,
        discord_id: u64,
        request: &TransferRequest,
    ) -> Result<TransferReceipt, WalletError>;

    /// Tear down the pairing on the bridge and forget the stored link
    async fn disconnect(&self, discord_id: u64) -> Result<(), WalletError>;
}

/// HTTP implementation of [`WalletConnector`] against a wallet bridge service
pub struct BridgeConnector {
    http_client: HttpClient,
    base_url: String,
    store: SessionStore,
}

impl BridgeConnector {
    pub fn new(base_url: String, store: SessionStore) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            store,
        }
    }

    /// Extract the bridge's error message from a failed submission response
    async fn rejection_message(response: reqwest::Response) -> String {
        let status = response.status();
        let body_text = response.text().await.unwrap_or_default();

        if let Ok(body) = serde_json::from_str::<BridgeErrorBody>(&body_text) {
            if let Some(message) = body.message {
                return message;
            }
        }
        format!("Bridge error ({}): {}", status.as_u16(), body_text)
    }
}

#[async_trait]
impl WalletConnector for BridgeConnector {
    async fn is_connected(&self, discord_id: u64) -> bool {
        self.stored_state(discord_id)
            .await
            .map(|state| state.connected)
            .unwrap_or(false)
    }

    async fn begin_connect(&self, discord_id: u64) -> Result<String, WalletError> {
        let url = format!("{}/v1/sessions", self.base_url);
        let body = SessionRequest {
            client_id: Uuid::new_v4().to_string(),
        };

        let response = self
            .http_client
            .post(&url)
            .timeout(BRIDGE_CALL_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::SubmissionFailed(format!("Bridge unreachable: {}", e)))?;

        if !response.status().is_success() {
            let message = Self::rejection_message(response).await;
            return Err(WalletError::SubmissionFailed(message));
        }

        let session = response
            .json::<SessionCreated>()
            .await
            .map_err(|e| WalletError::SubmissionFailed(format!("Bad bridge response: {}", e)))?;

        self.store.save_new(discord_id, &session).await?;
        info!(
            "Created pairing session {} for user {}",
            session.session_id, discord_id
        );

        Ok(session.universal_link)
    }

    async fn link_state(&self, discord_id: u64) -> Result<LinkState, WalletError> {
        let Some(link) = self.store.load(discord_id).await? else {
            return Ok(LinkState::default());
        };

        let url = format!("{}/v1/sessions/{}", self.base_url, link.session_id);
        let response = self
            .http_client
            .get(&url)
            .timeout(BRIDGE_CALL_TIMEOUT)
            .bearer_auth(&link.secret)
            .send()
            .await
            .map_err(|e| WalletError::ReadFailed(format!("Bridge unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(WalletError::ReadFailed(format!(
                "Bridge returned {}",
                response.status().as_u16()
            )));
        }

        let state = response
            .json::<SessionState>()
            .await
            .map_err(|e| WalletError::ReadFailed(format!("Bad bridge response: {}", e)))?;

        self.store.apply_state(discord_id, &state).await?;
        debug!(
            "Session {} for user {} is {}",
            link.session_id, discord_id, state.status
        );

        Ok(LinkState {
            connected: state.is_connected(),
            address: state.address,
            network: state.network,
            app_name: state.app_name,
        })
    }

    async fn stored_state(&self, discord_id: u64) -> Option<LinkState> {
        match self.store.load(discord_id).await {
            Ok(Some(link)) => Some(LinkState {
                connected: link.connected,
                address: link.address,
                network: link.network,
                app_name: link.app_name,
            }),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to load wallet link for {}: {}", discord_id, e);
                None
            }
        }
    }

    async fn send_transfer(
        &self,
        discord_id: u64,
        request: &TransferRequest,
    ) -> Result<TransferReceipt, WalletError> {
        let link = self
            .store
            .load(discord_id)
            .await?
            .ok_or(WalletError::NotConnected)?;
        if !link.connected {
            return Err(WalletError::NotConnected);
        }

        // The long poll is bounded by the request's own validity window, so
        // a silent wallet cannot hang the command task past expiry.
        let ttl = request.remaining_ttl().max(1);
        let url = format!(
            "{}/v1/sessions/{}/transfers",
            self.base_url, link.session_id
        );

        let response = self
            .http_client
            .post(&url)
            .timeout(Duration::from_secs(ttl))
            .bearer_auth(&link.secret)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WalletError::SubmissionFailed("Approval timed out".to_string())
                } else {
                    WalletError::SubmissionFailed(format!("Bridge unreachable: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let message = Self::rejection_message(response).await;
            return Err(WalletError::SubmissionFailed(message));
        }

        let result = response
            .json::<TransferResponse>()
            .await
            .map_err(|e| WalletError::SubmissionFailed(format!("Bad bridge response: {}", e)))?;

        Ok(TransferReceipt { boc: result.boc })
    }

    async fn disconnect(&self, discord_id: u64) -> Result<(), WalletError> {
        if let Ok(Some(link)) = self.store.load(discord_id).await {
            let url = format!("{}/v1/sessions/{}", self.base_url, link.session_id);
            // Best effort; the stored link is dropped either way
            let teardown = self
                .http_client
                .delete(&url)
                .timeout(BRIDGE_CALL_TIMEOUT)
                .bearer_auth(&link.secret)
                .send()
                .await;
            if let Err(e) = teardown {
                debug!("Bridge teardown for user {} failed: {}", discord_id, e);
            }
        }

        self.store.clear(discord_id).await
    }
}
