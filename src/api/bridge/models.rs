use serde::{Deserialize, Serialize};

/// Response from POST /v1/sessions
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
    /// Bearer secret for subsequent calls on this session; encrypted at rest
    pub secret: String,
    /// Link the user opens in their wallet to approve the pairing
    pub universal_link: String,
}

/// Response from GET /v1/sessions/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct SessionState {
    /// "pending" until the wallet approves, then "connected"
    pub status: String,
    #[serde(default)]
    pub address: Option<String>,
    /// Raw chain id as reported by the wallet ("-239" mainnet, "-3" testnet)
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        self.status == "connected"
    }
}

/// Response from POST /v1/sessions/{id}/transfers
#[derive(Debug, Clone, Deserialize)]
pub struct TransferResponse {
    #[serde(default)]
    pub boc: Option<String>,
}

/// Error body returned by the bridge on rejected submissions
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for POST /v1/sessions
#[derive(Debug, Clone, Serialize)]
pub struct SessionRequest {
    /// Caller-chosen correlation id for the pairing
    pub client_id: String,
}

/// Current connection state of a user's wallet link, as seen by commands
#[derive(Debug, Clone, Default)]
pub struct LinkState {
    pub connected: bool,
    pub address: Option<String>,
    pub network: Option<String>,
    pub app_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_connected() {
        let state: SessionState = serde_json::from_str(
            r#"{"status":"connected","address":"EQAbc","network":"-239","app_name":"Tonkeeper"}"#,
        )
        .unwrap();
        assert!(state.is_connected());
        assert_eq!(state.address.as_deref(), Some("EQAbc"));
    }

    #[test]
    fn test_session_state_pending_defaults() {
        let state: SessionState = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert!(!state.is_connected());
        assert!(state.address.is_none());
        assert!(state.network.is_none());
    }
}
