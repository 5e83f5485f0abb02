use serde::Deserialize;

/// Envelope every toncenter v2 endpoint wraps its payload in
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

/// Raw transaction record. The API returns far more fields; records are
/// opaque beyond the timestamp and the inbound message rendered in history,
/// so everything else is left to serde to skip.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub utime: i64,
    #[serde(default)]
    pub in_msg: Option<RawMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    /// Value in nanotons as a decimal string
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RawMessage {
    /// Parsed nanoton value; 0 when absent or unparsable
    pub fn value_nano(&self) -> u64 {
        self.value
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0)
    }
}

/// Comprehensive error type for toncenter API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 429 Too Many Requests (rate limited)
    RateLimited { retry_after: i64 },
    /// 5xx Server Error
    ServerError(i32, String),
    /// Other HTTP errors
    HttpError(i32, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
    /// 200 response with `"ok": false`
    ApiFailure(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited { retry_after } => {
                write!(f, "Rate Limited. Retry after {} ms", retry_after)
            }
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => {
                write!(f, "Deserialization Error: {}", msg)
            }
            ApiError::ApiFailure(msg) => write!(f, "API Failure: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_balance_envelope() {
        let body = r#"{"ok":true,"result":"1500000000"}"#;
        let envelope: ApiEnvelope<String> = serde_json::from_str(body).unwrap();

        assert!(envelope.ok);
        assert_eq!(envelope.result.as_deref(), Some("1500000000"));
    }

    #[test]
    fn test_parse_failure_envelope() {
        let body = r#"{"ok":false,"error":"Incorrect address","code":416}"#;
        let envelope: ApiEnvelope<String> = serde_json::from_str(body).unwrap();

        assert!(!envelope.ok);
        assert_eq!(envelope.error.as_deref(), Some("Incorrect address"));
        assert_eq!(envelope.code, Some(416));
    }

    #[test]
    fn test_parse_transaction_list() {
        let body = r#"{
            "ok": true,
            "result": [
                {
                    "utime": 1700000000,
                    "transaction_id": {"lt": "41731000003", "hash": "aGFzaA=="},
                    "in_msg": {"source": "EQAbc", "destination": "EQDef", "value": "250000000", "message": ""},
                    "out_msgs": []
                },
                {
                    "utime": 1700000100,
                    "in_msg": {"source": "", "destination": "EQDef", "value": "0"},
                    "out_msgs": [{"source": "EQDef", "destination": "EQAbc", "value": "100000000"}]
                }
            ]
        }"#;
        let envelope: ApiEnvelope<Vec<RawTransaction>> = serde_json::from_str(body).unwrap();
        let txs = envelope.result.unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].utime, 1700000000);
        assert_eq!(txs[0].in_msg.as_ref().unwrap().value_nano(), 250_000_000);
        assert_eq!(
            txs[0].in_msg.as_ref().unwrap().source.as_deref(),
            Some("EQAbc")
        );
        assert_eq!(txs[1].in_msg.as_ref().unwrap().value_nano(), 0);
    }

    #[test]
    fn test_value_nano_tolerates_garbage() {
        let msg = RawMessage {
            source: None,
            destination: None,
            value: Some("not-a-number".to_string()),
            message: None,
        };
        assert_eq!(msg.value_nano(), 0);
    }
}
