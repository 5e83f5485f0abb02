use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use tracing::warn;

use super::models::{ApiEnvelope, ApiError, RawTransaction};
use crate::utils::ton_ratelimit::rate_limit_toncenter;

/// Read-only block-explorer client for the toncenter v2 API.
/// Has no write capability; both endpoints are plain GETs.
pub struct ToncenterClient {
    http_client: HttpClient,
    api_key: Option<String>,
    base_url: String,
}

impl ToncenterClient {
    const DEFAULT_BASE_URL: &'static str = "https://toncenter.com/api/v2";

    /// Create a new toncenter client. The API key is optional; without one
    /// the public endpoint applies a much stricter rate limit.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url,
        }
    }

    /// Create default headers, attaching the API key when configured
    fn create_headers(&self) -> Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = &self.api_key {
            let key_value = HeaderValue::from_str(key)
                .map_err(|e| format!("Failed to create API key header: {}", e))?;
            headers.insert("X-API-Key", key_value);
        }

        Ok(headers)
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => {
                // toncenter reports the reason inside the envelope
                if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                    let message = err_json
                        .get("error")
                        .and_then(|v| v.as_str())
                        .unwrap_or(&body_text);
                    ApiError::BadRequest(message.to_string())
                } else {
                    ApiError::BadRequest(body_text)
                }
            }
            404 => ApiError::NotFound(body_text),
            429 => {
                warn!("toncenter rate limited the request");
                let retry_after = serde_json::from_str::<serde_json::Value>(&body_text)
                    .ok()
                    .and_then(|v| v.get("retry_after").and_then(|r| r.as_i64()))
                    .unwrap_or(1000);
                ApiError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("toncenter server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code as i32, body_text)
            }
            _ => ApiError::HttpError(status_code as i32, body_text),
        }
    }

    /// Unwrap the `{"ok": ..., "result": ...}` envelope
    fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T, ApiError> {
        if !envelope.ok {
            return Err(ApiError::ApiFailure(
                envelope
                    .error
                    .unwrap_or_else(|| "toncenter reported ok=false".to_string()),
            ));
        }
        envelope
            .result
            .ok_or_else(|| ApiError::DeserializationError("missing result field".to_string()))
    }

    /// GET /getAddressBalance
    ///
    /// Retrieves the current balance of an address in nanotons. The API
    /// returns the value as a decimal string.
    pub async fn get_address_balance(&self, address: &str) -> Result<u64, ApiError> {
        let url = format!("{}/getAddressBalance", self.base_url);
        let headers = self.create_headers().map_err(ApiError::RequestError)?;

        rate_limit_toncenter().await;

        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .query(&[("address", address)])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let envelope = response
            .json::<ApiEnvelope<String>>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        let raw = Self::unwrap_envelope(envelope)?;
        raw.parse::<u64>().map_err(|e| {
            ApiError::DeserializationError(format!("Balance '{}' is not an integer: {}", raw, e))
        })
    }

    /// GET /getTransactions
    ///
    /// Retrieves the most recent transactions of an address, newest first,
    /// up to `limit` records. Records are opaque beyond the rendered fields.
    pub async fn get_transactions(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<Vec<RawTransaction>, ApiError> {
        let url = format!("{}/getTransactions", self.base_url);
        let headers = self.create_headers().map_err(ApiError::RequestError)?;

        rate_limit_toncenter().await;

        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .query(&[("address", address), ("limit", &limit.to_string())])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let envelope = response
            .json::<ApiEnvelope<Vec<RawTransaction>>>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        Self::unwrap_envelope(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_envelope_ok() {
        let envelope = ApiEnvelope {
            ok: true,
            result: Some("42".to_string()),
            error: None,
            code: None,
        };
        assert_eq!(ToncenterClient::unwrap_envelope(envelope).unwrap(), "42");
    }

    #[test]
    fn test_unwrap_envelope_failure_carries_message() {
        let envelope: ApiEnvelope<String> = ApiEnvelope {
            ok: false,
            result: None,
            error: Some("Incorrect address".to_string()),
            code: Some(416),
        };
        let err = ToncenterClient::unwrap_envelope(envelope).unwrap_err();
        assert!(matches!(err, ApiError::ApiFailure(msg) if msg == "Incorrect address"));
    }

    #[test]
    fn test_unwrap_envelope_missing_result() {
        let envelope: ApiEnvelope<String> = ApiEnvelope {
            ok: true,
            result: None,
            error: None,
            code: None,
        };
        let err = ToncenterClient::unwrap_envelope(envelope).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
