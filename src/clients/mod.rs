pub mod analyze;
pub mod extract;
pub mod key;

#[cfg(test)]
mod tests;

pub use analyze::AnalysisClient;
pub use extract::{ExtractionResult, MetadataExtractionClient};
pub use key::KeyProvisioningClient;

use serde::{Deserialize, Serialize};

use crate::config::SerpConfig;
use crate::error::{ClientError, ErrorDefaults};

/// Shared HTTP plumbing for the endpoint clients
///
/// Holds one `reqwest` client with a cookie store enabled, so every request
/// carries credentials the way the original sent them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration
    pub fn new(config: &SerpConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST a JSON body; transport failures become `Network` errors
    pub(crate) async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ClientError> {
        self.http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))
    }

    /// Probe the server health endpoint
    pub async fn health(&self) -> Result<(), ClientError> {
        let response = self
            .http
            .get(self.endpoint("api/health"))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure_from_response(response, &HEALTH_DEFAULTS).await);
        }

        let body: HealthResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Server(e.to_string()))?;
        if body.status == "ok" {
            Ok(())
        } else {
            Err(ClientError::Unexpected(format!(
                "unexpected health status: {}",
                body.status
            )))
        }
    }
}

const HEALTH_DEFAULTS: ErrorDefaults = ErrorDefaults {
    rate_limit: "You have reached the daily usage limit",
    server: "Health check failed",
};

/// Read a failure response body and classify it
///
/// Shared by every client so the 429 mapping and the message-over-default
/// rule never diverge between endpoints.
pub(crate) async fn failure_from_response(
    response: reqwest::Response,
    defaults: &ErrorDefaults,
) -> ClientError {
    let status = response.status();
    let body: ErrorBody = response.json().await.unwrap_or_default();
    crate::error::from_response(status, body.message, defaults)
}

/// Request body for POST /extract-meta
#[derive(Debug, Serialize)]
pub struct ExtractRequest<'a> {
    pub url: &'a str,
    pub user_id: &'a str,
}

/// Request body for POST /analyze
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub keyword: &'a str,
    pub brand: &'a str,
    pub user_id: &'a str,
}

/// Request body for POST /set-key
///
/// The field name is part of the server contract; the value is an encoded
/// envelope, not ciphertext (see the encoding module).
#[derive(Debug, Serialize)]
pub struct SetKeyRequest<'a> {
    #[serde(rename = "encryptedKey")]
    pub encrypted_key: &'a str,
}

/// Body shape the server uses for failures
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    status: String,
}
