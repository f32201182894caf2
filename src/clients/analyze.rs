use serde::Deserialize;

use crate::clients::{AnalyzeRequest, ApiClient, failure_from_response};
use crate::entry::SerpEntry;
use crate::error::{ClientError, ErrorDefaults};

const ANALYZE_DEFAULTS: ErrorDefaults = ErrorDefaults {
    rate_limit: "You have reached the daily usage limit",
    server: "Unknown error",
};

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    status: String,

    #[serde(default)]
    data: Option<AnalysisData>,

    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalysisData {
    #[serde(default)]
    analysis: String,
}

/// Client for the server-side snippet analysis endpoint
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    api: ApiClient,
}

impl AnalysisClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submit the entry plus keyword/brand for analysis
    ///
    /// Callers enforce the admission gate (non-empty title and description,
    /// single flight); this client only speaks the wire contract. A 2xx whose
    /// body status is not "success" is an unknown failure carrying the body
    /// message.
    pub async fn analyze(
        &self,
        entry: &SerpEntry,
        keyword: &str,
        brand: &str,
        identity: &str,
    ) -> Result<String, ClientError> {
        ::log::info!("Submitting analysis for: {}", entry.url);

        let request = AnalyzeRequest {
            title: &entry.title,
            description: &entry.description,
            url: &entry.url,
            keyword,
            brand,
            user_id: identity,
        };
        let response = self.api.post_json("analyze", &request).await?;

        if !response.status().is_success() {
            let error = failure_from_response(response, &ANALYZE_DEFAULTS).await;
            ::log::warn!("Analysis failed: {}", error);
            return Err(error);
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Server(e.to_string()))?;

        if body.status != "success" {
            let message = body
                .message
                .unwrap_or_else(|| ANALYZE_DEFAULTS.server.to_string());
            ::log::warn!("Analysis returned non-success status: {}", message);
            return Err(ClientError::Unexpected(message));
        }

        match body.data {
            Some(data) => {
                ::log::debug!("Analysis text received ({} chars)", data.analysis.len());
                Ok(data.analysis)
            }
            None => Err(ClientError::Unexpected(
                ANALYZE_DEFAULTS.server.to_string(),
            )),
        }
    }
}
