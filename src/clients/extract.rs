use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::clients::{ApiClient, ExtractRequest, failure_from_response};
use crate::error::{ClientError, ErrorDefaults};

const EXTRACT_DEFAULTS: ErrorDefaults = ErrorDefaults {
    rate_limit: "You have reached the daily extraction limit",
    server: "Error during the process",
};

/// Server-extracted metadata for a target page
///
/// `title` and `meta_description` feed the editable fields; the full
/// metadata map is retained as intermediate state for downstream consumers
/// but never rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionResult {
    /// Everything the server pulled out of the page head
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Page title tag text
    #[serde(default)]
    pub title: String,

    /// Meta description content
    #[serde(default)]
    pub meta_description: String,
}

/// Client for the server-side metadata extraction endpoint
#[derive(Debug, Clone)]
pub struct MetadataExtractionClient {
    api: ApiClient,
}

impl MetadataExtractionClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ask the server to extract title and description tags for a URL
    ///
    /// The target must parse as a URL before any request is issued; a 429
    /// carries the server's rate-limit message verbatim.
    pub async fn extract(
        &self,
        url: &str,
        identity: &str,
    ) -> Result<ExtractionResult, ClientError> {
        let target = Url::parse(url)
            .map_err(|e| ClientError::Validation(format!("invalid url {:?}: {}", url, e)))?;

        ::log::info!("Extracting metadata for: {}", target);

        let request = ExtractRequest {
            url,
            user_id: identity,
        };
        let response = self.api.post_json("extract-meta", &request).await?;

        if !response.status().is_success() {
            let error = failure_from_response(response, &EXTRACT_DEFAULTS).await;
            ::log::warn!("Extraction failed for {}: {}", url, error);
            return Err(error);
        }

        let result: ExtractionResult = response
            .json()
            .await
            .map_err(|e| ClientError::Server(e.to_string()))?;

        ::log::debug!(
            "Extracted title ({} chars) and {} metadata entries from {}",
            result.title.chars().count(),
            result.metadata.len(),
            url
        );
        Ok(result)
    }
}
