use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::clients::{
    AnalysisClient, ApiClient, KeyProvisioningClient, MetadataExtractionClient,
};
use crate::entry::{AnalysisOutcome, SerpEntry};
use crate::error::{ClientError, ErrorKind};
use crate::preview::{PreviewSnapshot, PreviewSynchronizer};

/// Tracks the in-flight generation of one logical operation
///
/// `begin` hands out a generation number and refuses while one is open;
/// `finish` only clears the matching generation. Observable behavior is
/// plain single-flight, but stale completions can be told apart from the
/// current one, which leaves room for true cancellation later.
#[derive(Debug, Default)]
pub struct OperationGate {
    next: u64,
    active: Option<u64>,
}

impl OperationGate {
    /// Open a new generation, or None if one is already in flight
    pub fn begin(&mut self) -> Option<u64> {
        if self.active.is_some() {
            return None;
        }
        self.next += 1;
        self.active = Some(self.next);
        Some(self.next)
    }

    /// Close the given generation if it is still the active one
    pub fn finish(&mut self, generation: u64) {
        if self.active == Some(generation) {
            self.active = None;
        }
    }

    /// Whether a generation is currently open
    pub fn in_flight(&self) -> bool {
        self.active.is_some()
    }
}

/// The checker workflow: one entry, one identity, one message slot
///
/// Owns the editable [`SerpEntry`] and serializes every mutation, so
/// last-writer-wins is the only ordering rule needed. All network failures
/// land in the single user-visible message slot and none of them are fatal;
/// every operation may simply be re-attempted.
pub struct SerpSession {
    identity: String,
    entry: SerpEntry,
    keyword: String,
    brand: String,
    metadata: Option<Map<String, Value>>,
    analysis: Option<String>,
    error: Option<String>,
    preview: PreviewSynchronizer,
    extraction_gate: OperationGate,
    analysis_gate: OperationGate,
    extraction: MetadataExtractionClient,
    analyzer: AnalysisClient,
    keys: KeyProvisioningClient,
    api: ApiClient,
}

impl SerpSession {
    /// Assemble a session and publish the initial preview
    ///
    /// The returned receiver yields one snapshot per preview trigger,
    /// starting with the default field values.
    pub fn new(identity: String, api: ApiClient) -> (Self, mpsc::Receiver<PreviewSnapshot>) {
        let (preview, receiver) = PreviewSynchronizer::channel();

        let session = Self {
            identity,
            entry: SerpEntry::default(),
            keyword: String::new(),
            brand: String::new(),
            metadata: None,
            analysis: None,
            error: None,
            preview,
            extraction_gate: OperationGate::default(),
            analysis_gate: OperationGate::default(),
            extraction: MetadataExtractionClient::new(api.clone()),
            analyzer: AnalysisClient::new(api.clone()),
            keys: KeyProvisioningClient::new(api.clone()),
            api,
        };

        session.preview.sync(&session.entry);
        (session, receiver)
    }

    /// The resolved identity this session submits with
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The current entry state
    pub fn entry(&self) -> &SerpEntry {
        &self.entry
    }

    /// Metadata map retained from the last successful extraction
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref()
    }

    /// Analysis text retained from the last successful analysis
    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    /// The user-visible message from the last failed operation
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Edit the title; republishes the preview
    pub fn set_title(&mut self, title: &str) {
        self.entry.set_title(title);
        self.preview.sync(&self.entry);
    }

    /// Edit the description; republishes the preview
    pub fn set_description(&mut self, description: &str) {
        self.entry.set_description(description);
        self.preview.sync(&self.entry);
    }

    /// Edit the target URL; republishes the preview
    pub fn set_url(&mut self, url: &str) {
        self.entry.set_url(url);
        self.preview.sync(&self.entry);
    }

    /// Edit the focus keyword (not a preview input)
    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword = keyword.to_string();
    }

    /// Edit the brand (not a preview input)
    pub fn set_brand(&mut self, brand: &str) {
        self.brand = brand.to_string();
    }

    /// Republish the preview without changing anything
    pub fn refresh_preview(&self) {
        self.preview.sync(&self.entry);
    }

    /// Whether an analysis may be submitted right now
    ///
    /// Mirrors the original submit gate: both fields present and no analysis
    /// already in flight.
    pub fn can_analyze(&self) -> bool {
        self.entry.is_complete() && !self.analysis_gate.in_flight()
    }

    /// Whether an extraction is currently in flight
    pub fn extraction_in_flight(&self) -> bool {
        self.extraction_gate.in_flight()
    }

    /// Drop the retained analysis text
    pub fn clear_analysis(&mut self) {
        self.analysis = None;
    }

    /// Probe the server health endpoint
    pub async fn health(&self) -> Result<(), ClientError> {
        self.api.health().await
    }

    /// Extract metadata for the current URL and apply it to the entry
    ///
    /// On success the title and description are overwritten (clamped), the
    /// metadata map is retained, and exactly one preview publication follows
    /// the field writes, so it always observes the post-update entry.
    pub async fn extract_metadata(&mut self) -> Result<(), ClientError> {
        let Some(generation) = self.extraction_gate.begin() else {
            return Err(ClientError::Validation(
                "An extraction is already in progress".to_string(),
            ));
        };
        self.error = None;

        let result = self.extraction.extract(&self.entry.url, &self.identity).await;
        self.extraction_gate.finish(generation);

        match result {
            Ok(extraction) => {
                self.entry.set_title(&extraction.title);
                self.entry.set_description(&extraction.meta_description);
                self.metadata = Some(extraction.metadata);
                // Publish only after both field writes have committed
                self.preview.sync(&self.entry);
                Ok(())
            }
            Err(error) => {
                self.error = Some(format!("Could not extract the information: {}", error));
                Err(error)
            }
        }
    }

    /// Submit the current entry for analysis
    ///
    /// Refused without a network call when the admission gate is closed.
    /// The outcome is always returned; failures additionally land in the
    /// message slot.
    pub async fn analyze(&mut self) -> AnalysisOutcome {
        if !self.entry.is_complete() {
            let message = "Title and description are required".to_string();
            self.error = Some(message.clone());
            return AnalysisOutcome::failure(ErrorKind::Validation, message);
        }

        let Some(generation) = self.analysis_gate.begin() else {
            return AnalysisOutcome::failure(
                ErrorKind::Validation,
                "An analysis is already in progress",
            );
        };
        self.error = None;
        self.analysis = None;

        let result = self
            .analyzer
            .analyze(&self.entry, &self.keyword, &self.brand, &self.identity)
            .await;
        self.analysis_gate.finish(generation);

        match result {
            Ok(analysis) => {
                self.analysis = Some(analysis.clone());
                AnalysisOutcome::Success { analysis }
            }
            Err(error) => {
                self.error = Some(format!(
                    "An error occurred while processing the request: {}",
                    error
                ));
                AnalysisOutcome::from(&error)
            }
        }
    }

    /// Encode and provision a server-side API credential
    pub async fn set_api_key(&mut self, raw_key: &str) -> Result<(), ClientError> {
        self.error = None;

        match self.keys.submit(raw_key).await {
            Ok(()) => Ok(()),
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }
}
