// Re-export modules
pub mod clients;
pub mod config;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod identity;
pub mod preview;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use clients::ExtractionResult;
pub use entry::{AnalysisOutcome, SerpEntry};
pub use error::{ClientError, ErrorKind};
pub use preview::PreviewSnapshot;
pub use session::SerpSession;

use std::error::Error;
use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::clients::ApiClient;
use crate::config::SerpConfig;
use crate::identity::IdentityStore;

/// Builder for assembling a checker session
pub struct Serp {
    config: SerpConfig,
    identity_path: Option<PathBuf>,
    fresh_identity: bool,
}

impl Default for Serp {
    fn default() -> Self {
        Self::new()
    }
}

impl Serp {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            config: SerpConfig::default(),
            identity_path: None,
            fresh_identity: false,
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: SerpConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        mut self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn Error>> {
        self.config = SerpConfig::from_file(path)?;
        Ok(self)
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(mut self, config_str: &str) -> Result<Self, Box<dyn Error>> {
        self.config = SerpConfig::from_json(config_str)?;
        Ok(self)
    }

    /// Override the server base URL
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.config.api_url = api_url.to_string();
        self
    }

    /// Override the identity storage file
    pub fn with_identity_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_path = Some(path.into());
        self
    }

    /// Discard any stored identity during start, forcing a fresh one
    pub fn with_fresh_identity(mut self, fresh: bool) -> Self {
        self.fresh_identity = fresh;
        self
    }

    /// Resolve the identity, build the clients and start the session
    ///
    /// Returns the session plus the receiver its preview snapshots arrive
    /// on; the initial snapshot (default field values) is already queued.
    pub fn start(self) -> Result<(SerpSession, mpsc::Receiver<PreviewSnapshot>), Box<dyn Error>> {
        // Allow the environment to override the configured server URL
        let mut config = self.config;
        config.apply_env_override();

        let store = match self.identity_path.or_else(|| config.identity_path.clone()) {
            Some(path) => IdentityStore::new(path),
            None => IdentityStore::default_location(),
        };

        if self.fresh_identity {
            store.reset()?;
        }

        let identity = store.resolve()?;
        ::log::info!("Session identity: {}", identity);

        let api = ApiClient::new(&config)?;
        ::log::info!("Using analysis server: {}", api.base_url());

        Ok(SerpSession::new(identity, api))
    }
}
