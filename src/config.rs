use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for the checker client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpConfig {
    /// Base URL of the analysis server
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Backing file for the stored identity (platform data dir if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_path: Option<PathBuf>,
}

impl Default for SerpConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            identity_path: None,
        }
    }
}

impl SerpConfig {
    /// Create a configuration pointed at the given server
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the server base URL with the SERP_API_URL environment
    /// variable if provided
    pub fn apply_env_override(&mut self) {
        if let Ok(api_url) = std::env::var("SERP_API_URL") {
            if !api_url.is_empty() {
                self.api_url = api_url;
            }
        }
    }
}

/// Default value for api_url
fn default_api_url() -> String {
    "http://localhost:5002".to_string()
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    30
}
