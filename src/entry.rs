use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ErrorKind};
use crate::utils::clamp_chars;

/// Maximum title length a search result renders in full
pub const TITLE_MAX_CHARS: usize = 60;

/// Maximum description length a search result renders in full
pub const DESCRIPTION_MAX_CHARS: usize = 155;

/// The editable snippet fields: title, description and target URL
///
/// Shared, read-mostly state consumed by the preview synchronizer and the
/// analysis client. Title and description are clamped at this boundary;
/// nothing downstream assumes the server enforced the limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerpEntry {
    /// SEO title (at most 60 characters)
    pub title: String,

    /// Meta description (at most 155 characters)
    pub description: String,

    /// Target page URL
    pub url: String,
}

impl Default for SerpEntry {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: "https://example.com".to_string(),
        }
    }
}

impl SerpEntry {
    /// Create an entry, clamping title and description
    pub fn new(title: &str, description: &str, url: &str) -> Self {
        let mut entry = Self {
            title: String::new(),
            description: String::new(),
            url: url.to_string(),
        };
        entry.set_title(title);
        entry.set_description(description);
        entry
    }

    /// Overwrite the title, clamped to [`TITLE_MAX_CHARS`]
    pub fn set_title(&mut self, title: &str) {
        self.title = clamp_chars(title, TITLE_MAX_CHARS);
    }

    /// Overwrite the description, clamped to [`DESCRIPTION_MAX_CHARS`]
    pub fn set_description(&mut self, description: &str) {
        self.description = clamp_chars(description, DESCRIPTION_MAX_CHARS);
    }

    /// Overwrite the target URL
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    /// Whether both title and description are present
    ///
    /// This is the admission condition for analysis.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }
}

/// Outcome of an analysis submission
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The server produced an analysis text
    Success { analysis: String },

    /// The submission failed; the message is what the user sees
    Failure { kind: ErrorKind, message: String },
}

impl AnalysisOutcome {
    /// Build a failure outcome
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        AnalysisOutcome::Failure {
            kind,
            message: message.into(),
        }
    }
}

impl From<&ClientError> for AnalysisOutcome {
    fn from(error: &ClientError) -> Self {
        AnalysisOutcome::Failure {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
