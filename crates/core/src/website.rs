//! Static website hosting configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default index document suffix
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

/// Default error document key
pub const DEFAULT_ERROR_DOCUMENT: &str = "error.html";

/// Index and error documents served by a website-enabled bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteConfig {
    /// Suffix appended to requests for a "directory", e.g. `index.html`
    #[serde(default = "default_index_document")]
    pub index_document: String,

    /// Object returned for 4xx errors
    #[serde(default = "default_error_document")]
    pub error_document: String,
}

fn default_index_document() -> String {
    DEFAULT_INDEX_DOCUMENT.to_string()
}

fn default_error_document() -> String {
    DEFAULT_ERROR_DOCUMENT.to_string()
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        Self {
            index_document: default_index_document(),
            error_document: default_error_document(),
        }
    }
}

impl WebsiteConfig {
    /// Replace the documents that were given explicitly
    pub fn with_overrides(mut self, index: Option<String>, error: Option<String>) -> Self {
        if let Some(index) = index {
            self.index_document = index;
        }
        if let Some(error) = error {
            self.error_document = error;
        }
        self
    }

    /// Check the documents against S3's rules
    ///
    /// The index suffix must be non-empty and must not contain a slash.
    pub fn validate(&self) -> Result<()> {
        if self.index_document.is_empty() {
            return Err(Error::Config("Index document cannot be empty".into()));
        }
        if self.index_document.contains('/') {
            return Err(Error::Config(format!(
                "Index document '{}' must not contain '/'",
                self.index_document
            )));
        }
        if self.error_document.is_empty() {
            return Err(Error::Config("Error document cannot be empty".into()));
        }
        Ok(())
    }
}
