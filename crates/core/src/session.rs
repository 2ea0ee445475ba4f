//! Session settings
//!
//! A session names the credential profile, region and endpoint used to reach
//! the object store. It is built once per invocation from the config file,
//! environment and CLI flags, then handed to the storage client explicitly.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Connection settings for the object store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Named credential profile from the shared AWS config/credentials files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Region buckets are created in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom S3-compatible endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Use path-style bucket addressing; unset means virtual-hosted style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_style: Option<bool>,
}

impl Session {
    /// Layer `overrides` on top of this session
    ///
    /// Every field set in `overrides` wins, including an explicit
    /// `path_style = false`.
    pub fn merge(self, overrides: Session) -> Session {
        Session {
            profile: overrides.profile.or(self.profile),
            region: overrides.region.or(self.region),
            endpoint: overrides.endpoint.or(self.endpoint),
            path_style: overrides.path_style.or(self.path_style),
        }
    }

    /// Whether requests should use path-style addressing
    pub fn uses_path_style(&self) -> bool {
        self.path_style.unwrap_or(false)
    }

    /// Validate the session settings
    pub fn validate(&self) -> Result<()> {
        if matches!(self.profile.as_deref(), Some("")) {
            return Err(Error::Config("Profile name cannot be empty".into()));
        }

        if matches!(self.region.as_deref(), Some("")) {
            return Err(Error::Config("Region cannot be empty".into()));
        }

        if let Some(endpoint) = &self.endpoint {
            let url = Url::parse(endpoint)?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(Error::Config(format!(
                    "Endpoint must use http or https: {endpoint}"
                )));
            }
        }

        Ok(())
    }
}
