//! Configuration types for a Document AI extraction run.
//!
//! All behaviour is controlled through [`ProcessorConfig`], built via its
//! [`ProcessorConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs, serialise them for logging, and diff two runs
//! to understand why their outputs differ.
//!
//! The environment is one explicit construction path
//! ([`ProcessorConfig::from_env`]) among others rather than the only one,
//! so library callers can build configs programmatically and tests never
//! depend on ambient process state.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};

/// Configuration for one extraction run against a Document AI processor.
///
/// Built via [`ProcessorConfig::builder()`] or [`ProcessorConfig::from_env()`].
///
/// # Example
/// ```rust
/// use pdf2fields::ProcessorConfig;
///
/// let config = ProcessorConfig::builder()
///     .project_id("my-project")
///     .location("eu")
///     .processor_id("a1b2c3d4")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Google Cloud project that owns the processor.
    pub project_id: String,

    /// Processor region, `"us"` or `"eu"`. Selects the regional API host:
    /// requests go to `{location}-documentai.googleapis.com`.
    pub location: String,

    /// Identifier of a processor created ahead of time in the project.
    pub processor_id: String,

    /// MIME type of the uploaded document. Default: `application/pdf`.
    pub mime_type: String,

    /// OAuth2 bearer token for the request. If `None`, resolved at request
    /// time from `DOCAI_ACCESS_TOKEN` then `GOOGLE_ACCESS_TOKEN`.
    ///
    /// Skipped during serialisation so a config logged for diagnostics never
    /// leaks a credential.
    #[serde(skip)]
    pub access_token: Option<String>,

    /// Override the full endpoint URL, e.g. to point at a mock server in
    /// tests. When set, `project_id`/`location`/`processor_id` are not used
    /// to derive the URL.
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds. Default: 120.
    ///
    /// Online processing of a dense multi-page form can take tens of
    /// seconds; 120 leaves headroom without letting a wedged connection
    /// hang the run forever. There is no retry on timeout.
    pub timeout_secs: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            location: "us".to_string(),
            processor_id: String::new(),
            mime_type: "application/pdf".to_string(),
            access_token: None,
            endpoint: None,
            timeout_secs: 120,
        }
    }
}

impl ProcessorConfig {
    /// Create a new builder for `ProcessorConfig`.
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder {
            config: Self::default(),
        }
    }

    /// Build a config from the process environment.
    ///
    /// Reads `DOCAI_PROJECT_ID`, `DOCAI_LOCATION`, and `DOCAI_PROCESSOR_ID`,
    /// falling back to the lowercase names (`project_id`, `location`,
    /// `processor_id`) that existing deployments already export, so nobody
    /// has to re-label their environment.
    pub fn from_env() -> Result<Self, ExtractError> {
        let project_id = env_either("DOCAI_PROJECT_ID", "project_id").ok_or_else(|| {
            ExtractError::InvalidConfig("DOCAI_PROJECT_ID is not set".to_string())
        })?;
        let location = env_either("DOCAI_LOCATION", "location")
            .ok_or_else(|| ExtractError::InvalidConfig("DOCAI_LOCATION is not set".to_string()))?;
        let processor_id = env_either("DOCAI_PROCESSOR_ID", "processor_id").ok_or_else(|| {
            ExtractError::InvalidConfig("DOCAI_PROCESSOR_ID is not set".to_string())
        })?;

        Self::builder()
            .project_id(project_id)
            .location(location)
            .processor_id(processor_id)
            .build()
    }

    /// The URL the process request is sent to.
    ///
    /// `https://{location}-documentai.googleapis.com/v1/projects/{project}/locations/{location}/processors/{id}:process`
    /// unless an explicit [`endpoint`](Self::endpoint) override is set.
    pub fn process_url(&self) -> String {
        if let Some(ref endpoint) = self.endpoint {
            return endpoint.clone();
        }
        format!(
            "https://{loc}-documentai.googleapis.com/v1/projects/{proj}/locations/{loc}/processors/{id}:process",
            loc = self.location,
            proj = self.project_id,
            id = self.processor_id,
        )
    }
}

/// First non-empty value among two environment variable names.
fn env_either(primary: &str, legacy: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var(legacy).ok().filter(|v| !v.is_empty()))
}

/// Builder for [`ProcessorConfig`].
#[derive(Debug)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    pub fn project_id(mut self, id: impl Into<String>) -> Self {
        self.config.project_id = id.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.config.location = location.into();
        self
    }

    pub fn processor_id(mut self, id: impl Into<String>) -> Self {
        self.config.processor_id = id.into();
        self
    }

    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.config.mime_type = mime.into();
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = Some(token.into());
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// An `endpoint` override relaxes the identity checks: a mock server
    /// needs no project or processor.
    pub fn build(self) -> Result<ProcessorConfig, ExtractError> {
        let c = &self.config;
        if c.endpoint.is_none() {
            if c.project_id.is_empty() {
                return Err(ExtractError::InvalidConfig(
                    "project_id must not be empty".into(),
                ));
            }
            if c.location.is_empty() {
                return Err(ExtractError::InvalidConfig(
                    "location must not be empty".into(),
                ));
            }
            if c.processor_id.is_empty() {
                return Err(ExtractError::InvalidConfig(
                    "processor_id must not be empty".into(),
                ));
            }
        }
        if c.mime_type.is_empty() {
            return Err(ExtractError::InvalidConfig(
                "mime_type must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_happy_path() {
        let config = ProcessorConfig::builder()
            .project_id("proj")
            .location("eu")
            .processor_id("abc123")
            .timeout_secs(30)
            .build()
            .unwrap();
        assert_eq!(config.location, "eu");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.mime_type, "application/pdf");
    }

    #[test]
    fn builder_rejects_empty_project() {
        let err = ProcessorConfig::builder()
            .location("us")
            .processor_id("abc123")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("project_id"));
    }

    #[test]
    fn endpoint_override_skips_identity_checks() {
        let config = ProcessorConfig::builder()
            .endpoint("http://127.0.0.1:9090/process")
            .build()
            .unwrap();
        assert_eq!(config.process_url(), "http://127.0.0.1:9090/process");
    }

    #[test]
    fn process_url_is_regional() {
        let config = ProcessorConfig::builder()
            .project_id("my-proj")
            .location("eu")
            .processor_id("a1b2")
            .build()
            .unwrap();
        assert_eq!(
            config.process_url(),
            "https://eu-documentai.googleapis.com/v1/projects/my-proj/locations/eu/processors/a1b2:process"
        );
    }

    #[test]
    fn timeout_floor_is_one() {
        let config = ProcessorConfig::builder()
            .project_id("p")
            .location("us")
            .processor_id("x")
            .timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(config.timeout_secs, 1);
    }
}
