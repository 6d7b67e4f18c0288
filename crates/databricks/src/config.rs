//! Workspace connection settings.

use crate::DatabricksError;
use std::fmt;
use std::time::Duration;

/// Default request timeout. Uploads send the whole file in one request, so this is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Connection settings for a Databricks workspace.
///
/// The `Debug` implementation masks the token.
#[derive(Clone)]
pub struct DatabricksConfig {
    host: String,
    token: String,
    timeout: Duration,
    user_agent: String,
}

impl DatabricksConfig {
    /// Creates a validated configuration.
    ///
    /// `host` is the workspace URL (e.g. `https://adb-123.4.azuredatabricks.net`); a
    /// trailing slash is removed.
    ///
    /// # Errors
    ///
    /// Returns [`DatabricksError::Config`] if the host is not an http(s) URL or the token
    /// is blank.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Result<Self, DatabricksError> {
        let host = host.into().trim().trim_end_matches('/').to_owned();
        let token = token.into().trim().to_owned();

        if !(host.starts_with("https://") || host.starts_with("http://")) {
            return Err(DatabricksError::Config(format!(
                "host must be an http(s) URL, got: '{}'",
                host
            )));
        }

        if token.is_empty() {
            return Err(DatabricksError::Config("token cannot be empty".into()));
        }

        Ok(Self {
            host,
            token,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("intake/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl fmt::Debug for DatabricksConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabricksConfig")
            .field("host", &self.host)
            .field("token", &"***REDACTED***")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let cfg = DatabricksConfig::new("https://example.cloud.databricks.com/", "dapi123").unwrap();
        assert_eq!(cfg.host(), "https://example.cloud.databricks.com");
        assert_eq!(cfg.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_new_rejects_bad_host() {
        let err = DatabricksConfig::new("example.cloud.databricks.com", "dapi123").unwrap_err();
        assert!(err.to_string().contains("http(s) URL"));
    }

    #[test]
    fn test_new_rejects_blank_token() {
        assert!(DatabricksConfig::new("https://example.com", "  ").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let cfg = DatabricksConfig::new("https://example.com", "dapi-secret").unwrap();
        let debug = format!("{:?}", cfg);
        assert!(!debug.contains("dapi-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
