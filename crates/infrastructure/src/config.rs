//! API client configuration.
//!
//! The base URL is read from `FOLIO_BASE_URL` and falls back to the local
//! development server. The request timeout is fixed in code.

use std::collections::HashMap;
use std::time::Duration;

use ::config::{Config, Environment};
use folio_application::ApplicationError;
use url::Url;

/// Base URL used when `FOLIO_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:10000/";

/// Upper bound on a single API request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

const ENV_PREFIX: &str = "FOLIO";
const BASE_URL_KEY: &str = "base_url";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration sources could not be read.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// The base URL is not an absolute http(s) URL.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<ConfigError> for ApplicationError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

/// Settings of the REST client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
}

impl ApiConfig {
    /// Builds a configuration for `base_url` with the default timeout.
    ///
    /// A missing trailing slash is added so relative endpoint paths land
    /// under the base path.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds an invalid base URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Loads the configuration from an explicit set of `FOLIO_*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the variables hold an invalid base URL.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default(BASE_URL_KEY, DEFAULT_BASE_URL)?
            .add_source(Environment::with_prefix(ENV_PREFIX).source(vars))
            .build()?;

        Self::new(&settings.get_string(BASE_URL_KEY)?)
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The base URL, always ending in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves an endpoint path such as `about` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is malformed.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_to_local_server() {
        let config = ApiConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_millis(5000));
        assert_eq!(config, ApiConfig::new(DEFAULT_BASE_URL).unwrap());
    }

    #[test]
    fn base_url_from_environment() {
        let config =
            ApiConfig::from_vars(vars(&[("FOLIO_BASE_URL", "https://api.example.com/v1")]))
                .unwrap();
        assert_eq!(config.base_url().as_str(), "https://api.example.com/v1/");
        assert_eq!(
            config.endpoint("projects").unwrap().as_str(),
            "https://api.example.com/v1/projects"
        );
    }

    #[test]
    fn endpoint_ignores_leading_slash() {
        let config = ApiConfig::new("http://localhost:10000").unwrap();
        assert_eq!(
            config.endpoint("/main-info").unwrap().as_str(),
            "http://localhost:10000/main-info"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(matches!(
            ApiConfig::new("ftp://example.com/"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ApiConfig::from_vars(vars(&[("FOLIO_BASE_URL", "not a url")])),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn timeout_override() {
        let config = ApiConfig::new(DEFAULT_BASE_URL)
            .unwrap()
            .with_timeout(Duration::from_millis(50));
        assert_eq!(config.timeout(), Duration::from_millis(50));
    }
}
