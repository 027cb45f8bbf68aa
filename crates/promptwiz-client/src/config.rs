//! Client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// API versions this client can talk to.
pub const SUPPORTED_API_VERSIONS: &[&str] = &["0.1"];

pub const DEFAULT_API_VERSION: &str = "0.1";

pub const DEFAULT_PROMPT_WIZ_URL: &str = "https://promptwiz.co.uk";

/// A supported PromptWiz API version.
///
/// Can only be constructed from a member of [`SUPPORTED_API_VERSIONS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion(String);

impl ApiVersion {
    pub fn parse(version: &str) -> ClientResult<Self> {
        if SUPPORTED_API_VERSIONS.contains(&version) {
            Ok(Self(version.to_string()))
        } else {
            Err(ClientError::UnsupportedApiVersion {
                version: version.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self(DEFAULT_API_VERSION.to_string())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApiVersion {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ApiVersion {
    type Error = ClientError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Numeric versions (`0.1`) use their shortest decimal form.
impl TryFrom<f64> for ApiVersion {
    type Error = ClientError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::parse(&value.to_string())
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.0
    }
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Default API key sent with every request.
    #[serde(default)]
    pub api_key: String,

    /// API version used to build the endpoint URL.
    #[serde(default)]
    pub api_version: ApiVersion,

    /// Service base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; no deadline when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_PROMPT_WIZ_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_version: ApiVersion::default(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `PROMPTWIZ_API_KEY` | Default API key |
    /// | `PROMPTWIZ_URL` | Service base URL |
    /// | `PROMPTWIZ_API_VERSION` | API version |
    /// | `PROMPTWIZ_TIMEOUT` | Request timeout in seconds |
    ///
    /// Fails only when `PROMPTWIZ_API_VERSION` names an unsupported version.
    pub fn from_env() -> ClientResult<Self> {
        let api_version = match std::env::var("PROMPTWIZ_API_VERSION") {
            Ok(v) if !v.trim().is_empty() => ApiVersion::parse(&v)?,
            _ => ApiVersion::default(),
        };

        Ok(Self {
            api_key: std::env::var("PROMPTWIZ_API_KEY").unwrap_or_default(),
            api_version,
            base_url: std::env::var("PROMPTWIZ_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_base_url),
            timeout_secs: std::env::var("PROMPTWIZ_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok()),
        })
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the API version.
    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// `{base_url}/api/v{api_version}/evaluate/`
    pub fn evaluate_url(&self) -> String {
        format!(
            "{}/api/v{}/evaluate/",
            self.base_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_api_version_allow_list() {
        assert_eq!(ApiVersion::parse("0.1").unwrap().as_str(), "0.1");
        assert!(matches!(
            ApiVersion::parse("9.9"),
            Err(ClientError::UnsupportedApiVersion { version }) if version == "9.9"
        ));
        assert!(ApiVersion::parse("").is_err());
    }

    #[test]
    fn test_api_version_is_exact_match() {
        for version in [" 0.1 ", "0.1\n", "v0.1", "0.10"] {
            assert!(matches!(
                ApiVersion::parse(version),
                Err(ClientError::UnsupportedApiVersion { version: rejected }) if rejected == version
            ));
        }
    }

    #[test]
    fn test_api_version_from_float() {
        assert_eq!(ApiVersion::try_from(0.1).unwrap().as_str(), "0.1");
        assert!(ApiVersion::try_from(1.0).is_err());
    }

    #[test]
    fn test_api_version_deserialize_validates() {
        let ok: ApiVersion = serde_json::from_str("\"0.1\"").unwrap();
        assert_eq!(ok, ApiVersion::default());

        let err = serde_json::from_str::<ApiVersion>("\"2.0\"").unwrap_err();
        assert!(err.to_string().contains("unsupported PromptWiz API version"));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_key, "");
        assert_eq!(config.api_version.as_str(), DEFAULT_API_VERSION);
        assert_eq!(config.base_url, DEFAULT_PROMPT_WIZ_URL);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_evaluate_url() {
        let config = ClientConfig::default();
        assert_eq!(
            config.evaluate_url(),
            "https://promptwiz.co.uk/api/v0.1/evaluate/"
        );

        let config = config.with_base_url("http://localhost:8000/");
        assert_eq!(
            config.evaluate_url(),
            "http://localhost:8000/api/v0.1/evaluate/"
        );
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::default()
            .with_api_key("key")
            .with_base_url("http://example.test")
            .with_timeout_secs(5);

        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, "http://example.test");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ClientConfig = serde_json::from_str(r#"{"api_key": "abc"}"#).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, DEFAULT_PROMPT_WIZ_URL);
        assert_eq!(config.api_version, ApiVersion::default());
    }

    fn clear_env() {
        std::env::remove_var("PROMPTWIZ_API_KEY");
        std::env::remove_var("PROMPTWIZ_URL");
        std::env::remove_var("PROMPTWIZ_API_VERSION");
        std::env::remove_var("PROMPTWIZ_TIMEOUT");
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env();

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_key, "");
        assert_eq!(config.base_url, DEFAULT_PROMPT_WIZ_URL);
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env_values() {
        clear_env();
        std::env::set_var("PROMPTWIZ_API_KEY", "env-key");
        std::env::set_var("PROMPTWIZ_URL", "http://env.test");
        std::env::set_var("PROMPTWIZ_API_VERSION", "0.1");
        std::env::set_var("PROMPTWIZ_TIMEOUT", "12");

        let config = ClientConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "http://env.test");
        assert_eq!(config.timeout_secs, Some(12));
    }

    #[test]
    #[serial]
    fn test_config_from_env_unsupported_version() {
        clear_env();
        std::env::set_var("PROMPTWIZ_API_VERSION", "0.2");

        let result = ClientConfig::from_env();
        clear_env();

        assert!(matches!(
            result,
            Err(ClientError::UnsupportedApiVersion { .. })
        ));
    }
}
