//! PromptWiz client.
//!
//! Public API: no status code knowledge. The POST lives in http.rs and
//! response decoding in helpers.rs.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use crate::config::{ApiVersion, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::query::Query;
use crate::types::{EvaluateRequest, Evaluation};

mod helpers;
mod http;

use helpers::{decode_response, resolve_api_key};
use http::HttpBackend;

/// User agent sent with every request.
pub const CLIENT_USER_AGENT: &str = concat!("promptwiz-client/", env!("CARGO_PKG_VERSION"));

/// Per-call options for [`PromptWizClient::evaluate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluateOptions {
    /// Whether a result set missing some queries is acceptable.
    /// `None` leaves the decision to the service.
    pub accept_partial: Option<bool>,

    /// API key for this call only.
    pub api_key: Option<String>,

    /// Deadline for this call, overriding the configured timeout.
    pub timeout: Option<Duration>,
}

impl EvaluateOptions {
    pub fn accept_partial(mut self, accept: bool) -> Self {
        self.accept_partial = Some(accept);
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client for the PromptWiz evaluate API.
///
/// Each instance owns its configuration. Clones share the underlying
/// connection pool but not configuration changes made afterwards.
#[derive(Debug, Clone)]
pub struct PromptWizClient {
    http: HttpBackend,
    config: ClientConfig,
}

impl PromptWizClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| ClientError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http: HttpBackend { client },
            config,
        })
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.config.api_key = api_key.into();
    }

    pub fn api_version(&self) -> &ApiVersion {
        &self.config.api_version
    }

    /// Accepts `"0.1"` or `0.1`. On error the current version is kept.
    pub fn set_api_version<V>(&mut self, version: V) -> ClientResult<()>
    where
        V: TryInto<ApiVersion, Error = ClientError>,
    {
        self.config.api_version = version.try_into()?;
        Ok(())
    }

    /// Infallible counterpart of [`set_api_version`](Self::set_api_version)
    /// for a version that was already validated.
    pub fn set_api_version_value(&mut self, version: ApiVersion) {
        self.config.api_version = version;
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.config.base_url = base_url.into();
    }

    pub fn evaluate_url(&self) -> String {
        self.config.evaluate_url()
    }

    /// Evaluate a query set.
    ///
    /// Errors reported by the service, and bodies that are not valid JSON,
    /// come back inside the [`Evaluation`] together with the status code.
    /// Only transport failures (including timeouts) return `Err`.
    pub async fn evaluate(
        &self,
        query_set: &[Query],
        options: EvaluateOptions,
    ) -> ClientResult<Evaluation> {
        let url = self.config.evaluate_url();
        let api_key = resolve_api_key(options.api_key.as_deref(), &self.config.api_key);
        let request = EvaluateRequest::new(api_key, query_set, options.accept_partial);
        let timeout = options.timeout.or_else(|| self.config.timeout());

        debug!(
            url = %url,
            queries = query_set.len(),
            accept_partial = ?options.accept_partial,
            "evaluating query set"
        );

        let raw = self.http.post_json(&url, &request, timeout).await?;
        let evaluation = decode_response(&raw.body, raw.status_code);

        if evaluation
            .service_errors()
            .iter()
            .any(|e| e.is_unknown_response())
        {
            warn!(status = raw.status_code, "could not parse evaluate response");
        } else {
            debug!(
                status = evaluation.status_code,
                results = evaluation.result_set.len(),
                errors = evaluation.service_errors().len(),
                "evaluate response decoded"
            );
        }

        Ok(evaluation)
    }
}
