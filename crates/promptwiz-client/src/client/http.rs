//! HTTP layer: the single POST and reading the body.
//!
//! Status codes are not interpreted here; they travel with the body to the
//! decoding helpers.

use std::time::Duration;

use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::types::EvaluateRequest;

/// Raw response: status code and body text.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status_code: u16,
    pub body: String,
}

/// HTTP backend for making requests (holds the pooled reqwest client).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
}

impl HttpBackend {
    /// POST a JSON body once. No retry.
    pub(crate) async fn post_json(
        &self,
        url: &str,
        body: &EvaluateRequest,
        timeout: Option<Duration>,
    ) -> ClientResult<RawResponse> {
        let mut request = self.client.post(url).json(body);

        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status_code = response.status().as_u16();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::from(e)
            } else {
                ClientError::Transport {
                    message: format!("failed to read response body: {}", e),
                }
            }
        })?;

        debug!(status = status_code, bytes = body.len(), "received response");

        Ok(RawResponse { status_code, body })
    }
}
