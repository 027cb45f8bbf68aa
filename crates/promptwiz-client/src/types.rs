//! Wire types for the evaluate endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ServiceError;
use crate::query::Query;

/// Body of `POST /api/v{version}/evaluate/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluateRequest {
    #[serde(rename = "apiKey")]
    pub api_key: String,

    #[serde(rename = "querySet")]
    pub query_set: Vec<Map<String, Value>>,

    /// Left out entirely when the caller did not choose.
    #[serde(rename = "acceptPartial", skip_serializing_if = "Option::is_none")]
    pub accept_partial: Option<bool>,
}

impl EvaluateRequest {
    pub fn new(api_key: impl Into<String>, queries: &[Query], accept_partial: Option<bool>) -> Self {
        Self {
            api_key: api_key.into(),
            query_set: queries.iter().map(Query::as_payload).collect(),
            accept_partial,
        }
    }
}

/// Response body as sent by the service. Both keys are optional and their
/// shape is checked after decoding, so one odd field cannot hide the other.
#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateResponse {
    #[serde(rename = "resultSet", default)]
    pub result_set: Option<Value>,

    #[serde(default)]
    pub errors: Option<Value>,
}

/// Outcome of an evaluate call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Results, correlated to queries by `linkId` rather than position.
    #[serde(rename = "resultSet")]
    pub result_set: Vec<Value>,

    /// Errors reported by the service; `None` when it reported none.
    pub errors: Option<Vec<ServiceError>>,

    /// HTTP status code of the response.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl Evaluation {
    pub fn service_errors(&self) -> &[ServiceError] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// 2xx and no errors.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code) && self.service_errors().is_empty()
    }
}
