//! Query value type and its wire encoding.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Caller-assigned correlation token, echoed back by the service in results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum LinkId {
    Int(i64),
    Text(String),
}

impl LinkId {
    /// `0` and `""` are never sent.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Int(id) => *id == 0,
            Self::Text(id) => id.is_empty(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Int(id) => Value::from(*id),
            Self::Text(id) => Value::from(id.as_str()),
        }
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for LinkId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for LinkId {
    fn from(id: i32) -> Self {
        Self::Int(id.into())
    }
}

impl From<String> for LinkId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&str> for LinkId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A request to evaluate one prompt.
///
/// Built once by the caller and consumed when the query set is encoded.
/// Optional fields that are absent or empty are left out of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Query {
    /// Prompt ID on the service.
    #[serde(rename = "promptId", alias = "prompt_id")]
    prompt_id: u64,

    /// Values for the prompt parameters.
    #[serde(default)]
    args: Option<BTreeMap<String, String>>,

    /// Correlation token echoed back in the matching result.
    #[serde(default, rename = "linkId", alias = "link_id")]
    link_id: Option<LinkId>,

    /// Per-query override of the upstream model credential.
    #[serde(default, rename = "modelApiKey", alias = "model_api_key")]
    model_api_key: Option<String>,
}

impl Query {
    pub fn new(prompt_id: u64) -> Self {
        Self {
            prompt_id,
            args: None,
            link_id: None,
            model_api_key: None,
        }
    }

    /// Replace all prompt arguments.
    pub fn with_args<I, K, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.args = Some(
            args.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Add a single prompt argument.
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_link_id(mut self, link_id: impl Into<LinkId>) -> Self {
        self.link_id = Some(link_id.into());
        self
    }

    pub fn with_model_api_key(mut self, key: impl Into<String>) -> Self {
        self.model_api_key = Some(key.into());
        self
    }

    pub fn prompt_id(&self) -> u64 {
        self.prompt_id
    }

    pub fn args(&self) -> Option<&BTreeMap<String, String>> {
        self.args.as_ref()
    }

    pub fn link_id(&self) -> Option<&LinkId> {
        self.link_id.as_ref()
    }

    pub fn model_api_key(&self) -> Option<&str> {
        self.model_api_key.as_deref()
    }

    /// Wire encoding of this query.
    ///
    /// `promptId` is always present. `args`, `linkId` and `modelApiKey` are
    /// present only when set and non-empty.
    pub fn as_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("promptId".to_string(), Value::from(self.prompt_id));

        if let Some(args) = self.args.as_ref().filter(|a| !a.is_empty()) {
            let args = args
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
                .collect();
            payload.insert("args".to_string(), Value::Object(args));
        }

        if let Some(link_id) = self.link_id.as_ref().filter(|l| !l.is_empty()) {
            payload.insert("linkId".to_string(), link_id.to_value());
        }

        if let Some(key) = self.model_api_key.as_deref().filter(|k| !k.is_empty()) {
            payload.insert("modelApiKey".to_string(), Value::from(key));
        }

        payload
    }
}
