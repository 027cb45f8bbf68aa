//! Pure helpers: credential selection and response decoding (no HTTP).

use serde_json::Value;

use crate::error::ServiceError;
use crate::types::{EvaluateResponse, Evaluation};

/// Per-call override, else the configured key, else empty.
pub(crate) fn resolve_api_key<'a>(override_key: Option<&'a str>, configured: &'a str) -> &'a str {
    override_key.filter(|k| !k.is_empty()).unwrap_or(configured)
}

/// Decode a response body into an [`Evaluation`].
///
/// Never fails. A body that is not a JSON object yields an empty result set
/// and a single `UNKNOWN_RESPONSE` error. Otherwise error entries are kept
/// whatever their shape; a `resultSet` that is not an array is replaced by
/// an empty one plus an `UNKNOWN_RESPONSE` entry quoting it, next to the
/// errors the service sent.
pub(crate) fn decode_response(body: &str, status_code: u16) -> Evaluation {
    let payload = match serde_json::from_str::<EvaluateResponse>(body) {
        Ok(payload) => payload,
        Err(err) => {
            return Evaluation {
                result_set: Vec::new(),
                errors: Some(vec![ServiceError::unknown_response(err, body)]),
                status_code,
            }
        }
    };

    let mut errors = payload.errors.map(|errors| match errors {
        Value::Array(entries) => entries.into_iter().map(ServiceError::from).collect(),
        single => vec![ServiceError::from(single)],
    });

    let result_set = match payload.result_set {
        None => Vec::new(),
        Some(Value::Array(results)) => results,
        Some(other) => {
            errors
                .get_or_insert_with(Vec::new)
                .push(ServiceError::unknown_response(
                    "resultSet is not an array",
                    &other.to_string(),
                ));
            Vec::new()
        }
    };

    Evaluation {
        result_set,
        errors,
        status_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_api_key() {
        assert_eq!(resolve_api_key(Some("override"), "configured"), "override");
        assert_eq!(resolve_api_key(None, "configured"), "configured");
        assert_eq!(resolve_api_key(Some(""), "configured"), "configured");
        assert_eq!(resolve_api_key(None, ""), "");
    }

    #[test]
    fn test_decode_result_set() {
        let evaluation = decode_response(r#"{"resultSet":[{"text":"hi"}]}"#, 200);
        assert_eq!(evaluation.result_set, vec![json!({ "text": "hi" })]);
        assert_eq!(evaluation.errors, None);
        assert_eq!(evaluation.status_code, 200);
    }

    #[test]
    fn test_decode_missing_keys_default() {
        let evaluation = decode_response("{}", 204);
        assert!(evaluation.result_set.is_empty());
        assert!(evaluation.errors.is_none());
        assert_eq!(evaluation.status_code, 204);
    }

    #[test]
    fn test_decode_null_result_set() {
        let evaluation = decode_response(r#"{"resultSet":null,"errors":null}"#, 200);
        assert!(evaluation.result_set.is_empty());
        assert!(evaluation.errors.is_none());
    }

    #[test]
    fn test_decode_passes_errors_through() {
        let body = r#"{"resultSet":[],"errors":[{"code":"INVALID_API_KEY","description":"bad key"}]}"#;
        let evaluation = decode_response(body, 401);

        let errors = evaluation.errors.expect("errors present");
        assert_eq!(errors, vec![ServiceError::new("INVALID_API_KEY", "bad key")]);
        assert_eq!(evaluation.status_code, 401);
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let evaluation = decode_response(r#"{"resultSet":[1,2],"requestId":"abc"}"#, 200);
        assert_eq!(evaluation.result_set, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_decode_non_json_body() {
        let evaluation = decode_response("<html>error</html>", 500);

        assert!(evaluation.result_set.is_empty());
        assert_eq!(evaluation.status_code, 500);

        let errors = evaluation.errors.expect("synthetic error");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "UNKNOWN_RESPONSE");
        assert!(errors[0]
            .description
            .starts_with("Could not parse the response: "));
        assert!(errors[0].description.ends_with("\n<html>error</html>"));
    }

    #[test]
    fn test_decode_non_object_body() {
        let evaluation = decode_response("[1, 2, 3]", 200);
        assert!(evaluation.result_set.is_empty());
        assert!(evaluation.service_errors()[0].is_unknown_response());
    }

    #[test]
    fn test_decode_non_array_result_set_keeps_errors() {
        let body = r#"{"resultSet":"nope","errors":[{"code":"LIMIT","description":"slow down"}]}"#;
        let evaluation = decode_response(body, 200);

        assert!(evaluation.result_set.is_empty());
        let errors = evaluation.service_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], ServiceError::new("LIMIT", "slow down"));
        assert!(errors[1].is_unknown_response());
        assert!(errors[1].description.ends_with("\n\"nope\""));
    }

    #[test]
    fn test_decode_numeric_error_code_keeps_results() {
        let body = r#"{"resultSet":[{"text":"hi"}],"errors":[{"code":42,"description":"x"}]}"#;
        let evaluation = decode_response(body, 200);

        assert_eq!(evaluation.result_set, vec![json!({ "text": "hi" })]);
        let errors = evaluation.service_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "42");
        assert_eq!(errors[0].description, "x");
        assert_eq!(errors[0].raw(), &json!({ "code": 42, "description": "x" }));
    }

    #[test]
    fn test_decode_null_error_description_keeps_results() {
        let body = r#"{"resultSet":[{"text":"hi"}],"errors":[{"code":42,"description":null}]}"#;
        let evaluation = decode_response(body, 200);

        assert_eq!(evaluation.result_set, vec![json!({ "text": "hi" })]);
        let errors = evaluation.service_errors();
        assert_eq!(errors[0].code, "42");
        assert_eq!(errors[0].description, "");
        assert!(!errors[0].is_unknown_response());
    }

    #[test]
    fn test_decode_string_error_entry_keeps_results() {
        let body = r#"{"resultSet":[{"text":"hi"}],"errors":["quota exceeded"]}"#;
        let evaluation = decode_response(body, 429);

        assert_eq!(evaluation.result_set, vec![json!({ "text": "hi" })]);
        assert_eq!(evaluation.status_code, 429);
        let errors = evaluation.service_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].description, "quota exceeded");
        assert_eq!(errors[0].raw(), &json!("quota exceeded"));
    }

    #[test]
    fn test_decode_single_error_object() {
        let body = r#"{"errors":{"code":"DOWN","description":"maintenance"}}"#;
        let evaluation = decode_response(body, 503);

        assert!(evaluation.result_set.is_empty());
        assert_eq!(
            evaluation.service_errors(),
            &[ServiceError::new("DOWN", "maintenance")]
        );
    }

    #[test]
    fn test_decode_empty_body() {
        let evaluation = decode_response("", 502);
        assert_eq!(evaluation.status_code, 502);
        assert!(evaluation.service_errors()[0].is_unknown_response());
    }
}
