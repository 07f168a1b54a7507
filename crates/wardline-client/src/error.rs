//! API error classification.
//!
//! The backend signals validation failures with a 422 carrying
//! `{"detail": [{"loc": [...], "msg": "..."}]}`; proxies and dead backends
//! answer with HTML, which must not surface as a JSON parse error.

use serde::Deserialize;

/// How much of a non-JSON body to keep for diagnostics.
const BODY_SNIPPET_LEN: usize = 200;

/// One backend validation complaint, reduced to field and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Last element of the backend's `loc` path
    pub field: String,
    pub message: String,
}

/// Everything that can go wrong talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection-level failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with something other than JSON
    #[error("Server returned {content_type} instead of JSON. Check if backend is running at {url}")]
    UnexpectedContentType {
        url: String,
        content_type: String,
        /// First part of the body, for logs
        body_snippet: String,
    },

    /// Backend field validation failed (HTTP 422)
    #[error("Validation Error:\n{}", format_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// Any other non-success status
    #[error("API Error: {status}")]
    Status { status: u16 },

    /// The body claimed to be JSON but did not decode
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

/// Classify an error response body.
///
/// A parseable `detail` array becomes [`ApiError::Validation`]; anything
/// else falls back to the bare status.
pub fn classify_error_body(status: u16, body: &str) -> ApiError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        let violations = parsed
            .detail
            .into_iter()
            .map(|d| FieldViolation {
                field: d
                    .loc
                    .last()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .unwrap_or_else(|| "request".to_string()),
                message: d.msg,
            })
            .collect::<Vec<_>>();
        if !violations.is_empty() {
            return ApiError::Validation(violations);
        }
    }
    ApiError::Status { status }
}

/// Truncate a body for diagnostics.
pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_detail_parsed() {
        let body = r#"{"detail": [
            {"loc": ["body", "patient_email"], "msg": "value is not a valid email address"},
            {"loc": ["body", "age"], "msg": "ensure this value is greater than 0"}
        ]}"#;

        match classify_error_body(422, body) {
            ApiError::Validation(violations) => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].field, "patient_email");
                assert_eq!(violations[1].message, "ensure this value is greater than 0");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_message_lists_each_field() {
        let err = ApiError::Validation(vec![
            FieldViolation {
                field: "patient_email".into(),
                message: "value is not a valid email address".into(),
            },
            FieldViolation {
                field: "age".into(),
                message: "ensure this value is greater than 0".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation Error:\npatient_email: value is not a valid email address\nage: ensure this value is greater than 0"
        );
    }

    #[test]
    fn test_non_detail_body_falls_back_to_status() {
        assert!(matches!(
            classify_error_body(500, "Internal Server Error"),
            ApiError::Status { status: 500 }
        ));
        assert!(matches!(
            classify_error_body(422, r#"{"detail": []}"#),
            ApiError::Status { status: 422 }
        ));
    }

    #[test]
    fn test_numeric_loc_element() {
        let body = r#"{"detail": [{"loc": ["body", "reports", 0], "msg": "invalid file"}]}"#;
        match classify_error_body(422, body) {
            ApiError::Validation(violations) => assert_eq!(violations[0].field, "0"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_content_type_message() {
        let err = ApiError::UnexpectedContentType {
            url: "http://localhost:8000/api/v1/patients".into(),
            content_type: "text/html".into(),
            body_snippet: "<html>".into(),
        };
        assert_eq!(
            err.to_string(),
            "Server returned text/html instead of JSON. Check if backend is running at http://localhost:8000/api/v1/patients"
        );
    }
}
