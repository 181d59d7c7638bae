//! Interpretation of packagecloud API responses.
//!
//! The status mapping follows <https://packagecloud.io/docs/api>: 200/201
//! carry a JSON body, 401/404 carry nothing useful, and 422 carries a map of
//! field names to validation messages.

use crate::error::ApiError;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Checks the HTTP status of `response` and decodes its JSON body.
pub fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let body = response.text()?;
    interpret(status, &body)
}

/// Checks the HTTP status of `response`, discarding the body. For mutating
/// calls (destroy, promote, upload) where only the outcome matters.
pub fn check(response: Response) -> Result<(), ApiError> {
    let status = response.status().as_u16();
    let body = response.text()?;
    interpret_empty(status, &body)
}

/// Maps an HTTP status and body to a decoded value of type `T`.
pub fn interpret<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    match status {
        200 | 201 => Ok(serde_json::from_str(body)?),
        other => Err(status_error(other, body)),
    }
}

/// Maps an HTTP status and body to a bare success/error outcome.
pub fn interpret_empty(status: u16, body: &str) -> Result<(), ApiError> {
    match status {
        200 | 201 => Ok(()),
        other => Err(status_error(other, body)),
    }
}

/// Outcome of a HEAD existence check. Only a 200 means the resource exists;
/// any other status, including the classified error statuses, means it does
/// not. Transport-level failures are handled by the caller and still
/// propagate as errors.
pub fn exists(status: u16) -> bool {
    status == 200
}

fn status_error(status: u16, body: &str) -> ApiError {
    match status {
        401 => http_error(status, "HTTP status: Unauthorized"),
        404 => http_error(status, "HTTP status: Not Found"),
        422 => unprocessable_entity(body),
        other => http_error(other, &format!("unexpected HTTP status: {}", other)),
    }
}

/// A 422 body maps field names to lists of validation messages. Only the
/// first message of the lexicographically smallest field name is surfaced,
/// so the reported message is stable no matter how the server orders the
/// fields.
fn unprocessable_entity(body: &str) -> ApiError {
    let fields: BTreeMap<String, Vec<String>> = match serde_json::from_str(body) {
        Ok(fields) => fields,
        Err(_) => return http_error(422, "invalid HTTP body"),
    };

    for (_, messages) in fields {
        if let Some(message) = messages.into_iter().next() {
            return ApiError::Http {
                status: 422,
                message,
            };
        }
    }

    http_error(422, "invalid HTTP body")
}

fn http_error(status: u16, message: &str) -> ApiError {
    ApiError::Http {
        status,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct OneField {
        a: u32,
    }

    #[test]
    fn success_decodes_the_body() {
        let decoded: OneField = interpret(200, r#"{"a":1}"#).unwrap();
        assert_eq!(decoded, OneField { a: 1 });
    }

    #[test]
    fn created_decodes_the_body() {
        let decoded: OneField = interpret(201, r#"{"a":7}"#).unwrap();
        assert_eq!(decoded, OneField { a: 7 });
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let error = interpret::<OneField>(200, "not json").unwrap_err();
        assert!(matches!(error, ApiError::Decode(_)));
    }

    #[test]
    fn unauthorized_mentions_the_status_text() {
        let error = interpret::<OneField>(401, "").unwrap_err();
        assert!(error.to_string().contains("Unauthorized"));
    }

    #[test]
    fn not_found_mentions_the_status_text() {
        let error = interpret_empty(404, "").unwrap_err();
        assert!(error.to_string().contains("Not Found"));
    }

    #[test]
    fn unprocessable_entity_surfaces_the_first_message_verbatim() {
        let error =
            interpret_empty(422, r#"{"filename":["has already been taken"]}"#).unwrap_err();
        assert_eq!(error.to_string(), "has already been taken");
    }

    #[test]
    fn unprocessable_entity_picks_the_smallest_field_name() {
        let body = r#"{"version":["is invalid"],"filename":["has already been taken","is too long"]}"#;
        let error = interpret_empty(422, body).unwrap_err();
        assert_eq!(error.to_string(), "has already been taken");
    }

    #[test]
    fn unprocessable_entity_with_garbage_body() {
        let error = interpret_empty(422, "<html>oops</html>").unwrap_err();
        assert_eq!(error.to_string(), "invalid HTTP body");
    }

    #[test]
    fn unprocessable_entity_with_no_messages() {
        let error = interpret_empty(422, r#"{"filename":[]}"#).unwrap_err();
        assert_eq!(error.to_string(), "invalid HTTP body");
    }

    #[test]
    fn head_200_means_the_package_exists() {
        assert!(exists(200));
    }

    #[test]
    fn head_404_means_absent_not_an_error() {
        assert!(!exists(404));
    }

    #[test]
    fn head_other_statuses_also_mean_absent() {
        assert!(!exists(401));
        assert!(!exists(503));
    }

    #[test]
    fn unexpected_status_reports_the_code() {
        let error = interpret_empty(503, "").unwrap_err();
        assert_eq!(error.to_string(), "unexpected HTTP status: 503");
        assert!(matches!(error, ApiError::Http { status: 503, .. }));
    }
}
