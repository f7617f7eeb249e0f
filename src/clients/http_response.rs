//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type and the server [`Status`]
//! object that API servers return for failures.

use std::collections::HashMap;

use serde::Deserialize;

use crate::clients::errors::HttpResponseError;

/// A status object returned by the API server for failed requests and for
/// `ERROR` watch events.
///
/// Only the fields the client acts on are decoded; unknown fields are ignored.
///
/// # Example
///
/// ```rust
/// use resource_helper::clients::Status;
///
/// let body = br#"{"kind":"Status","status":"Failure","message":"pods \"web\" not found","reason":"NotFound","code":404}"#;
/// let status = Status::from_slice(body).unwrap();
/// assert_eq!(status.reason.as_deref(), Some("NotFound"));
/// assert_eq!(status.code, Some(404));
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Status {
    /// Either "Success" or "Failure".
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable description of the status.
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable reason for the failure.
    #[serde(default)]
    pub reason: Option<String>,
    /// Suggested HTTP return code.
    #[serde(default)]
    pub code: Option<u16>,
}

impl Status {
    /// Parses a status object from a response body.
    ///
    /// Returns `None` if the body is not a JSON object of kind `Status`.
    #[must_use]
    pub fn from_slice(body: &[u8]) -> Option<Self> {
        #[derive(Deserialize)]
        struct Kind {
            #[serde(default)]
            kind: Option<String>,
        }

        let kind: Kind = serde_json::from_slice(body).ok()?;
        if kind.kind.as_deref() != Some("Status") {
            return None;
        }
        serde_json::from_slice(body).ok()
    }

    /// Converts the status into a response error, using `fallback_code` when
    /// the status carries no code of its own.
    #[must_use]
    pub fn into_error(self, fallback_code: u16) -> HttpResponseError {
        let code = self.code.unwrap_or(fallback_code);
        HttpResponseError {
            code,
            message: self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("the server responded with status {code}")),
            reason: self.reason.filter(|r| !r.is_empty()),
        }
    }
}

/// An HTTP response from the API server.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the server status object carried in the body, if any.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        Status::from_slice(&self.body)
    }

    /// Builds the error describing a non-successful response.
    ///
    /// Prefers the server status message; falls back to the raw body text.
    #[must_use]
    pub fn to_error(&self) -> HttpResponseError {
        if let Some(status) = self.status() {
            return status.into_error(self.code);
        }

        let text = String::from_utf8_lossy(&self.body);
        let text = text.trim();
        HttpResponseError {
            code: self.code,
            message: if text.is_empty() {
                format!("the server responded with status {}", self.code)
            } else {
                text.to_string()
            },
            reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), Vec::new());
            assert!(
                response.is_ok(),
                "Expected is_ok() to be true for code {code}"
            );
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 404, 409, 422, 500, 503] {
            assert!(!HttpResponse::new(code, HashMap::new(), Vec::new()).is_ok());
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["application/json".to_string()],
        );
        let response = HttpResponse::new(200, headers, Vec::new());
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_to_error_uses_status_object() {
        let body = br#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"Operation cannot be fulfilled","reason":"Conflict","code":409}"#;
        let response = HttpResponse::new(409, HashMap::new(), body.to_vec());

        let error = response.to_error();
        assert_eq!(error.code, 409);
        assert_eq!(error.message, "Operation cannot be fulfilled");
        assert_eq!(error.reason.as_deref(), Some("Conflict"));
    }

    #[test]
    fn test_to_error_falls_back_to_body_text() {
        let response = HttpResponse::new(502, HashMap::new(), b"Bad Gateway\n".to_vec());
        let error = response.to_error();
        assert_eq!(error.code, 502);
        assert_eq!(error.message, "Bad Gateway");
        assert!(error.reason.is_none());
    }

    #[test]
    fn test_to_error_with_empty_body() {
        let response = HttpResponse::new(500, HashMap::new(), Vec::new());
        assert_eq!(
            response.to_error().message,
            "the server responded with status 500"
        );
    }

    #[test]
    fn test_status_ignores_other_kinds() {
        let pod = br#"{"kind":"Pod","message":"hi"}"#;
        assert!(Status::from_slice(pod).is_none());
        assert!(Status::from_slice(b"not json").is_none());
    }
}
