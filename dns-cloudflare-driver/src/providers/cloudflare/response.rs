//! Response classification
//!
//! Decides whether a completed exchange succeeded and turns failures into
//! typed [`ProviderError`]s. Dispatch is purely on the HTTP status code.

use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::PROVIDER_NAME;
use super::types::ApiEnvelope;

/// Status classes the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// HTTP 401.
    Unauthorized,
    /// HTTP 503.
    ServiceUnavailable,
    /// Anything else, including 200 with a non-success envelope.
    Other(u16),
}

impl From<u16> for StatusClass {
    fn from(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            503 => Self::ServiceUnavailable,
            other => Self::Other(other),
        }
    }
}

/// What to do with HTTP 503.
///
/// The API has historically been treated as answering 503 for requests that
/// should not fail the caller, so the body is handed back unchanged by
/// default. 503 normally signals failure; `Error` opts into that reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnavailablePolicy {
    /// Return the body as-is, no error.
    #[default]
    PassThrough,
    /// Raise [`ProviderError::ServiceUnavailable`].
    Error,
}

/// A completed HTTP exchange with the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ProviderErrorMapper for ApiResponse {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// `result == "success"` and HTTP 200.
    ///
    /// The body must be JSON; a parse failure is returned as
    /// [`ProviderError::ParseError`] rather than classified.
    pub fn is_success(&self) -> Result<bool> {
        let envelope: ApiEnvelope = HttpUtils::parse_json(&self.body, self.provider_name())?;
        Ok(envelope.is_success() && self.is_ok())
    }

    /// Classify a non-success response, passing 503 through.
    ///
    /// Returns `Ok(body)` only for the 503 pass-through.
    pub fn classify_error(&self) -> Result<String> {
        self.classify_error_with(UnavailablePolicy::PassThrough)
    }

    /// Classify a non-success response under the given 503 policy.
    pub fn classify_error_with(&self, policy: UnavailablePolicy) -> Result<String> {
        match StatusClass::from(self.status) {
            StatusClass::Unauthorized => Err(ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                message: self.credentials_message(),
            }),
            // FIXME: 503 is returned as a body, not an error. Kept for compatibility
            // with existing callers; `UnavailablePolicy::Error` is the strict mode.
            StatusClass::ServiceUnavailable => match policy {
                UnavailablePolicy::PassThrough => {
                    log::warn!(
                        "[{}] HTTP 503 passed through: {}",
                        self.provider_name(),
                        truncate_for_log(&self.body)
                    );
                    Ok(self.body.clone())
                }
                UnavailablePolicy::Error => Err(ProviderError::ServiceUnavailable {
                    provider: self.provider_name().to_string(),
                    body: self.body.clone(),
                }),
            },
            StatusClass::Other(status) => {
                let envelope: ApiEnvelope = serde_json::from_str(&self.body).map_err(|e| {
                    ProviderError::MalformedResponse {
                        provider: self.provider_name().to_string(),
                        detail: format!("Failed to parse JSON: {e}"),
                        body: self.body.clone(),
                    }
                })?;
                Err(self.map_error(RawApiError::new(
                    status,
                    envelope.err_code(),
                    envelope.msg(),
                )))
            }
        }
    }

    /// Full classification used by the connection.
    ///
    /// Non-200 responses go straight to [`classify_error_with`](Self::classify_error_with);
    /// a 200 must carry a JSON success envelope.
    ///
    /// The body is only parsed as an envelope for HTTP 200, so a non-JSON 401
    /// still yields [`ProviderError::InvalidCredentials`] and a non-JSON 5xx
    /// yields [`ProviderError::MalformedResponse`] instead of a parse error.
    pub fn classify(self, policy: UnavailablePolicy) -> Result<Self> {
        if self.is_ok() && self.is_success()? {
            return Ok(self);
        }
        match self.classify_error_with(policy) {
            Ok(_) => Ok(self),
            Err(e) => {
                if e.is_expected() {
                    log::warn!("{e}");
                } else {
                    log::error!("{e}");
                }
                Err(e)
            }
        }
    }

    /// Fail with [`ProviderError::UnexpectedStatus`] unless HTTP 200.
    pub fn ensure_ok(&self) -> Result<&Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(ProviderError::UnexpectedStatus {
                provider: self.provider_name().to_string(),
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    /// The envelope's `response` object.
    pub fn response_object(&self) -> Result<Value> {
        let envelope: ApiEnvelope = HttpUtils::parse_json(&self.body, self.provider_name())?;
        envelope
            .response
            .ok_or_else(|| self.parse_error("Missing 'response' in API response"))
    }

    /// One field of the envelope's `response` object.
    pub fn response_field(&self, name: &str) -> Result<Value> {
        let mut response = self.response_object()?;
        response
            .get_mut(name)
            .map(Value::take)
            .ok_or_else(|| self.parse_error(format!("Missing 'response.{name}' in API response")))
    }

    fn credentials_message(&self) -> String {
        if self.body.is_empty() {
            let reason = reqwest::StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unauthorized");
            format!("{}: {reason}", self.status)
        } else {
            self.body.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- is_success ----

    #[test]
    fn success_requires_result_and_200() {
        let ok = ApiResponse::new(200, r#"{"result":"success","response":{}}"#);
        assert!(matches!(ok.is_success(), Ok(true)));

        let error_result = ApiResponse::new(200, r#"{"result":"error","err_code":"E"}"#);
        assert!(matches!(error_result.is_success(), Ok(false)));

        let wrong_status = ApiResponse::new(201, r#"{"result":"success"}"#);
        assert!(matches!(wrong_status.is_success(), Ok(false)));

        let missing_result = ApiResponse::new(200, r#"{"response":{}}"#);
        assert!(matches!(missing_result.is_success(), Ok(false)));
    }

    #[test]
    fn success_parse_failure_propagates() {
        let resp = ApiResponse::new(200, "<html>");
        assert!(matches!(
            resp.is_success(),
            Err(ProviderError::ParseError { .. })
        ));
    }

    // ---- classify_error ----

    #[test]
    fn unauthorized_uses_body() {
        let resp = ApiResponse::new(401, "bad token");
        let err = resp.classify_error();
        assert!(
            matches!(&err, Err(ProviderError::InvalidCredentials { message, .. }) if message == "bad token"),
            "unexpected result: {err:?}"
        );
    }

    #[test]
    fn unauthorized_empty_body_uses_status_text() {
        let resp = ApiResponse::new(401, "");
        let err = resp.classify_error();
        assert!(
            matches!(&err, Err(ProviderError::InvalidCredentials { message, .. }) if message == "401: Unauthorized"),
            "unexpected result: {err:?}"
        );
    }

    #[test]
    fn service_unavailable_returns_body() {
        let resp = ApiResponse::new(503, "OK");
        assert_eq!(resp.classify_error().ok().as_deref(), Some("OK"));
    }

    #[test]
    fn service_unavailable_strict_policy_errors() {
        let resp = ApiResponse::new(503, "OK");
        let err = resp.classify_error_with(UnavailablePolicy::Error);
        assert!(matches!(
            err,
            Err(ProviderError::ServiceUnavailable { body, .. }) if body == "OK"
        ));
    }

    #[test]
    fn other_status_with_envelope_is_api_error() {
        let resp = ApiResponse::new(500, r#"{"err_code":"E_FOO","msg":"bad thing"}"#);
        let err = resp.classify_error();
        assert!(
            matches!(
                &err,
                Err(ProviderError::ApiError { status: 500, err_code, err_msg, provider })
                    if err_code == "E_FOO" && err_msg == "bad thing" && provider == "cloudflare"
            ),
            "unexpected result: {err:?}"
        );
    }

    #[test]
    fn other_status_with_html_is_malformed() {
        let resp = ApiResponse::new(500, "<html>oops</html>");
        let err = resp.classify_error();
        assert!(
            matches!(&err, Err(ProviderError::MalformedResponse { body, .. }) if body == "<html>oops</html>"),
            "unexpected result: {err:?}"
        );
    }

    #[test]
    fn ok_status_with_error_envelope_is_api_error() {
        let resp = ApiResponse::new(
            200,
            r#"{"result":"error","err_code":"E_UNAUTH","msg":"Invalid zone"}"#,
        );
        let err = resp.classify_error();
        assert!(matches!(
            err,
            Err(ProviderError::ApiError { status: 200, err_code, .. }) if err_code == "E_UNAUTH"
        ));
    }

    #[test]
    fn status_class_dispatch() {
        assert_eq!(StatusClass::from(401), StatusClass::Unauthorized);
        assert_eq!(StatusClass::from(503), StatusClass::ServiceUnavailable);
        assert_eq!(StatusClass::from(404), StatusClass::Other(404));
    }

    // ---- classify ----

    #[test]
    fn classify_success_keeps_response() {
        let resp = ApiResponse::new(200, r#"{"result":"success","response":{"x":1}}"#);
        let classified = resp.clone().classify(UnavailablePolicy::PassThrough);
        assert_eq!(classified.ok(), Some(resp));
    }

    #[test]
    fn classify_pass_through_keeps_status() {
        let resp = ApiResponse::new(503, "OK");
        let classified = resp.classify(UnavailablePolicy::PassThrough);
        assert!(matches!(classified, Ok(ApiResponse { status: 503, ref body }) if body == "OK"));
    }

    #[test]
    fn classify_non_json_error_body_is_malformed() {
        let resp = ApiResponse::new(502, "<html>bad gateway</html>");
        assert!(matches!(
            resp.classify(UnavailablePolicy::PassThrough),
            Err(ProviderError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn classify_non_json_unauthorized_is_invalid_credentials() {
        let resp = ApiResponse::new(401, "<html>denied</html>");
        assert!(matches!(
            resp.classify(UnavailablePolicy::PassThrough),
            Err(ProviderError::InvalidCredentials { message, .. }) if message == "<html>denied</html>"
        ));
    }

    #[test]
    fn classify_non_json_ok_body_is_parse_error() {
        let resp = ApiResponse::new(200, "OK");
        assert!(matches!(
            resp.classify(UnavailablePolicy::PassThrough),
            Err(ProviderError::ParseError { .. })
        ));
    }

    // ---- field extraction ----

    #[test]
    fn response_field_extracts_value() {
        let resp = ApiResponse::new(
            200,
            r#"{"result":"success","response":{"fpurge_ts":1615811696}}"#,
        );
        assert_eq!(
            resp.response_field("fpurge_ts").ok(),
            Some(serde_json::json!(1_615_811_696))
        );
    }

    #[test]
    fn response_field_missing_is_parse_error() {
        let resp = ApiResponse::new(200, r#"{"result":"success","response":{}}"#);
        assert!(matches!(
            resp.response_field("ips"),
            Err(ProviderError::ParseError { detail, .. }) if detail.contains("response.ips")
        ));
    }

    #[test]
    fn ensure_ok_rejects_pass_through() {
        let resp = ApiResponse::new(503, "OK");
        assert!(matches!(
            resp.ensure_ok(),
            Err(ProviderError::UnexpectedStatus { status: 503, .. })
        ));
    }
}
