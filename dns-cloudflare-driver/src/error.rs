use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code the provider uses for rejected input, reused for client-side validation.
pub const INVALID_INPUT_CODE: &str = "E_INVLDINPUT";

/// Unified error type for all driver operations.
///
/// Each variant includes a `provider` field identifying which driver produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Classification
///
/// Errors produced from a completed HTTP response follow the status code:
/// - `401` becomes [`InvalidCredentials`](Self::InvalidCredentials)
/// - a non-JSON error body becomes [`MalformedResponse`](Self::MalformedResponse)
/// - any other rejected status becomes [`ApiError`](Self::ApiError)
///
/// Client-side input validation reuses [`ApiError`](Self::ApiError) with
/// [`INVALID_INPUT_CODE`] so callers handle one shape for rejected input.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("[{provider}] Network error: {detail}")]
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("[{provider}] Request timeout: {detail}")]
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API rejected the account identifier or token (HTTP 401).
    #[error("[{provider}] Invalid credentials: {message}")]
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Raw response body, or `"<status>: <reason>"` when the body was empty.
        message: String,
    },

    /// An error response was expected to carry a JSON envelope but did not.
    #[error("[{provider}] Malformed response: {detail}")]
    MalformedResponse {
        /// Provider that produced the error.
        provider: String,
        /// Parser diagnostics.
        detail: String,
        /// The unparsed response body.
        body: String,
    },

    /// The provider reported a failure in its error envelope.
    #[error("[{provider}] Error: {err_code}: {err_msg} (HTTP {status})")]
    ApiError {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code of the response (400 for client-side validation).
        status: u16,
        /// Provider error code, e.g. `E_UNAUTH` or [`INVALID_INPUT_CODE`].
        err_code: String,
        /// Human-readable message from the provider.
        err_msg: String,
    },

    /// A successful response could not be parsed or lacked an expected field.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// The operation needs HTTP 200 but received a pass-through response.
    #[error("[{provider}] Unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code that was received.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// HTTP 503, only raised when the driver runs with `strict_unavailable`.
    #[error("[{provider}] Service unavailable")]
    ServiceUnavailable {
        /// Provider that produced the error.
        provider: String,
        /// Raw response body.
        body: String,
    },
}

impl ProviderError {
    /// Client-side validation failure, shaped like a provider `E_INVLDINPUT` rejection.
    pub fn invalid_input(provider: &str, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider: provider.to_string(),
            status: 400,
            err_code: INVALID_INPUT_CODE.to_string(),
            err_msg: message.into(),
        }
    }

    /// Whether this error came from client-side input validation.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::ApiError { err_code, .. } if err_code == INVALID_INPUT_CODE)
    }

    /// 是否为预期行为（用户输入、凭证错误等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::ApiError { .. }
        )
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
