//! Cloudflare client API 类型定义

use std::collections::BTreeMap;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ProviderError, Result};

use super::PROVIDER_NAME;

/// Wire envelope shared by every `api_json.html` response.
///
/// Success: `{"result": "success", "response": {...}}`.
/// Failure: `{"result": "error", "err_code": "...", "msg": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub result: Option<String>,
    pub response: Option<Value>,
    pub err_code: Option<Value>,
    pub msg: Option<Value>,
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool {
        self.result.as_deref() == Some("success")
    }

    pub fn err_code(&self) -> String {
        text(self.err_code.as_ref())
    }

    pub fn msg(&self) -> String {
        text(self.msg.as_ref())
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ============ Request parameters ============

/// Flat parameter map sent as the query string of an API call.
///
/// Keys are the provider's short codes (`a`, `z`, `v`, ...). Later inserts
/// replace earlier values for the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionParams(BTreeMap<String, String>);

impl ActionParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for a JSON endpoint action (`a=<action>`).
    pub fn action(action: &str) -> Self {
        Self::new().with("a", action)
    }

    pub fn insert(&mut self, key: &str, value: impl ToString) {
        self.0.insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// URL-encoded `k=v&k=v` form, keys in sorted order.
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Per-call overrides for [`Connection::request_with`](super::Connection::request_with).
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Request body; the API reads parameters from the query string, so this is usually empty.
    pub data: String,
    /// Headers to send. `None` means `Content-Type: application/json; charset=UTF-8`.
    pub headers: Option<HeaderMap>,
    /// HTTP method.
    pub method: Method,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            data: String::new(),
            headers: None,
            method: Method::POST,
        }
    }
}

// ============ Account settings ============

/// Basic security level of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityLevel {
    High,
    Medium,
    Low,
    EssentiallyOff,
}

impl SecurityLevel {
    pub const ALL: [Self; 4] = [Self::High, Self::Medium, Self::Low, Self::EssentiallyOff];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "med",
            Self::Low => "low",
            Self::EssentiallyOff => "eoff",
        }
    }
}

impl std::str::FromStr for SecurityLevel {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                ProviderError::invalid_input(
                    PROVIDER_NAME,
                    format!("Level must be in {}", allowed(Self::ALL.map(Self::as_str))),
                )
            })
    }
}

/// Cache level of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLevel {
    Aggressive,
    Basic,
}

impl CacheLevel {
    pub const ALL: [Self; 2] = [Self::Aggressive, Self::Basic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aggressive => "agg",
            Self::Basic => "basic",
        }
    }
}

impl std::str::FromStr for CacheLevel {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                ProviderError::invalid_input(
                    PROVIDER_NAME,
                    format!("Level must be in {}", allowed(Self::ALL.map(Self::as_str))),
                )
            })
    }
}

fn allowed<const N: usize>(values: [&str; N]) -> String {
    format!("[{}]", values.join(", "))
}

/// Optional filters for `zone_ips`.
///
/// Every field defaults to absent, and absent fields are not transmitted.
/// The API itself falls back to the last 24 hours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneIpsOptions {
    /// Look-back window in hours.
    pub hours: Option<u32>,
    /// Visitor class filter (`r` regular, `s` crawler, `t` threat).
    pub class: Option<String>,
    /// Include geo coordinates.
    pub geo: Option<bool>,
}

impl ZoneIpsOptions {
    #[must_use]
    pub fn hours(mut self, hours: u32) -> Self {
        self.hours = Some(hours);
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn geo(mut self, geo: bool) -> Self {
        self.geo = Some(geo);
        self
    }

    pub(crate) fn apply(&self, params: &mut ActionParams) {
        if let Some(hours) = self.hours {
            params.insert("hours", hours);
        }
        if let Some(class) = &self.class {
            params.insert("class", class);
        }
        if let Some(geo) = self.geo {
            params.insert("geo", u8::from(geo));
        }
    }
}
