//! Cloudflare DNS Driver（旧版 client interface API）
//!
//! Every call is a POST to one of two fixed endpoints on `www.cloudflare.com`,
//! differentiated by the `a` (action) query parameter.

mod connection;
mod driver;
mod error;
mod provider;
mod response;
mod types;

use std::sync::{Arc, Weak};

use crate::providers::common::create_http_client;
use crate::types::RecordType;

pub use connection::Connection;
pub use response::{ApiResponse, StatusClass, UnavailablePolicy};
pub use types::{
    ActionParams, ApiEnvelope, CacheLevel, RequestOptions, SecurityLevel, ZoneIpsOptions,
};

pub(crate) const PROVIDER_NAME: &str = "cloudflare";

/// API host. Always TLS.
pub const CF_API_BASE: &str = "https://www.cloudflare.com";
/// JSON endpoint for all account and record actions.
pub const API_ACTION: &str = "/api_json.html";
/// Endpoint for external events (spam reports, preloader purge).
pub const EXTERNAL_EVENT_ACTION: &str = "/ajax/external-event.html";

/// 统计区间默认值（`current_stats`）
pub const DEFAULT_STATS_INTERVAL: u32 = 20;
/// Look-back window the API applies to `zone_ips` when `hours` is not sent.
pub const DEFAULT_ZONE_IPS_HOURS: u32 = 24;

/// Record types with an explicit wire mapping.
pub(crate) const RECORD_TYPE_MAP: &[(RecordType, &str)] =
    &[(RecordType::A, "A"), (RecordType::Cname, "CNAME")];

/// Cloudflare DNS Driver
///
/// Always handed out as `Arc<CloudflareDriver>`; records created through it
/// keep a weak back-reference to the same instance.
pub struct CloudflareDriver {
    pub(crate) connection: Connection,
    pub(crate) this: Weak<CloudflareDriver>,
}

impl std::fmt::Debug for CloudflareDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareDriver")
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}

impl CloudflareDriver {
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Arc<Self> {
        Self::builder(user_id, api_key).build()
    }

    pub fn builder(
        user_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> CloudflareDriverBuilder {
        CloudflareDriverBuilder {
            user_id: user_id.into(),
            api_key: api_key.into(),
            base_url: CF_API_BASE.to_string(),
            unavailable: UnavailablePolicy::default(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

/// Builder for [`CloudflareDriver`].
#[derive(Debug, Clone)]
pub struct CloudflareDriverBuilder {
    user_id: String,
    api_key: String,
    base_url: String,
    unavailable: UnavailablePolicy,
}

impl CloudflareDriverBuilder {
    /// Override the API host (scheme + authority, no trailing slash).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Treat HTTP 503 as [`ProviderError::ServiceUnavailable`](crate::ProviderError::ServiceUnavailable)
    /// instead of passing the body through.
    #[must_use]
    pub fn strict_unavailable(mut self, strict: bool) -> Self {
        self.unavailable = if strict {
            UnavailablePolicy::Error
        } else {
            UnavailablePolicy::PassThrough
        };
        self
    }

    pub fn build(self) -> Arc<CloudflareDriver> {
        let connection = Connection::new(
            create_http_client(),
            self.base_url,
            self.user_id,
            self.api_key,
            self.unavailable,
        );
        Arc::new_cyclic(|this| CloudflareDriver {
            connection,
            this: this.clone(),
        })
    }
}
