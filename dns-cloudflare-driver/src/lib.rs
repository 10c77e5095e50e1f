//! # dns-cloudflare-driver
//!
//! Async client binding for the legacy CloudFlare client interface API
//! (`https://www.cloudflare.com/api_json.html`).
//!
//! The crate maps a small generic DNS model ([`Zone`], [`Record`],
//! [`RecordType`], the [`DnsDriver`] trait) onto the provider's query-string
//! request format, and exposes the account operations that fall outside that
//! model (security level, cache purge, IP allow/deny lists) as inherent
//! methods on [`CloudflareDriver`].
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! dns-cloudflare-driver = { version = "0.1", default-features = false, features = ["rustls"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_cloudflare_driver::{
//!     CloudflareDriver, CreateRecordRequest, DnsDriver, RecordExtra, RecordType, Zone,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = CloudflareDriver::new("ops@example.com", "your-api-key");
//!
//!     // Account operations
//!     driver.set_security_level("example.com", "med").await?;
//!     let purged_at = driver.purge_cache("example.com").await?;
//!     println!("cache purged at {purged_at}");
//!
//!     // Generic record operations
//!     let record = driver
//!         .create_record(&CreateRecordRequest {
//!             name: "www".to_string(),
//!             zone: Zone::new("example.com"),
//!             record_type: RecordType::A,
//!             data: "192.0.2.10".to_string(),
//!             extra: RecordExtra { service_mode: Some(1) },
//!         })
//!         .await?;
//!
//!     // The record remembers which driver created it
//!     record.delete().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`] — HTTP 401
//! - [`ProviderError::ApiError`] — the API rejected the call (`err_code`, `msg`);
//!   client-side validation uses the same variant with `E_INVLDINPUT`
//! - [`ProviderError::MalformedResponse`] — an error body that is not JSON
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`] — transport
//!
//! HTTP 503 is not an error by default: the response is passed through and
//! bool-returning operations report `false`. Use
//! [`CloudflareDriverBuilder::strict_unavailable`] to turn it into
//! [`ProviderError::ServiceUnavailable`]. Nothing is retried.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{INVALID_INPUT_CODE, ProviderError, Result};

// Re-export factory functions
pub use factory::{create_driver, create_driver_by_name, get_all_driver_metadata};

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsDriver;

// Re-export types
pub use types::{
    CreateRecordRequest, CredentialValidationError, FieldType, ProviderCredentialField,
    ProviderCredentials, ProviderMetadata, ProviderType, Record, RecordExtra, RecordType,
    UpdateRecordRequest, Zone,
};

// Re-export utils module
pub use utils::datetime;

// Re-export the concrete driver
pub use providers::{
    API_ACTION, ActionParams, ApiEnvelope, ApiResponse, CF_API_BASE, CacheLevel,
    CloudflareDriver, CloudflareDriverBuilder, Connection, DEFAULT_STATS_INTERVAL,
    DEFAULT_ZONE_IPS_HOURS, EXTERNAL_EVENT_ACTION, RequestOptions, SecurityLevel, StatusClass,
    UnavailablePolicy, ZoneIpsOptions,
};
