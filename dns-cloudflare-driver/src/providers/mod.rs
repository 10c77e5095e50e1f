//! DNS driver implementations

/// Shared utilities used by driver implementations.
pub mod common;

mod cloudflare;

pub use cloudflare::{
    API_ACTION, ActionParams, ApiEnvelope, ApiResponse, CF_API_BASE, CacheLevel,
    CloudflareDriver, CloudflareDriverBuilder, Connection, DEFAULT_STATS_INTERVAL,
    DEFAULT_ZONE_IPS_HOURS, EXTERNAL_EVENT_ACTION, RequestOptions, SecurityLevel, StatusClass,
    UnavailablePolicy, ZoneIpsOptions,
};
