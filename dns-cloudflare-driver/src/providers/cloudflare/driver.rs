//! Cloudflare 账户级操作
//!
//! Operations outside the generic record model: statistics, zone settings,
//! cache control and IP allow/deny lists.

use serde_json::Value;

use crate::error::Result;
use crate::traits::ProviderErrorMapper;
use crate::utils::datetime::ctime_from_value;

use super::response::ApiResponse;
use super::types::{ActionParams, CacheLevel, SecurityLevel, ZoneIpsOptions};
use super::{API_ACTION, CloudflareDriver, DEFAULT_STATS_INTERVAL, EXTERNAL_EVENT_ACTION};

impl CloudflareDriver {
    /// 发送到 JSON 端点
    async fn api_call(&self, params: ActionParams) -> Result<ApiResponse> {
        self.connection.request(API_ACTION, params).await
    }

    /// 发送到外部事件端点
    async fn external_event(&self, params: ActionParams) -> Result<ApiResponse> {
        self.connection.request(EXTERNAL_EVENT_ACTION, params).await
    }

    /// Convert a `response.<field>` timestamp into ctime text.
    fn ctime_field(&self, response: &ApiResponse, field: &str) -> Result<String> {
        let value = response.response_field(field)?;
        ctime_from_value(&value).ok_or_else(|| {
            self.parse_error(format!("'response.{field}' is not a timestamp: {value}"))
        })
    }

    /// Traffic statistics for a zone.
    ///
    /// `interval` selects the reporting window; `None` uses
    /// [`DEFAULT_STATS_INTERVAL`]. Returns `response.result`.
    pub async fn current_stats(&self, zone_id: &str, interval: Option<u32>) -> Result<Value> {
        let params = ActionParams::action("stats")
            .with("z", zone_id)
            .with("interval", interval.unwrap_or(DEFAULT_STATS_INTERVAL));
        self.api_call(params).await?.response_field("result")
    }

    /// Set the basic security level (`high`, `med`, `low`, `eoff`).
    ///
    /// Unknown levels fail with `E_INVLDINPUT` before any request is sent.
    pub async fn set_security_level(&self, zone_id: &str, level: &str) -> Result<bool> {
        let level: SecurityLevel = level.parse()?;
        let params = ActionParams::action("sec_lvl")
            .with("z", zone_id)
            .with("v", level.as_str());
        Ok(self.api_call(params).await?.is_ok())
    }

    /// Set the cache level (`agg`, `basic`).
    ///
    /// Unknown levels fail with `E_INVLDINPUT` before any request is sent.
    pub async fn set_cache_level(&self, zone_id: &str, level: &str) -> Result<bool> {
        let level: CacheLevel = level.parse()?;
        let params = ActionParams::action("cache_lvl")
            .with("z", zone_id)
            .with("v", level.as_str());
        Ok(self.api_call(params).await?.is_ok())
    }

    /// Toggle development mode; returns when it expires, as ctime text.
    pub async fn set_development_mode(&self, zone_id: &str, mode: bool) -> Result<String> {
        let params = ActionParams::action("devmode")
            .with("z", zone_id)
            .with("v", u8::from(mode));
        let response = self.api_call(params).await?;
        response.ensure_ok()?;
        self.ctime_field(&response, "expires_on")
    }

    /// Purge the zone's cache; returns the purge time as ctime text.
    pub async fn purge_cache(&self, zone_id: &str) -> Result<String> {
        let params = ActionParams::action("fpurge_ts")
            .with("z", zone_id)
            .with("v", 1);
        let response = self.api_call(params).await?;
        self.ctime_field(&response, "fpurge_ts")
    }

    /// Purge the preloader cache (external event endpoint).
    pub async fn purge_preloader_cache(&self, zone_id: &str) -> Result<bool> {
        let params = ActionParams::action("pre_purge").with("zone_name", zone_id);
        Ok(self.external_event(params).await?.is_ok())
    }

    /// Check zones against the account; returns `response.zones`.
    ///
    /// Zones are sent comma-joined in a single `zones` parameter.
    pub async fn zone_check<S: AsRef<str>>(&self, zones: &[S]) -> Result<Value> {
        let zones = zones.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(",");
        let params = ActionParams::action("zone_check").with("zones", zones);
        self.api_call(params).await?.response_field("zones")
    }

    /// Recent visitor IPs for a zone; returns `response.ips`.
    ///
    /// Only the options that are set are transmitted.
    pub async fn zone_ips(&self, zone_id: &str, options: &ZoneIpsOptions) -> Result<Vec<Value>> {
        let mut params = ActionParams::action("zone_ips").with("zid", zone_id);
        options.apply(&mut params);
        match self.api_call(params).await?.response_field("ips")? {
            Value::Array(ips) => Ok(ips),
            other => Err(self.parse_error(format!("'response.ips' is not an array: {other}"))),
        }
    }

    /// Zone settings; returns `response.set`.
    pub async fn zone_grab(&self, zone_id: &str) -> Result<Value> {
        let params = ActionParams::action("zone_grab").with("z", zone_id);
        let response = self.api_call(params).await?;
        response.ensure_ok()?;
        response.response_field("set")
    }

    /// Report spam to the external event endpoint.
    ///
    /// `spam` is sent as its JSON text in `evnt_v`.
    pub async fn report_spam(&self, spam: &Value) -> Result<bool> {
        let params = ActionParams::new()
            .with("evnt_t", "CF_USER_SPAM")
            .with("evnt_v", spam);
        Ok(self.external_event(params).await?.is_ok())
    }

    /// Add an IP to the account allow list.
    pub async fn whitelist_ip(&self, ip: &str) -> Result<bool> {
        let params = ActionParams::action("wl").with("key", ip);
        Ok(self.api_call(params).await?.is_ok())
    }

    /// Add an IP to the account deny list.
    pub async fn blacklist_ip(&self, ip: &str) -> Result<bool> {
        let params = ActionParams::action("ban").with("key", ip);
        Ok(self.api_call(params).await?.is_ok())
    }

    /// Threat information for an IP; returns the whole `response` object.
    pub async fn ip_check(&self, ip: &str) -> Result<Value> {
        let params = ActionParams::action("ip_lkup").with("ip", ip);
        let response = self.api_call(params).await?;
        response.ensure_ok()?;
        response.response_object()
    }

    /// Enable or disable IPv6 support for a zone.
    pub async fn toggle_ipv6(&self, zone_id: &str, mode: bool) -> Result<bool> {
        let params = ActionParams::action("ipv46")
            .with("z", zone_id)
            .with("v", u8::from(mode));
        Ok(self.api_call(params).await?.is_ok())
    }
}
