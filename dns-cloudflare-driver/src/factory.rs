//! Driver factory functions and metadata.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::providers::CloudflareDriver;
use crate::traits::DnsDriver;
use crate::types::{ProviderCredentials, ProviderMetadata, ProviderType};

/// Creates a [`DnsDriver`] instance from the given credentials.
///
/// The concrete driver is determined by the [`ProviderCredentials`] variant.
/// The returned driver is wrapped in `Arc<dyn DnsDriver>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_cloudflare_driver::{create_driver, DnsDriver, ProviderCredentials};
///
/// let driver = create_driver(ProviderCredentials::Cloudflare {
///     user_id: "ops@example.com".to_string(),
///     api_key: "your-key".to_string(),
/// }).unwrap();
/// assert_eq!(driver.id(), "cloudflare");
/// ```
pub fn create_driver(credentials: ProviderCredentials) -> Result<Arc<dyn DnsDriver>> {
    match credentials {
        ProviderCredentials::Cloudflare { user_id, api_key } => {
            Ok(CloudflareDriver::new(user_id, api_key))
        }
    }
}

/// Creates a driver from a provider name and a flat credential map.
///
/// `name` is matched case-insensitively against [`ProviderType`]; the map is
/// validated with [`ProviderCredentials::from_map`].
pub fn create_driver_by_name(
    name: &str,
    credentials: &HashMap<String, String>,
) -> Result<Arc<dyn DnsDriver>> {
    let provider: ProviderType = name.parse()?;
    let credentials = ProviderCredentials::from_map(provider, credentials)
        .map_err(|e| ProviderError::invalid_input(&provider.to_string(), e.to_string()))?;
    create_driver(credentials)
}

/// Returns metadata for every available driver.
///
/// Useful for building dynamic UIs that enumerate drivers and their
/// required credential fields.
pub fn get_all_driver_metadata() -> Vec<ProviderMetadata> {
    vec![CloudflareDriver::metadata()]
}
