use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::traits::DnsDriver;

// ============ Provider Types ============

/// Identifies which DNS driver implementation to use.
///
/// Drivers register under the lowercase name returned by [`Display`](std::fmt::Display),
/// so generic code can select one by string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Cloudflare client interface API (`api_json.html`).
    Cloudflare,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cloudflare => write!(f, "cloudflare"),
        }
    }
}

impl std::str::FromStr for ProviderType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloudflare" => Ok(Self::Cloudflare),
            other => Err(ProviderError::invalid_input(
                "registry",
                format!("Unknown provider: {other}"),
            )),
        }
    }
}

// ============ Zone / Record Types ============

/// A DNS zone managed by the account.
///
/// The driver never creates or deletes zones; a `Zone` only names the zone
/// that record operations target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-specific zone identifier (the legacy API keys zones by domain).
    pub id: String,
    /// Domain name (e.g., `"example.com"`).
    pub domain: String,
}

impl Zone {
    /// A zone whose identifier is also its domain name.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            domain: id.clone(),
            id,
        }
    }
}

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
/// The set is closed: other kinds such as `SPF` or `LOC` cannot be sent and
/// are rejected by [`FromStr`](std::str::FromStr) with `E_INVLDINPUT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl RecordType {
    /// Wire representation of the record type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "SRV" => Ok(Self::Srv),
            "CAA" => Ok(Self::Caa),
            _ => Err(ProviderError::invalid_input(
                "registry",
                format!("Unsupported record type: {s}"),
            )),
        }
    }
}

/// Provider-specific record metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordExtra {
    /// Per-record proxy toggle, sent to the API as an integer flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_mode: Option<i64>,
}

/// A DNS record within a zone.
///
/// Records built by a driver keep a non-owning reference to it, so follow-up
/// operations such as [`delete`](Self::delete) go to the same driver instance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Provider record identifier, when the API returned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Record name (e.g., `"www"`).
    pub name: String,
    /// Zone the record belongs to.
    pub zone: Zone,
    /// Record type.
    pub record_type: RecordType,
    /// Record content (address, target host, text...).
    pub data: String,
    /// Provider-specific metadata.
    pub extra: RecordExtra,
    #[serde(skip)]
    driver: Option<Weak<dyn DnsDriver>>,
}

impl Record {
    /// A detached record, not bound to any driver.
    pub fn new(
        name: impl Into<String>,
        zone: Zone,
        record_type: RecordType,
        data: impl Into<String>,
        extra: RecordExtra,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            zone,
            record_type,
            data: data.into(),
            extra,
            driver: None,
        }
    }

    /// Bind the record to the driver that manages it.
    #[must_use]
    pub fn with_driver(mut self, driver: Weak<dyn DnsDriver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// The driver this record came from, if it is still alive.
    pub fn driver(&self) -> Option<Arc<dyn DnsDriver>> {
        self.driver.as_ref().and_then(Weak::upgrade)
    }

    /// Delete this record through the driver that produced it.
    pub async fn delete(&self) -> Result<bool> {
        let driver = self.driver().ok_or_else(|| {
            ProviderError::invalid_input(
                "registry",
                format!("Record '{}' is not bound to a live driver", self.name),
            )
        })?;
        driver.delete_record(&self.zone, &self.name).await
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.zone == other.zone
            && self.record_type == other.record_type
            && self.data == other.data
            && self.extra == other.extra
    }
}

/// Request to create a new DNS record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// Record name (e.g., `"www"`).
    pub name: String,
    /// Zone to create the record in.
    pub zone: Zone,
    /// Record type.
    pub record_type: RecordType,
    /// Record content.
    pub data: String,
    /// Provider-specific metadata.
    #[serde(default)]
    pub extra: RecordExtra,
}

/// Request to update an existing DNS record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    /// New record name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New record type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    /// New record content.
    pub data: String,
    /// New provider-specific metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<RecordExtra>,
}

impl UpdateRecordRequest {
    /// Update only the record content.
    pub fn data(data: impl Into<String>) -> Self {
        Self {
            name: None,
            record_type: None,
            data: data.into(),
            extra: None,
        }
    }
}

// ============ Provider Metadata Types ============

/// The input type of a credential field (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single credential field required by a driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Machine-readable field key (e.g., `"apiKey"`).
    pub key: String,
    /// Human-readable label (e.g., `"API Key"`).
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Static metadata describing a DNS driver.
///
/// Obtain via [`DnsDriver::metadata()`](crate::DnsDriver::metadata) or
/// [`get_all_driver_metadata()`](crate::get_all_driver_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable driver name.
    pub name: String,
    /// Short description of the driver.
    pub description: String,
    /// Credential fields required to authenticate.
    pub required_fields: Vec<ProviderCredentialField>,
    /// Record types the driver maps explicitly.
    pub record_types: Vec<RecordType>,
}

// ============ Credential Types ============

/// Validation error for provider credentials.
///
/// Returned when credential fields are missing or empty.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    #[error("Missing required field: {label}")]
    MissingField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    #[error("Field must not be empty: {label}")]
    EmptyField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

/// Type-safe credential container for the supported drivers.
///
/// Serialized as a tagged enum with `"provider"` as the tag and `"credentials"` as the content:
///
/// ```json
/// { "provider": "cloudflare", "credentials": { "user_id": "...", "api_key": "..." } }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Cloudflare client API credentials.
    #[serde(rename = "cloudflare")]
    Cloudflare {
        /// Account e-mail address (`u`).
        user_id: String,
        /// Account API key (`tkn`).
        api_key: String,
    },
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cloudflare { user_id, .. } => f
                .debug_struct("Cloudflare")
                .field("user_id", user_id)
                .field("api_key", &"***")
                .finish(),
        }
    }
}

impl ProviderCredentials {
    /// Construct credentials from a `HashMap`, validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or empty.
    pub fn from_map(
        provider: ProviderType,
        map: &std::collections::HashMap<String, String>,
    ) -> std::result::Result<Self, CredentialValidationError> {
        match provider {
            ProviderType::Cloudflare => Ok(Self::Cloudflare {
                user_id: Self::get_required_field(provider, map, "userId", "Account Email")?,
                api_key: Self::get_required_field(provider, map, "apiKey", "API Key")?,
            }),
        }
    }

    /// Obtain required fields from `HashMap` and verify that it is not empty
    fn get_required_field(
        provider: ProviderType,
        map: &std::collections::HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> std::result::Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert credentials to a `HashMap` for flat key-value storage.
    pub fn to_map(&self) -> std::collections::HashMap<String, String> {
        match self {
            Self::Cloudflare { user_id, api_key } => [
                ("userId".to_string(), user_id.clone()),
                ("apiKey".to_string(), api_key.clone()),
            ]
            .into(),
        }
    }

    /// Returns the [`ProviderType`] corresponding to this credential variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::Cloudflare { .. } => ProviderType::Cloudflare,
        }
    }
}
