//! Cloudflare DnsDriver trait 实现

use std::sync::Weak;

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{DnsDriver, ProviderErrorMapper};
use crate::types::{
    CreateRecordRequest, FieldType, ProviderCredentialField, ProviderMetadata, ProviderType,
    Record, RecordType, UpdateRecordRequest, Zone,
};

use super::{API_ACTION, CloudflareDriver, PROVIDER_NAME, RECORD_TYPE_MAP};
use super::types::ActionParams;

impl CloudflareDriver {
    /// Wire name of a record type. Unmapped types pass through as-is.
    pub(crate) fn record_type_to_wire(record_type: RecordType) -> &'static str {
        RECORD_TYPE_MAP
            .iter()
            .find(|(t, _)| *t == record_type)
            .map_or_else(|| record_type.as_str(), |(_, wire)| *wire)
    }

    /// 当前实例的弱引用（供 Record 回指）
    fn weak_self(&self) -> Weak<dyn DnsDriver> {
        self.this.clone()
    }
}

#[async_trait]
impl DnsDriver for CloudflareDriver {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Cloudflare,
            name: "CloudFlare DNS".to_string(),
            description: "CloudFlare client interface API (api_json.html)".to_string(),
            required_fields: vec![
                ProviderCredentialField {
                    key: "userId".to_string(),
                    label: "Account Email".to_string(),
                    field_type: FieldType::Text,
                    help_text: Some("The e-mail address of the CloudFlare account".to_string()),
                },
                ProviderCredentialField {
                    key: "apiKey".to_string(),
                    label: "API Key".to_string(),
                    field_type: FieldType::Password,
                    help_text: Some("Found under My Account > API Key".to_string()),
                },
            ],
            record_types: RECORD_TYPE_MAP.iter().map(|(t, _)| *t).collect(),
        }
    }

    fn list_record_types(&self) -> Vec<RecordType> {
        RECORD_TYPE_MAP.iter().map(|(t, _)| *t).collect()
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<Record> {
        let service_mode = req
            .extra
            .service_mode
            .ok_or_else(|| self.invalid_input("extra.service_mode must be an integer"))?;

        let params = ActionParams::action("rec_set")
            .with("name", &req.name)
            .with("zone", &req.zone.id)
            .with("type", Self::record_type_to_wire(req.record_type))
            .with("content", &req.data)
            .with("service_mode", service_mode);

        let response = self.connection.request(API_ACTION, params).await?;
        response.ensure_ok()?;

        let mut record = Record::new(
            req.name.clone(),
            req.zone.clone(),
            req.record_type,
            req.data.clone(),
            req.extra.clone(),
        )
        .with_driver(self.weak_self());

        // rec_set 通常不返回记录 ID；有则带上
        if let Some(rec_id) = response
            .response_object()
            .ok()
            .and_then(|r| r.pointer("/rec/obj/rec_id").cloned())
        {
            record.id = Some(match rec_id {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });
        }

        Ok(record)
    }

    async fn update_record(&self, record: &Record, req: &UpdateRecordRequest) -> Result<bool> {
        if req.name.is_some() || req.record_type.is_some() || req.extra.is_some() {
            log::warn!(
                "[{PROVIDER_NAME}] update_record only sends new data; name/type/extra are ignored"
            );
        }

        let params = ActionParams::action("DIUP")
            .with("hosts", &record.name)
            .with("ip", &req.data);
        Ok(self
            .connection
            .request(API_ACTION, params)
            .await?
            .is_ok())
    }

    async fn delete_record(&self, zone: &Zone, record_name: &str) -> Result<bool> {
        let params = ActionParams::action("rec_del")
            .with("zone", &zone.id)
            .with("name", record_name);
        Ok(self
            .connection
            .request(API_ACTION, params)
            .await?
            .is_ok())
    }
}
