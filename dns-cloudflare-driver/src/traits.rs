use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CreateRecordRequest, ProviderMetadata, Record, RecordType, UpdateRecordRequest, Zone,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub status: u16,
    /// 错误码（`err_code` 字段）
    pub code: String,
    /// 原始错误消息（`msg` 字段）
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Driver 实现此 trait 以将原始响应映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::ApiError {
            provider: self.provider_name().to_string(),
            status: raw.status,
            err_code: raw.code,
            err_msg: raw.message,
        }
    }

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：客户端参数校验失败
    fn invalid_input(&self, message: impl Into<String>) -> ProviderError {
        ProviderError::invalid_input(self.provider_name(), message)
    }
}

/// Generic DNS driver contract.
///
/// Account-level operations specific to one provider live on the concrete
/// driver type; this trait only covers what generic client code relies on.
#[async_trait]
pub trait DnsDriver: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取 Driver 元数据（类型级别）
    ///
    /// 此方法不需要实例，可以在创建 Driver 之前调用。
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Record types the driver maps explicitly.
    fn list_record_types(&self) -> Vec<RecordType>;

    /// 创建 DNS 记录
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<Record>;

    /// 更新 DNS 记录，返回提供商是否接受了请求
    async fn update_record(&self, record: &Record, req: &UpdateRecordRequest) -> Result<bool>;

    /// 删除 DNS 记录
    async fn delete_record(&self, zone: &Zone, record_name: &str) -> Result<bool>;
}
