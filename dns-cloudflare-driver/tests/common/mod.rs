//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use dns_cloudflare_driver::{
    CloudflareDriver, CreateRecordRequest, DnsDriver, Record, RecordExtra, RecordType, Zone,
};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TEST_USER: &str = "ops@example.com";
pub const TEST_KEY: &str = "k-test-123";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ============ Mock API ============

/// `{"result": "success", "response": <response>}`
pub fn success(response: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "result": "success",
        "response": response,
    }))
}

/// Provider-side failure envelope with the given HTTP status.
pub fn api_error(status: u16, err_code: &str, msg: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "result": "error",
        "err_code": err_code,
        "msg": msg,
    }))
}

/// 本地 mock 服务器 + 指向它的 Driver
pub struct MockApi {
    pub server: MockServer,
    pub driver: Arc<CloudflareDriver>,
}

impl MockApi {
    pub async fn start() -> Self {
        Self::start_with(false).await
    }

    pub async fn start_strict() -> Self {
        Self::start_with(true).await
    }

    async fn start_with(strict: bool) -> Self {
        let server = MockServer::start().await;
        let driver = CloudflareDriver::builder(TEST_USER, TEST_KEY)
            .base_url(server.uri())
            .strict_unavailable(strict)
            .build();
        Self { server, driver }
    }

    /// Expect exactly one authenticated POST to `endpoint` with `a=<action>`.
    pub async fn expect_action(&self, endpoint: &str, action: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .and(query_param("a", action))
            .and(query_param("u", TEST_USER))
            .and(query_param("tkn", TEST_KEY))
            .respond_with(response)
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Respond to any request on any path; used to count stray requests.
    pub async fn expect_no_requests(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Query parameters of every request the server has seen.
    pub async fn received_queries(&self) -> Vec<HashMap<String, String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(query_map)
            .collect()
    }
}

/// Decode a request's query string into a map.
pub fn query_map(request: &Request) -> HashMap<String, String> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// ============ Live API ============

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    format!("_test-{}", chrono::Utc::now().timestamp_millis())
}

/// 测试上下文 - 封装 Driver 和测试域名
pub struct TestContext {
    pub driver: Arc<CloudflareDriver>,
    pub zone: Zone,
}

impl TestContext {
    /// 创建 Cloudflare 测试上下文
    pub fn cloudflare() -> Option<Self> {
        let user_id = env::var("CLOUDFLARE_USER_ID").ok()?;
        let api_key = env::var("CLOUDFLARE_API_KEY").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        Some(Self {
            driver: CloudflareDriver::new(user_id, api_key),
            zone: Zone::new(domain),
        })
    }

    /// 创建测试记录并返回创建的记录
    pub async fn create_test_record(&self, record_type: RecordType, data: &str) -> Option<Record> {
        let request = CreateRecordRequest {
            name: generate_test_record_name(),
            zone: self.zone.clone(),
            record_type,
            data: data.to_string(),
            extra: RecordExtra {
                service_mode: Some(0),
            },
        };

        self.driver.create_record(&request).await.ok()
    }

    /// 清理测试记录
    pub async fn cleanup_record(&self, record: &Record) {
        let _ = self.driver.delete_record(&self.zone, &record.name).await;
    }
}
