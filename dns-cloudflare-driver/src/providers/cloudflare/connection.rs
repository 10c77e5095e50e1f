//! Cloudflare HTTP 连接
//!
//! Adds the account credentials (`u`, `tkn`) to every request and sends the
//! action parameters as a query string on the fixed API host.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::Client;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::utils::log_sanitizer::mask_query_params;

use super::PROVIDER_NAME;
use super::response::{ApiResponse, UnavailablePolicy};
use super::types::{ActionParams, RequestOptions};

const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Query keys whose values must never be logged.
const SECRET_PARAMS: &[&str] = &["tkn"];

/// Authenticated connection to the client API.
#[derive(Clone)]
pub struct Connection {
    client: Client,
    base_url: String,
    user_id: String,
    api_key: String,
    unavailable: UnavailablePolicy,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("user_id", &self.user_id)
            .field("api_key", &"***")
            .field("unavailable", &self.unavailable)
            .finish_non_exhaustive()
    }
}

impl Connection {
    pub(crate) fn new(
        client: Client,
        base_url: String,
        user_id: String,
        api_key: String,
        unavailable: UnavailablePolicy,
    ) -> Self {
        Self {
            client,
            base_url,
            user_id,
            api_key,
            unavailable,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn unavailable_policy(&self) -> UnavailablePolicy {
        self.unavailable
    }

    /// POST `params` to `action` with the default options.
    pub async fn request(&self, action: &str, params: ActionParams) -> Result<ApiResponse> {
        self.request_with(action, params, RequestOptions::default())
            .await
    }

    /// Send `params` to `action`.
    ///
    /// Returns the classified response: either a success, or a 503 body passed
    /// through under [`UnavailablePolicy::PassThrough`].
    pub async fn request_with(
        &self,
        action: &str,
        params: ActionParams,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let params = self.add_auth(params);
        let query = params.to_query_string();
        let url = format!("{}{action}?{query}", self.base_url);
        let url_for_log = format!(
            "{}{action}?{}",
            self.base_url,
            mask_query_params(&query, SECRET_PARAMS)
        );

        let headers = options.headers.unwrap_or_else(Self::default_headers);
        let method_name = options.method.to_string();
        let request = self
            .client
            .request(options.method, &url)
            .headers(headers)
            .body(options.data);

        let (status, body) =
            HttpUtils::execute_request(request, PROVIDER_NAME, &method_name, &url_for_log).await?;

        ApiResponse::new(status, body).classify(self.unavailable)
    }

    fn add_auth(&self, mut params: ActionParams) -> ActionParams {
        params.insert("u", &self.user_id);
        params.insert("tkn", &self.api_key);
        params
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        headers
    }
}
