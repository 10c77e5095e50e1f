//! Cloudflare error mapping

use crate::traits::ProviderErrorMapper;

use super::{CloudflareDriver, PROVIDER_NAME};

/// The client API reports failures as `{err_code, msg}` with no stable code
/// list, so the default [`map_error`](ProviderErrorMapper::map_error) keeps
/// both verbatim.
impl ProviderErrorMapper for CloudflareDriver {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::traits::RawApiError;

    #[test]
    fn provider_name_is_cloudflare() {
        let driver = CloudflareDriver::new("u", "k");
        assert_eq!(driver.provider_name(), "cloudflare");
    }

    #[test]
    fn map_error_keeps_code_and_message() {
        let driver = CloudflareDriver::new("u", "k");
        let err = driver.map_error(RawApiError::new(200, "E_UNAUTH", "Invalid zone"));
        assert!(matches!(
            err,
            ProviderError::ApiError { provider, status: 200, err_code, err_msg }
                if provider == "cloudflare" && err_code == "E_UNAUTH" && err_msg == "Invalid zone"
        ));
    }

    #[test]
    fn invalid_input_shape() {
        let driver = CloudflareDriver::new("u", "k");
        let err = driver.invalid_input("Mode must be boolean");
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "[cloudflare] Error: E_INVLDINPUT: Mode must be boolean (HTTP 400)"
        );
    }

    #[test]
    fn parse_error_shape() {
        let driver = CloudflareDriver::new("u", "k");
        assert!(matches!(
            driver.parse_error("missing field"),
            ProviderError::ParseError { detail, .. } if detail == "missing field"
        ));
    }
}
