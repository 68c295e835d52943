//! Registry client for install requests.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;
use ztools_core::{
    PackageRequest, RegistryClient, RegistryConfig, RegistryError, RegistryResult, RequestHandle,
    RequestStatus,
};

use crate::auth::TokenProvider;
use crate::types::{StatusResponse, SubmitRequest, SubmitResponse};

mod helpers;
mod http;

use http::HttpBackend;

pub const REGISTRY_USER_AGENT: &str = concat!("ztools-registry/", env!("CARGO_PKG_VERSION"));

/// Registry client speaking the install-request protocol over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
    http: HttpBackend,
}

impl HttpRegistryClient {
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        let token_provider = config
            .token
            .as_ref()
            .map(TokenProvider::static_token)
            .unwrap_or_else(TokenProvider::from_env);

        Self::with_token_provider(config, token_provider)
    }

    pub fn with_token_provider(
        config: RegistryConfig,
        token_provider: TokenProvider,
    ) -> RegistryResult<Self> {
        if config.url.trim().is_empty() {
            return Err(RegistryError::Config {
                message: "registry url is empty".to_string(),
            });
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(REGISTRY_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| RegistryError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http: HttpBackend {
                client,
                base_url: config.url.trim_end_matches('/').to_string(),
                token_provider,
            },
        })
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.token_provider.is_authenticated()
    }

    fn requests_url(&self) -> String {
        format!("{}/requests", self.http.base_url)
    }

    /// Status URL of a request; the server-issued id is encoded as one path segment.
    fn request_url(&self, handle: &RequestHandle) -> RegistryResult<String> {
        let mut url = url::Url::parse(&self.requests_url()).map_err(|e| RegistryError::Config {
            message: format!("invalid registry URL {}: {}", self.http.base_url, e),
        })?;
        url.path_segments_mut()
            .map_err(|()| RegistryError::Config {
                message: format!("registry URL {} cannot carry a path", self.http.base_url),
            })?
            .push(&handle.0);
        Ok(url.into())
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn submit(&self, request: &PackageRequest) -> RegistryResult<RequestHandle> {
        let url = self.requests_url();
        debug!(url = %url, package = %request, "submitting install request");

        let body = SubmitRequest {
            package: request.as_str().to_string(),
        };
        let response = self
            .http
            .post_json(&url, &body)
            .await
            .map_err(|e| match e {
                RegistryError::RequestNotFound { .. } => RegistryError::Config {
                    message: format!("no install endpoint at {}", url),
                },
                e => e,
            })?;
        let submitted: SubmitResponse =
            response
                .json()
                .await
                .map_err(|e| RegistryError::InvalidResponse {
                    message: format!("failed to parse submit response: {}", e),
                })?;

        Ok(RequestHandle(submitted.id))
    }

    async fn poll(&self, handle: &RequestHandle) -> RegistryResult<RequestStatus> {
        let url = self.request_url(handle)?;

        let response = self.http.get(&url).await?;
        let status: StatusResponse =
            response
                .json()
                .await
                .map_err(|e| RegistryError::InvalidResponse {
                    message: format!("failed to parse request status: {}", e),
                })?;

        Ok(status.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = RegistryConfig::default().with_url("http://registry.local/v1/");
        let client = HttpRegistryClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://registry.local/v1");
        assert_eq!(client.requests_url(), "http://registry.local/v1/requests");
        assert_eq!(
            client.request_url(&RequestHandle("42".to_string())).unwrap(),
            "http://registry.local/v1/requests/42"
        );
    }

    #[test]
    fn test_request_id_is_one_path_segment() {
        let config = RegistryConfig::default().with_url("http://registry.local/v1");
        let client = HttpRegistryClient::new(config).unwrap();

        let url = client
            .request_url(&RequestHandle("a/../b?c#d".to_string()))
            .unwrap();

        assert_eq!(url, "http://registry.local/v1/requests/a%2F..%2Fb%3Fc%23d");
    }

    #[test]
    fn test_config_token_wins() {
        let config = RegistryConfig::default().with_token("from-config");
        let client = HttpRegistryClient::new(config).unwrap();
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_empty_url_rejected() {
        let config = RegistryConfig::default().with_url("  ");
        let err = HttpRegistryClient::new(config).unwrap_err();
        assert!(matches!(err, RegistryError::Config { .. }));
    }
}
