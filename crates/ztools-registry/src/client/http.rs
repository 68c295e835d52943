//! HTTP layer: auth header and status mapping.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use tracing::debug;
use ztools_core::{RegistryError, RegistryResult};

use crate::auth::TokenProvider;

use super::helpers::{error_body_message, request_id_from_url};

/// HTTP backend for making requests (holds reqwest client and auth).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) token_provider: TokenProvider,
}

impl HttpBackend {
    pub(crate) async fn get(&self, url: &str) -> RegistryResult<reqwest::Response> {
        let request = self.client.get(url);
        self.send(request, url).await
    }

    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> RegistryResult<reqwest::Response> {
        let request = self.client.post(url).json(body);
        self.send(request, url).await
    }

    async fn send(
        &self,
        mut request: reqwest::RequestBuilder,
        url: &str,
    ) -> RegistryResult<reqwest::Response> {
        if let Some(token) = self.token_provider.token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|e| RegistryError::Network {
            message: e.to_string(),
        })?;
        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "registry response");

        match status.as_u16() {
            200..=299 => Ok(response),

            401 | 403 => Err(RegistryError::Unauthorized {
                message: "invalid or expired token".to_string(),
            }),

            404 => Err(RegistryError::RequestNotFound {
                request: request_id_from_url(url),
            }),

            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(RegistryError::Network {
                    message: format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        error_body_message(&body, &status.to_string())
                    ),
                })
            }
        }
    }
}
