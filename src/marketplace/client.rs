//! HTTP client for the web marketplace listing API

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{AppPage, WebMarketplaceApi};
use crate::config::Config;
use crate::error::ApiError;

const SOURCE_NAME: &str = "marketplace";
const TOKEN_ENV_VAR: &str = "APPCONNECT_MARKETPLACE_TOKEN";

/// Marketplace API client over HTTP
pub struct WebMarketplaceClient {
    api_url: String,
    token: String,
    client: Client,
}

impl WebMarketplaceClient {
    /// Create a new client for the given API base URL and bearer token
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Create from configuration, reading the token from
    /// `APPCONNECT_MARKETPLACE_TOKEN`
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(token) if !token.is_empty() => {
                Ok(Self::new(config.marketplace.api_url.clone(), token))
            }
            _ => Err(ApiError::not_configured(SOURCE_NAME)),
        }
    }
}

#[async_trait]
impl WebMarketplaceApi for WebMarketplaceClient {
    async fn get_apps(&self, offset: usize, limit: usize) -> Result<AppPage, ApiError> {
        let url = format!(
            "{}/v1/extensions?offset={}&limit={}",
            self.api_url, offset, limit
        );
        debug!("Marketplace GET: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::network(SOURCE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            let body = response.text().await.unwrap_or_default();
            return match status.as_u16() {
                401 => Err(ApiError::unauthorized(SOURCE_NAME)),
                403 => Err(ApiError::forbidden(SOURCE_NAME)),
                429 => Err(ApiError::rate_limited(SOURCE_NAME, retry_after)),
                _ => Err(ApiError::http(SOURCE_NAME, status.as_u16(), body)),
            };
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::http(SOURCE_NAME, 0, format!("Parse error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_apps_parses_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/extensions?offset=0&limit=2")
            .match_header("Authorization", "Bearer secret")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                r#"{
                    "items": [
                        {
                            "id": "app-1",
                            "name": "First App",
                            "logo": "https://m.test/1.png",
                            "author": "Vendor",
                            "partner": null,
                            "description": "An app",
                            "url": "https://m.test/apps/app-1",
                            "categories": ["ecommerce"],
                            "certified": true,
                            "activate_url": "https://a.test/activate",
                            "callback_url": "https://a.test/callback"
                        }
                    ],
                    "limit": 2,
                    "total": 7
                }"#,
            )
            .create_async()
            .await;

        let client = WebMarketplaceClient::new(server.url(), "secret");
        let page = client.get_apps(0, 2).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.limit, 2);
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "app-1");
        assert!(page.items[0].certified);
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/extensions?offset=0&limit=10")
            .with_status(401)
            .create_async()
            .await;

        let client = WebMarketplaceClient::new(server.url(), "expired");
        let err = client.get_apps(0, 10).await.unwrap_err();
        assert!(err.is_auth_error());
    }

    #[tokio::test]
    async fn test_rate_limited_carries_retry_after() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/extensions?offset=0&limit=10")
            .with_status(429)
            .with_header("Retry-After", "42")
            .create_async()
            .await;

        let client = WebMarketplaceClient::new(server.url(), "secret");
        let err = client.get_apps(0, 10).await.unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after(), Some(42));
    }

    #[tokio::test]
    async fn test_malformed_body_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/extensions?offset=0&limit=10")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = WebMarketplaceClient::new(server.url(), "secret");
        let err = client.get_apps(0, 10).await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 0, .. }));
    }
}
