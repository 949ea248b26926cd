//! Wizard data fetch: trait plus the HTTP implementation

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::WizardData;
use crate::config::Config;
use crate::error::ApiError;

const SOURCE_NAME: &str = "wizard";

/// Fetches the wizard data snapshot for a client id. One call per wizard
/// open; the caller may refetch by opening a new session.
#[async_trait]
pub trait WizardDataFetcher: Send + Sync {
    async fn fetch(&self, client_id: &str) -> Result<WizardData, ApiError>;
}

/// Wizard data fetcher over HTTP, against the internal connectivity API
pub struct HttpWizardDataFetcher {
    api_url: String,
    client: Client,
}

impl HttpWizardDataFetcher {
    /// Create a fetcher for the given API base URL
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            client: Client::new(),
        }
    }

    /// Create from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.wizard.api_url.clone())
    }
}

#[async_trait]
impl WizardDataFetcher for HttpWizardDataFetcher {
    async fn fetch(&self, client_id: &str) -> Result<WizardData, ApiError> {
        let url = format!("{}/wizard/{}", self.api_url, client_id);
        debug!("Wizard data GET: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::network(SOURCE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return match status.as_u16() {
                401 => Err(ApiError::unauthorized(SOURCE_NAME)),
                403 => Err(ApiError::forbidden(SOURCE_NAME)),
                404 => Err(ApiError::http(
                    SOURCE_NAME,
                    404,
                    format!("Unknown client id: {}", client_id),
                )),
                _ => Err(ApiError::http(SOURCE_NAME, status.as_u16(), body)),
            };
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::http(SOURCE_NAME, 0, format!("Parse error: {}", e)))
    }
}
