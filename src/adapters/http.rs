use crate::domain::model::Plan;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{CompareError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Catalog served as a JSON array over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    endpoint: String,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_all(&self) -> Result<Vec<Plan>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(CompareError::HttpStatusError {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        // Decode from bytes so a malformed body surfaces as a JSON error
        let body = response.bytes().await?;
        let plans: Vec<Plan> = serde_json::from_slice(&body)?;
        Ok(plans)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
