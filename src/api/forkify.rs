use super::{ApiPreview, ApiRecipe, Envelope, RecipeApi, RecipeData, SearchData};
use crate::config::BrowserConfig;
use crate::error::{BrowserError, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Race `request` against a timer. On expiry the request future is dropped and
/// whatever it would have produced is discarded.
pub async fn with_timeout<T, F>(duration: Duration, request: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(duration, request).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Request timed out after {:?}", duration);
            Err(BrowserError::Timeout(duration.as_secs()))
        }
    }
}

/// HTTP client for the forkify recipe API
pub struct ForkifyClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ForkifyClient {
    /// Create a client from configuration
    pub fn new(config: &BrowserConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; ForkifyBrowser/1.0)")
            .build()?;

        Ok(ForkifyClient {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: config.timeout_duration(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: Option<String>, timeout: Duration) -> Self {
        ForkifyClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        }
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        }
    }

    /// Send a request, racing the configured timeout, and decode the JSON body.
    /// Non-success statuses become [`BrowserError::Api`] with the body's message.
    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let request = self.with_key(request);
        with_timeout(self.timeout, async move {
            let response = request.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;

            let body: Value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes)?
            };
            debug!("{} {:?}", status, body);

            if !status.is_success() {
                let message = body["message"]
                    .as_str()
                    .or_else(|| status.canonical_reason())
                    .unwrap_or("Request failed")
                    .to_string();
                return Err(BrowserError::Api {
                    status: status.as_u16(),
                    message,
                });
            }
            Ok(body)
        })
        .await
    }
}

#[async_trait]
impl RecipeApi for ForkifyClient {
    async fn get_recipe(&self, id: &str) -> Result<ApiRecipe> {
        let url = format!("{}/{}", self.base_url, id);
        let body = self.send(self.client.get(url)).await?;
        let envelope: Envelope<RecipeData> = serde_json::from_value(body)?;
        Ok(envelope.data.recipe)
    }

    async fn search(&self, query: &str) -> Result<Vec<ApiPreview>> {
        let request = self.client.get(&self.base_url).query(&[("search", query)]);
        let body = self.send(request).await?;
        let envelope: Envelope<SearchData> = serde_json::from_value(body)?;
        Ok(envelope.data.recipes)
    }

    async fn create_recipe(&self, recipe: &ApiRecipe) -> Result<ApiRecipe> {
        let request = self.client.post(&self.base_url).json(recipe);
        let body = self.send(request).await?;
        let envelope: Envelope<RecipeData> = serde_json::from_value(body)?;
        Ok(envelope.data.recipe)
    }

    async fn delete_recipe(&self, id: &str) -> Result<()> {
        let url = format!("{}/{}", self.base_url, id);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
