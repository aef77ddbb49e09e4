use async_trait::async_trait;
use log::error;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde_json::Value;

use super::SearchClient;
use crate::error::ChainError;

/// Product search client. The API takes the query and page number as
/// query-string parameters on a bodyless POST.
pub struct ProductSearchClient {
    http: HttpClient,
    endpoint: String,
}

impl ProductSearchClient {
    pub fn new(endpoint: String) -> Result<Self, ChainError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ChainError::Internal(format!("Failed to build search client: {}", e)))?;

        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl SearchClient for ProductSearchClient {
    async fn search(&self, query: &str) -> Result<Value, ChainError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .query(&[("query", query), ("page", "1")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // The raw body stays in the logs; the caller only sees the status.
            let body = resp.text().await.unwrap_or_default();
            error!("Product search returned {}: {}", status, body);
            return Err(ChainError::Search {
                status: status.as_u16(),
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}
