use async_trait::async_trait;
use log::error;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde_json::{json, Value};

use super::ContentClient;
use crate::error::ChainError;

/// Contentful GraphQL client. The space id is part of the URL path; the
/// delivery token rides in the Authorization header on every request.
pub struct ContentfulClient {
    http: HttpClient,
    url: String,
}

impl ContentfulClient {
    pub fn new(endpoint: &str, space_id: &str, token: &str) -> Result<Self, ChainError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ChainError::Internal(format!("Invalid Contentful token: {}", e)))?,
        );

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ChainError::Internal(format!("Failed to build content client: {}", e)))?;

        Ok(Self {
            http,
            url: format!("{}/{}", endpoint.trim_end_matches('/'), space_id),
        })
    }
}

#[async_trait]
impl ContentClient for ContentfulClient {
    async fn query(
        &self,
        query: &str,
        slug: &str,
        search_results: &Value,
    ) -> Result<Value, ChainError> {
        let body = json!({
            "query": query,
            "variables": {
                "slug": slug,
                "preview": false,
                "searchResults": search_results,
            }
        });

        let resp = self.http.post(&self.url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("Content query returned {}: {}", status, body);
            return Err(ChainError::Content {
                status: status.as_u16(),
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}
