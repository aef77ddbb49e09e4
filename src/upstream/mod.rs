mod completion;
mod content;
mod search;

pub use completion::HttpCompletionClient;
pub use content::ContentfulClient;
pub use search::ProductSearchClient;

use crate::error::ChainError;
use crate::models::chat::{ChatMessage, ModelConfig};
use async_trait::async_trait;
use serde_json::Value;

/// Full-text product search keyed by the user's message.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Returns the raw JSON body of a successful search.
    async fn search(&self, query: &str) -> Result<Value, ChainError>;
}

/// GraphQL content lookup against the headless CMS.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// `query` is the minified GraphQL document; `search_results` is passed
    /// through as a query variable alongside the slug.
    async fn query(
        &self,
        query: &str,
        slug: &str,
        search_results: &Value,
    ) -> Result<Value, ChainError>;
}

/// Chat completion against the configured LLM endpoint.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the first completion choice's message text.
    async fn complete(
        &self,
        config: &ModelConfig,
        messages: &[ChatMessage],
    ) -> Result<String, ChainError>;
}
