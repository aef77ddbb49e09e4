mod query;

pub use query::DEFAULT_CONTENT_QUERY;

use crate::cli::Args;
use crate::error::ChainError;
use crate::models::chat::{ChatMessage, ChatRequest, UpstreamResult};
use crate::upstream::{
    CompletionClient, ContentClient, ContentfulClient, HttpCompletionClient, ProductSearchClient,
    SearchClient,
};
use log::info;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Sequential three-stage pipeline: product search, content query, then
/// (given a usable API key) LLM completion. Each stage feeds the next; the
/// first failure short-circuits the run.
pub struct ChatChain {
    search: Arc<dyn SearchClient>,
    content: Arc<dyn ContentClient>,
    completion: Arc<dyn CompletionClient>,
}

impl ChatChain {
    pub fn new(
        search: Arc<dyn SearchClient>,
        content: Arc<dyn ContentClient>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            search,
            content,
            completion,
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, ChainError> {
        Ok(Self::new(
            Arc::new(ProductSearchClient::new(args.search_endpoint.clone())?),
            Arc::new(ContentfulClient::new(
                &args.contentful_endpoint,
                &args.contentful_space_id,
                &args.contentful_token,
            )?),
            Arc::new(HttpCompletionClient::new(
                args.completion_endpoint.clone(),
                args.completion_model.clone(),
            )?),
        ))
    }

    pub async fn run(&self, request: &ChatRequest) -> Result<UpstreamResult, ChainError> {
        let user_text = request
            .last_user_content()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ChainError::Validation("A non-empty user message is required".to_string())
            })?;

        let search_results = self.search.search(user_text).await?;

        let slug = slugify(user_text);
        let query_text = request
            .contentful_query
            .as_deref()
            .unwrap_or(DEFAULT_CONTENT_QUERY);
        let content_data = self
            .content
            .query(&minify_query(query_text), &slug, &search_results)
            .await?;

        let reply = match request.config.as_ref().filter(|c| c.has_api_key()) {
            Some(config) => {
                let enriched =
                    enrich_messages(&request.messages, user_text, &search_results, &content_data);
                self.completion.complete(config, &enriched).await?
            }
            None => {
                info!("No usable API key, skipping completion stage");
                format!(
                    "Here's what I found for \"{}\". Configure an API key to get a conversational summary of these results.",
                    user_text
                )
            }
        };

        let mut auxiliary = BTreeMap::new();
        auxiliary.insert("searchResults".to_string(), search_results);
        auxiliary.insert("contentfulData".to_string(), content_data);

        Ok(UpstreamResult { reply, auxiliary })
    }
}

/// Normalize free text into a URL-safe slug: lowercase, word and space
/// characters only, whitespace runs become single hyphens, capped at 50
/// characters.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    let slug = stripped.split_whitespace().collect::<Vec<_>>().join("-");
    slug.chars().take(50).collect()
}

/// Collapse whitespace runs to single spaces and trim. Wire-format
/// minification only; the query is semantically unchanged.
pub fn minify_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Substitute the last user-authored turn with the original text plus the
/// serialized upstream results; every other turn passes through unchanged.
fn enrich_messages(
    messages: &[ChatMessage],
    user_text: &str,
    search_results: &Value,
    content_data: &Value,
) -> Vec<ChatMessage> {
    let enriched = format!(
        "{}\n\nProduct search results: {}\n\nContent data: {}",
        user_text, search_results, content_data
    );

    let mut forwarded = messages.to_vec();
    if let Some(last_user) = forwarded.iter_mut().rev().find(|m| m.role == "user") {
        last_user.content = enriched;
    }
    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slugify_normalizes_punctuation_and_case() {
        assert_eq!(slugify("Which Red Dress?!"), "which-red-dress");
        assert_eq!(slugify("  lots   of\tspace  "), "lots-of-space");
        assert_eq!(slugify("already-clean"), "alreadyclean");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slugify_caps_at_fifty_characters() {
        let long = "word ".repeat(30);
        assert_eq!(slugify(&long).chars().count(), 50);
    }

    #[test]
    fn minify_collapses_whitespace() {
        assert_eq!(
            minify_query("  query {\n    field\n  }\n"),
            "query { field }"
        );
        assert_eq!(minify_query("already minified"), "already minified");
    }

    #[test]
    fn enrich_replaces_only_the_last_user_turn() {
        let messages = vec![
            ChatMessage {
                role: "user".to_string(),
                content: "first question".to_string(),
            },
            ChatMessage {
                role: "assistant".to_string(),
                content: "first answer".to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: "red dress".to_string(),
            },
        ];

        let enriched = enrich_messages(
            &messages,
            "red dress",
            &json!({ "items": [1] }),
            &json!({ "data": {} }),
        );

        assert_eq!(enriched[0], messages[0]);
        assert_eq!(enriched[1], messages[1]);
        assert!(enriched[2].content.starts_with("red dress"));
        assert!(enriched[2].content.contains(r#"{"items":[1]}"#));
        assert!(enriched[2].content.contains(r#"{"data":{}}"#));
    }
}
