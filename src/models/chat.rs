use serde::{ Serialize, Deserialize };
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Per-request model configuration supplied by the widget. All fields are
/// optional; a blank or missing `api_key` means the completion stage is
/// skipped entirely.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

impl ModelConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Inbound body of `POST /api/chat`. Field names match the widget's wire
/// format (`config`, `contentfulQuery`).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub config: Option<ModelConfig>,
    #[serde(default)]
    pub contentful_query: Option<String>,
}

impl ChatRequest {
    /// Content of the most recent user-authored turn, if any.
    pub fn last_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

/// Composed response payload. Auxiliary entries (`searchResults`,
/// `contentfulData`) are flattened to top-level keys when serialized.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpstreamResult {
    pub reply: String,
    #[serde(flatten)]
    pub auxiliary: BTreeMap<String, Value>,
}

impl UpstreamResult {
    pub fn reply_only(reply: String) -> Self {
        Self {
            reply,
            auxiliary: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_wire_format() {
        let body = r#"{
            "messages": [
                { "role": "user", "content": "hello" },
                { "role": "assistant", "content": "hi there" }
            ],
            "config": { "apiKey": "sk-test", "model": "gpt-4o", "apiEndpoint": "https://example.com" },
            "contentfulQuery": "query { field }"
        }"#;

        let request: ChatRequest = serde_json::from_str(body).unwrap();
        let config = request.config.unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.api_endpoint.as_deref(), Some("https://example.com"));
        assert_eq!(request.contentful_query.as_deref(), Some("query { field }"));
    }

    #[test]
    fn last_user_content_skips_assistant_turns() {
        let request: ChatRequest = serde_json::from_str(
            r#"{ "messages": [
                { "role": "user", "content": "first" },
                { "role": "assistant", "content": "reply" }
            ] }"#,
        )
        .unwrap();
        assert_eq!(request.last_user_content(), Some("first"));
    }

    #[test]
    fn blank_api_key_counts_as_absent() {
        let config = ModelConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!config.has_api_key());
        assert!(!ModelConfig::default().has_api_key());
    }

    #[test]
    fn auxiliary_entries_flatten_to_top_level() {
        let mut result = UpstreamResult::reply_only("ok".to_string());
        result
            .auxiliary
            .insert("searchResults".to_string(), serde_json::json!({ "items": [] }));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["reply"], "ok");
        assert_eq!(value["searchResults"]["items"], serde_json::json!([]));
    }
}
