use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Failure raised by one stage of the upstream call chain. Each variant
/// records enough to map the outcome to an HTTP response: the upstream
/// status where one exists, and for the completion stage the provider's
/// raw error body, which is the only body forwarded to the caller.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("{0}")]
    Validation(String),

    #[error("Product search failed with status {status}")]
    Search { status: u16 },

    #[error("Content query failed with status {status}")]
    Content { status: u16 },

    #[error("Completion request failed with status {status}")]
    Completion { status: u16, body: Value },

    #[error("Server error processing your request: {0}")]
    Internal(String),
}

impl ChainError {
    /// Stage name surfaced in the error payload.
    pub fn stage(&self) -> &'static str {
        match self {
            ChainError::Validation(_) => "validation",
            ChainError::Search { .. } => "product-search",
            ChainError::Content { .. } => "content-query",
            ChainError::Completion { .. } => "llm",
            ChainError::Internal(_) => "internal",
        }
    }

    /// HTTP status for the terminal response. Upstream statuses are
    /// propagated as-is; anything unrepresentable falls back to 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChainError::Validation(_) => StatusCode::BAD_REQUEST,
            ChainError::Search { status }
            | ChainError::Content { status }
            | ChainError::Completion { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ChainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        ChainError::Internal(err.to_string())
    }
}

/// Wire shape of a terminal error, created once at the failure point.
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub message: String,
    #[serde(rename = "sourceStage")]
    pub source_stage: &'static str,
}

impl From<&ChainError> for ErrorPayload {
    fn from(err: &ChainError) -> Self {
        Self {
            message: err.to_string(),
            source_stage: err.stage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stages_match_variants() {
        assert_eq!(ChainError::Validation("x".into()).stage(), "validation");
        assert_eq!(ChainError::Search { status: 503 }.stage(), "product-search");
        assert_eq!(ChainError::Content { status: 502 }.stage(), "content-query");
        let llm = ChainError::Completion { status: 429, body: json!({}) };
        assert_eq!(llm.stage(), "llm");
        assert_eq!(ChainError::Internal("x".into()).stage(), "internal");
    }

    #[test]
    fn upstream_status_is_propagated() {
        assert_eq!(
            ChainError::Search { status: 503 }.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ChainError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unrepresentable_status_falls_back_to_500() {
        assert_eq!(
            ChainError::Search { status: 42 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn payload_does_not_carry_upstream_body() {
        let err = ChainError::Search { status: 503 };
        let payload = ErrorPayload::from(&err);
        assert_eq!(payload.message, "Product search failed with status 503");
        assert_eq!(payload.source_stage, "product-search");
    }
}
