use crate::chain::ChatChain;
use crate::cli::Args;
use crate::error::ChainError;
use crate::fallback::FallbackResponder;
use crate::models::chat::{ChatRequest, UpstreamResult};
use log::warn;

/// Root orchestrator. Owns the upstream call chain and the offline responder
/// and decides which one serves a request. This is the `sendMessage` seam the
/// widget consumes.
pub struct ChatAgent {
    chain: ChatChain,
    fallback: FallbackResponder,
}

impl ChatAgent {
    pub fn new(chain: ChatChain, fallback: FallbackResponder) -> Self {
        Self { chain, fallback }
    }

    pub fn from_args(args: &Args) -> Result<Self, ChainError> {
        Ok(Self {
            chain: ChatChain::from_args(args)?,
            fallback: FallbackResponder::new(args.mock_delay_ms),
        })
    }

    /// A request without any model config is served by the canned responder;
    /// everything else goes through the chain, which itself skips the
    /// completion stage when the key is blank. Missing a credential is never
    /// an error. Validation happens before dispatch so that a malformed
    /// conversation fails without touching the network on either path.
    pub async fn send_message(&self, request: &ChatRequest) -> Result<UpstreamResult, ChainError> {
        let user_text = request
            .last_user_content()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ChainError::Validation("A non-empty user message is required".to_string())
            })?;

        if request.config.is_none() {
            warn!("No model config provided, falling back to canned replies");
            return Ok(self.fallback.respond(user_text).await);
        }

        self.chain.run(request).await
    }
}
