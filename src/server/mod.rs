pub mod api;

use crate::agent::ChatAgent;
use log::info;
use std::error::Error;
use std::sync::Arc;

pub struct Server {
    addr: String,
    agent: Arc<ChatAgent>,
}

impl Server {
    pub fn new(addr: String, agent: Arc<ChatAgent>) -> Self {
        Self { addr, agent }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let state = api::AppState {
            agent: self.agent.clone(),
        };
        let app = api::create_router(state);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("HTTP server listening on http://{}", self.addr);
        axum::serve(listener, app.into_make_service()).await?;

        Ok(())
    }
}
