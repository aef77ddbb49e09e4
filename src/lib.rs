pub mod agent;
pub mod chain;
pub mod cli;
pub mod error;
pub mod fallback;
pub mod models;
pub mod server;
pub mod upstream;

use agent::ChatAgent;
use cli::Args;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Search Endpoint: {}", args.search_endpoint);
    info!("Contentful Endpoint: {}", args.contentful_endpoint);
    info!("Contentful Space ID: {}", args.contentful_space_id);
    info!("Completion Endpoint: {}", args.completion_endpoint);
    info!("Completion Model: {}", args.completion_model);
    info!("Fallback Delay (ms): {}", args.mock_delay_ms);
    info!("-------------------------");

    let agent = Arc::new(ChatAgent::from_args(&args)?);
    let server = Server::new(args.server_addr.clone(), agent);
    server.run().await
}
