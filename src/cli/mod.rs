use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3001")]
    pub server_addr: String,

    // --- Product Search Args ---
    /// Endpoint for the product search API. The user query and page number
    /// are appended as query-string parameters.
    #[arg(long, env = "SEARCH_API_ENDPOINT", default_value = "https://api.zalando.com/articles")]
    pub search_endpoint: String,

    // --- Contentful Args ---
    /// Base URL for the Contentful GraphQL API. The space id is appended as a path segment.
    #[arg(
        long,
        env = "CONTENTFUL_ENDPOINT",
        default_value = "https://graphql.contentful.com/content/v1/spaces"
    )]
    pub contentful_endpoint: String,

    /// Contentful space identifier. The placeholder default will not resolve
    /// against the real API; set it for production use.
    #[arg(long, env = "CONTENTFUL_SPACE_ID", default_value = "your-space-id")]
    pub contentful_space_id: String,

    /// Contentful delivery token. Placeholder default as above.
    #[arg(long, env = "CONTENTFUL_TOKEN", default_value = "your-contentful-token")]
    pub contentful_token: String,

    // --- Completion Args ---
    /// Endpoint for the chat completion API when the request config omits one.
    #[arg(
        long,
        env = "COMPLETION_ENDPOINT",
        default_value = "https://api.openai.com/v1/chat/completions"
    )]
    pub completion_endpoint: String,

    /// Completion model when the request config omits one.
    #[arg(long, env = "COMPLETION_MODEL", default_value = "gpt-3.5-turbo")]
    pub completion_model: String,

    // --- Fallback Args ---
    /// Artificial delay in milliseconds before a canned fallback reply is
    /// returned, simulating network latency for the widget's typing indicator.
    #[arg(long, env = "MOCK_DELAY_MS", default_value = "1000")]
    pub mock_delay_ms: u64,
}
