use anyhow::Result;
use clap::Parser;

use indexnow_mcp::cli::Cli;
use indexnow_mcp::client::ApiClient;
use indexnow_mcp::config::Config;
use indexnow_mcp::server::{IndexNowServer, available_tools};
use indexnow_mcp::service::IndexNowService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle list-tools flag
    if cli.list_tools {
        println!("Available tools:");
        for tool in available_tools() {
            println!("  - {tool}");
        }
        return Ok(());
    }

    let config = Config::from_cli(&cli);
    if config.default_key.is_none() {
        log::warn!(
            "No default secret key configured (INDEXNOW_SECRET_KEY); tool calls must supply one"
        );
    }
    log::info!("Submitting to IndexNow endpoint {}", config.api_base);

    let client = ApiClient::new(&config.user_agent)?;
    let service = IndexNowService::new(&config, client);

    IndexNowServer::new(service).serve_stdio().await
}
