use clap::Parser;

use crate::config::DEFAULT_API_BASE;

/// IndexNow MCP Server - notify search engines of changed URLs
///
/// Exposes a single `submit_urls` tool over MCP stdio transport. URLs are
/// submitted to the configured IndexNow endpoint with the secret key supplied
/// per call or configured process-wide.
#[derive(Parser, Debug)]
#[command(name = "indexnow-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// IndexNow API endpoint to submit URLs to
    ///
    /// Example: --api-base https://www.bing.com/indexnow
    #[arg(
        long,
        value_name = "URL",
        env = "INDEXNOW_API_BASE",
        default_value = DEFAULT_API_BASE
    )]
    pub api_base: String,

    /// Default IndexNow secret key
    ///
    /// Used when a tool call does not supply its own key. Not required at
    /// startup; calls without any key fail with a structured error instead.
    #[arg(long, value_name = "KEY", env = "INDEXNOW_SECRET_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// List available tool names and exit
    #[arg(long)]
    pub list_tools: bool,
}
