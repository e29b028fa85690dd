//! Process-wide configuration, read once at startup and immutable afterwards.

use crate::cli::Cli;

/// IndexNow endpoint used when neither `--api-base` nor `INDEXNOW_API_BASE`
/// is set.
pub const DEFAULT_API_BASE: &str = "https://api.indexnow.org/indexnow";

/// User-Agent sent on every outbound request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Resolved runtime configuration.
///
/// Built once from CLI flags and environment variables; business logic never
/// reads the environment directly.
#[derive(Debug, Clone)]
pub struct Config {
    /// IndexNow API endpoint submissions are sent to.
    pub api_base: String,
    /// Secret key used when a tool call does not supply one.
    pub default_key: Option<String>,
    /// User-Agent header value for outbound requests.
    pub user_agent: String,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_base: cli.api_base.clone(),
            default_key: cli.key.clone(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}
