//! Jellyfin MCP Server
//!
//! Run with: jellyfin-mcp-server

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jellyfin_mcp::config::{self, JellyfinConfig};
use jellyfin_mcp::error::Result;
use jellyfin_mcp::mcp::{JellyfinHandler, McpServer};
use jellyfin_mcp::{HttpBackend, JellyfinTools};

#[derive(Parser, Debug)]
#[command(name = "jellyfin-mcp-server")]
#[command(about = "MCP server exposing a Jellyfin media library as tools")]
#[command(version)]
struct Args {
    /// Jellyfin base URL (e.g. http://your-jellyfin-host:8096)
    #[arg(long, env = config::ENV_URL, default_value = "")]
    url: String,

    /// Jellyfin API key
    #[arg(long, env = config::ENV_API_KEY, default_value = "", hide_env_values = true)]
    api_key: String,

    /// User whose library view is queried
    #[arg(long, env = config::ENV_USER_ID, default_value = "")]
    user_id: String,

    /// Per-request HTTP timeout in seconds
    #[arg(
        long,
        env = config::ENV_TIMEOUT_SECS,
        default_value_t = config::DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=config::MAX_TIMEOUT_SECS)
    )]
    timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> JellyfinConfig {
        JellyfinConfig::new(self.url, self.api_key, self.user_id)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is for MCP protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config();

    // Incomplete configuration is reported on every tool call instead
    if let Err(e) = config.validate() {
        tracing::warn!("{}; tool calls will fail until it is set", e);
    }

    let backend = HttpBackend::new(&config)?;
    let tools = JellyfinTools::new(config, backend);
    let server = McpServer::new(JellyfinHandler::new(tools));

    tracing::info!("Jellyfin MCP server starting...");
    server.run()?;

    Ok(())
}
