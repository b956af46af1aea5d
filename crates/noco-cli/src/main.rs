use anyhow::Context;
use clap::Parser;
use noco_client::{ConnectionConfig, NocoClient};
use noco_mcp::McpServer;
use tracing_subscriber::EnvFilter;

/// MCP server exposing NocoDB table operations as agent tools.
///
/// Connection parameters are read from the environment, falling back to
/// positional arguments. All three are required; the process refuses to
/// start serving without them.
#[derive(Parser, Debug)]
#[command(name = "noco-mcp", version, about = "NocoDB MCP server")]
struct Cli {
    /// NocoDB base URL, e.g. https://app.nocodb.com
    #[arg(env = "NOCODB_URL")]
    url: Option<String>,

    /// Identifier of the base (workspace) holding the tables
    #[arg(env = "NOCODB_BASE_ID")]
    base_id: Option<String>,

    /// API token sent with every request
    #[arg(env = "NOCODB_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP transport; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let url = cli
        .url
        .context("missing NocoDB URL (set NOCODB_URL or pass it as the first argument)")?;
    let base_id = cli
        .base_id
        .context("missing base ID (set NOCODB_BASE_ID or pass it as the second argument)")?;
    let api_token = cli
        .api_token
        .context("missing API token (set NOCODB_API_TOKEN or pass it as the third argument)")?;

    let config = ConnectionConfig::new(url, base_id, api_token);
    let client = NocoClient::new(config)?;

    let server = McpServer::new(client);
    server.run().await?;
    Ok(())
}
