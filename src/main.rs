//! facebook-pages-mcp: MCP server & CLI for Facebook Page management (Rust)
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: list the tool catalog or run a single tool directly
//!
//! Exposes 28 tools covering pages, posts, comments, photos, videos,
//! insights and Messenger conversations.

mod cli;
mod config;
mod envelope;
mod error;
mod facebook;
mod http;
mod mcp;
mod prompts;
mod server;
mod session;
mod tools;

#[cfg(test)]
mod tests_server;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use server::FacebookServer;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = Config::load(&cli.connection)?;
    let server = Arc::new(FacebookServer::from_config(&config)?);

    match cli.command {
        None | Some(Commands::Serve) => run_mcp_mode(server).await,
        Some(Commands::Tools) => {
            println!("{}", serde_json::to_string_pretty(&server.list_tools())?);
            Ok(())
        }
        Some(Commands::Info) => {
            println!("{}", serde_json::to_string_pretty(&server.server_info())?);
            Ok(())
        }
        Some(Commands::Call(args)) => execute_call_cli(&server, args).await,
    }
}

/// Logs always go to stderr; stdout carries MCP traffic and CLI output.
/// RUST_LOG applies unless --verbose or --quiet is given.
fn init_logging(cli: &Cli) {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute a single tool in CLI mode
async fn execute_call_cli(server: &FacebookServer, args: cli::CallArgs) -> Result<()> {
    let arguments: serde_json::Value = serde_json::from_str(&args.args)
        .with_context(|| format!("Invalid --args JSON for {}", args.tool))?;

    let envelope = server.call_tool(&args.tool, arguments).await;
    if envelope.is_error {
        eprintln!("{}", envelope.text);
        std::process::exit(1);
    }

    println!("{}", envelope.text);
    Ok(())
}

/// Run in MCP server mode
async fn run_mcp_mode(server: Arc<FacebookServer>) -> Result<()> {
    info!("Starting facebook-pages-mcp server");
    if !server.binder().has_static_credential() {
        info!(
            "No static access token configured; tools expect {} in their arguments",
            facebook::ACCESS_TOKEN_KEY
        );
    }

    mcp::handle_stdio(server).await
}
