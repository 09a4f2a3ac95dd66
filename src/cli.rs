//! Command-line interface
//!
//! With no subcommand the binary serves MCP over stdio, which is how hosts
//! launch it. The other subcommands run one operation and exit.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Facebook Pages MCP server
#[derive(Parser, Debug)]
#[command(name = "facebook-pages-mcp")]
#[command(about = "Model Context Protocol server for Facebook Page management", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// Print the tool catalog as JSON
    Tools,
    /// Invoke a single tool and print its result
    Call(CallArgs),
    /// Print the server-info resource
    Info,
}

/// Arguments for a one-off tool call
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name (e.g. fb_list_pages)
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(short = 'a', long, default_value = "{}")]
    pub args: String,
}

/// Connection settings; flags override environment variables, which override the config file
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Page access token
    #[arg(long, env = "FACEBOOK_PAGE_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub access_token: Option<String>,

    /// Default page ID for page-scoped tools
    #[arg(long, env = "FACEBOOK_PAGE_ID", global = true)]
    pub page_id: Option<String>,

    /// Graph API base URL
    #[arg(long, env = "FACEBOOK_GRAPH_URL", global = true)]
    pub graph_url: Option<String>,

    /// Graph API version (e.g. v21.0)
    #[arg(long, env = "FACEBOOK_API_VERSION", global = true)]
    pub api_version: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to config.json (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}
