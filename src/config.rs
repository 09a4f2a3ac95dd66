//! Server configuration
//!
//! Layers, lowest precedence first: built-in defaults, the JSON config file,
//! then environment variables and command-line flags (merged by clap).

use crate::cli::ConnectionArgs;
use crate::error::AppError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_API_VERSION: &str = "v21.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub access_token: Option<String>,
    pub page_id: Option<String>,
    pub graph_url: Option<String>,
    pub api_version: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolved configuration
#[derive(Clone)]
pub struct Config {
    pub access_token: Option<String>,
    pub page_id: Option<String>,
    pub graph_url: Url,
    pub api_version: String,
    pub timeout: Duration,
}

/// Get the path to the default configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("facebook-pages-mcp").join("config.json"))
}

/// Load a config file; a missing file yields the defaults
pub fn load_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: FileConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load the config file named by `args` (or the default location) and
    /// apply the flag/env overrides on top. Only the default location may be
    /// absent.
    pub fn load(args: &ConnectionArgs) -> Result<Self> {
        let path = match &args.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file {} does not exist", path.display());
                }
                path.clone()
            }
            None => match config_path() {
                Ok(path) => path,
                Err(_) => return Ok(Self::merge(FileConfig::default(), args)?),
            },
        };
        let file = load_file(&path)?;
        Ok(Self::merge(file, args)?)
    }

    pub fn merge(file: FileConfig, args: &ConnectionArgs) -> Result<Self, AppError> {
        let graph_url_raw = non_empty(args.graph_url.clone())
            .or(non_empty(file.graph_url))
            .unwrap_or_else(|| DEFAULT_GRAPH_URL.to_string());
        let graph_url = Url::parse(&graph_url_raw).map_err(|e| {
            AppError::Config(format!("invalid graph URL '{}': {}", graph_url_raw, e))
        })?;
        if graph_url.scheme() != "https" && graph_url.scheme() != "http" {
            return Err(AppError::Config(format!(
                "graph URL must be http(s), got '{}'",
                graph_url_raw
            )));
        }

        let api_version = non_empty(args.api_version.clone())
            .or(non_empty(file.api_version))
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        let api_version = api_version.trim_matches('/').to_string();

        let timeout_secs = args
            .timeout
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            access_token: non_empty(args.access_token.clone()).or(non_empty(file.access_token)),
            page_id: non_empty(args.page_id.clone()).or(non_empty(file.page_id)),
            graph_url,
            api_version,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Versioned API root, always ending in `/` so relative paths join under it
    pub fn graph_base(&self) -> Url {
        let mut base = self.graph_url.clone();
        let path = format!("{}/{}/", base.path().trim_end_matches('/'), self.api_version);
        base.set_path(&path);
        base
    }
}
