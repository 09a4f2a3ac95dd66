//! Error types for the Facebook Pages MCP server

use serde::Serialize;
use thiserror::Error;

/// Coarse category of a failed Graph API call, derived from the HTTP status
/// and the Graph error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteCategory {
    Auth,
    Permission,
    NotFound,
    RateLimited,
    InvalidRequest,
    Server,
    Network,
}

impl RemoteCategory {
    /// Classify a Graph API failure.
    ///
    /// Graph error codes take precedence over the HTTP status: Facebook reports
    /// throttling and expired tokens as plain 400s.
    pub fn classify(status: u16, graph_code: Option<i64>) -> Self {
        match graph_code {
            Some(190) | Some(102) => return RemoteCategory::Auth,
            Some(4) | Some(17) | Some(32) | Some(613) => return RemoteCategory::RateLimited,
            Some(10) | Some(200..=299) => return RemoteCategory::Permission,
            Some(803) => return RemoteCategory::NotFound,
            _ => {}
        }
        match status {
            401 => RemoteCategory::Auth,
            403 => RemoteCategory::Permission,
            404 => RemoteCategory::NotFound,
            429 => RemoteCategory::RateLimited,
            500..=599 => RemoteCategory::Server,
            _ => RemoteCategory::InvalidRequest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteCategory::Auth => "auth",
            RemoteCategory::Permission => "permission",
            RemoteCategory::NotFound => "not_found",
            RemoteCategory::RateLimited => "rate_limited",
            RemoteCategory::InvalidRequest => "invalid_request",
            RemoteCategory::Server => "server",
            RemoteCategory::Network => "network",
        }
    }
}

impl std::fmt::Display for RemoteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} is required")]
    MissingCredential(String),
    #[error("Invalid access token: {0}")]
    InvalidCredential(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {message}")]
    Validation { tool: String, message: String },
    #[error("Facebook API error ({category}): {message}")]
    Remote {
        status: Option<u16>,
        category: RemoteCategory,
        message: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for MCP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingCredential(_) => "missing_credential",
            AppError::InvalidCredential(_) => "invalid_credential",
            AppError::UnknownTool(_) => "unknown_tool",
            AppError::Validation { .. } => "invalid_params",
            AppError::Remote { .. } => "remote_error",
            AppError::Config(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn validation(tool: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    /// Attach a tool name to a validation error raised below the tool layer
    pub fn for_tool(self, name: &str) -> Self {
        match self {
            AppError::Validation { tool, message } if tool.is_empty() => AppError::Validation {
                tool: name.to_string(),
                message,
            },
            other => other,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let category = match status {
            Some(code) => RemoteCategory::classify(code, None),
            None => RemoteCategory::Network,
        };
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        AppError::Remote {
            status,
            category,
            message,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}
