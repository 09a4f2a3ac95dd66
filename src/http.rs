//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a timeout and the server's user
//! agent. reqwest picks up HTTP(S)_PROXY / NO_PROXY from the environment.

use crate::error::AppError;
use reqwest::Client;
use std::time::Duration;

pub const USER_AGENT: &str = concat!("facebook-pages-mcp/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest Client with the given timeout
pub fn client_with_timeout(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(client_with_timeout(Duration::from_secs(5)).is_ok());
        assert!(USER_AGENT.starts_with("facebook-pages-mcp/"));
    }
}
