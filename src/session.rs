//! Credential binding
//!
//! Decides which access token an invocation runs with and keeps one client
//! bound to the most recently resolved credential.

use crate::error::AppError;
use crate::facebook::{Credential, FacebookClient, GraphTransport, ACCESS_TOKEN_KEY};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub struct CredentialBinder {
    static_token: Option<String>,
    page_id: Option<String>,
    transport: Arc<dyn GraphTransport>,
    bound: Mutex<Option<FacebookClient>>,
}

impl CredentialBinder {
    /// Empty strings count as not configured
    pub fn new(
        static_token: Option<String>,
        page_id: Option<String>,
        transport: Arc<dyn GraphTransport>,
    ) -> Self {
        Self {
            static_token: static_token.filter(|t| !t.is_empty()),
            page_id: page_id.filter(|p| !p.is_empty()),
            transport,
            bound: Mutex::new(None),
        }
    }

    pub fn has_static_credential(&self) -> bool {
        self.static_token.is_some()
    }

    /// Static token when configured, otherwise the per-call override
    pub fn resolve(&self, args: &Value) -> Result<Credential, AppError> {
        let token = match &self.static_token {
            Some(token) => token.clone(),
            None => args
                .get(ACCESS_TOKEN_KEY)
                .and_then(|v| v.as_str())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .ok_or_else(|| AppError::MissingCredential(ACCESS_TOKEN_KEY.to_string()))?,
        };
        Ok(Credential::new(token, self.page_id.clone()))
    }

    /// Resolve the credential and hand back a client bound to it.
    ///
    /// The returned client is the caller's own copy: a later rebinding by
    /// another invocation does not affect it.
    pub fn bind(&self, args: &Value) -> Result<FacebookClient, AppError> {
        let credential = self.resolve(args)?;

        let mut bound = self
            .bound
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire client lock: {}", e)))?;

        if let Some(client) = bound.as_ref() {
            if client.credential() == &credential {
                return Ok(client.clone());
            }
        }

        debug!("Binding Facebook client to a new access token");
        let client = FacebookClient::new(credential, self.transport.clone())?;
        *bound = Some(client.clone());
        Ok(client)
    }

    /// Credential of the currently bound client, if any
    #[cfg(test)]
    pub fn bound_credential(&self) -> Option<Credential> {
        self.bound
            .lock()
            .ok()
            .and_then(|b| b.as_ref().map(|c| c.credential().clone()))
    }
}
