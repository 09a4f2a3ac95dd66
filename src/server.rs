//! Tool server: catalog, credential binding and envelopes in one place
//!
//! `call_tool` runs an invocation through
//! lookup → credential resolution → client binding → dispatch → envelope.
//! Every failure along the way ends up as an error envelope.

use crate::config::Config;
use crate::envelope::ResultEnvelope;
use crate::error::AppError;
use crate::facebook::{GraphTransport, HttpTransport};
use crate::session::CredentialBinder;
use crate::tools::{Catalog, Category, ToolDescriptor};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

pub const SERVER_NAME: &str = "facebook-pages-mcp";
pub const SERVER_INFO_URI: &str = "facebook://server-info";

pub struct FacebookServer {
    catalog: Catalog,
    binder: CredentialBinder,
}

impl FacebookServer {
    /// Server talking to the Graph API described by `config`
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = crate::http::client_with_timeout(config.timeout)?;
        let transport = HttpTransport::new(client, config.graph_base());
        info!("Graph API base: {}", transport.base_url());
        Ok(Self::new(
            config.access_token.clone(),
            config.page_id.clone(),
            Arc::new(transport),
        ))
    }

    pub fn new(
        access_token: Option<String>,
        page_id: Option<String>,
        transport: Arc<dyn GraphTransport>,
    ) -> Self {
        Self {
            catalog: Catalog::new(),
            binder: CredentialBinder::new(access_token, page_id, transport),
        }
    }

    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.catalog.descriptors().collect()
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> ResultEnvelope {
        info!("Tool call: {}", name);
        ResultEnvelope::from_result(self.invoke(name, arguments).await)
    }

    async fn invoke(&self, name: &str, arguments: Value) -> Result<Value, AppError> {
        let tool = self.catalog.get(name)?;
        let client = self.binder.bind(&arguments)?;
        debug!("Dispatching {}", name);
        tool.invoke(client, arguments).await
    }

    pub fn binder(&self) -> &CredentialBinder {
        &self.binder
    }

    /// JSON body of the `facebook://server-info` resource
    pub fn server_info(&self) -> Value {
        let categories: Map<String, Value> = Category::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), json!(self.catalog.count_in(*c))))
            .collect();

        json!({
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "connected": self.binder.has_static_credential(),
            "tools_available": self.catalog.len(),
            "tool_categories": categories,
        })
    }
}
