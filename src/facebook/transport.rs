//! Graph API transport
//!
//! The transport owns the HTTP details: base URL, API version, where the
//! access token goes and how Graph error bodies are decoded.

use crate::error::{AppError, RemoteCategory};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A single Graph API call.
///
/// `path` is relative to the versioned base URL (`me/accounts`, `{page_id}/feed`).
/// For GET and DELETE the params travel in the query string, for POST in a
/// form-encoded body.
#[derive(Clone, PartialEq)]
pub struct GraphRequest {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub access_token: String,
}

impl GraphRequest {
    #[cfg(test)]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for GraphRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Sends Graph requests and returns the parsed JSON body
pub trait GraphTransport: Send + Sync {
    fn send(&self, request: GraphRequest) -> BoxFuture<'_, Result<Value, AppError>>;
}

/// reqwest-backed transport talking to graph.facebook.com
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// `base_url` must be the versioned root, e.g. `https://graph.facebook.com/v21.0/`
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn execute(&self, request: GraphRequest) -> Result<Value, AppError> {
        let url = graph_url(&self.base_url, &request.path)?;

        debug!("{} {}", request.method.as_str(), url.path());

        let token = [("access_token", request.access_token.as_str())];
        let builder = match request.method {
            Method::Get => self.client.get(url).query(&token).query(&request.params),
            Method::Delete => self.client.delete(url).query(&token).query(&request.params),
            Method::Post => self.client.post(url).query(&token).form(&request.params),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = remote_error(status.as_u16(), &body);
            warn!(
                "Graph request {} {} failed: {}",
                request.method.as_str(),
                request.path,
                err
            );
            return Err(err);
        }

        parse_body(&body)
    }
}

/// Object ids and edge names are plain `[A-Za-z0-9_]` words
pub fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Append `path` to the versioned base one encoded segment at a time.
///
/// The result always stays on the base's origin and under its path prefix,
/// so the access token only ever goes to the configured Graph host.
fn graph_url(base: &Url, path: &str) -> Result<Url, AppError> {
    let segments: Vec<&str> = path.split('/').collect();
    if let Some(bad) = segments.iter().find(|s| !is_path_segment(s)) {
        return Err(AppError::validation(
            "",
            format!("'{}' is not a valid Graph object id", bad),
        ));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::Config(format!("Graph base URL cannot take a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);

    if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
        return Err(AppError::Internal(format!(
            "Graph path '{}' escapes {}",
            path, base
        )));
    }
    Ok(url)
}

impl GraphTransport for HttpTransport {
    fn send(&self, request: GraphRequest) -> BoxFuture<'_, Result<Value, AppError>> {
        self.execute(request).boxed()
    }
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GraphErrorDetail {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<i64>,
    error_subcode: Option<i64>,
}

/// Decode a non-2xx Graph response into a `Remote` error
pub fn remote_error(status: u16, body: &str) -> AppError {
    match serde_json::from_str::<GraphErrorBody>(body) {
        Ok(parsed) => {
            let detail = parsed.error;
            let mut message = detail.message;
            let mut extras = Vec::new();
            if let Some(kind) = &detail.kind {
                extras.push(kind.clone());
            }
            if let Some(code) = detail.code {
                extras.push(format!("code {}", code));
            }
            if let Some(sub) = detail.error_subcode {
                extras.push(format!("subcode {}", sub));
            }
            extras.push(format!("HTTP {}", status));
            message.push_str(&format!(" ({})", extras.join(", ")));

            AppError::Remote {
                status: Some(status),
                category: RemoteCategory::classify(status, detail.code),
                message,
            }
        }
        Err(_) => {
            let text = body.trim();
            let message = if text.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, text)
            };
            AppError::Remote {
                status: Some(status),
                category: RemoteCategory::classify(status, None),
                message,
            }
        }
    }
}

fn parse_body(body: &str) -> Result<Value, AppError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|e| AppError::Internal(format!("Graph API returned invalid JSON: {}", e)))
}
