//! Recording transport for tests

use super::transport::{GraphRequest, GraphTransport};
use crate::error::AppError;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

/// Records every request and replies with queued results, falling back to a
/// default body once the queue is empty
pub struct MockTransport {
    requests: Mutex<Vec<GraphRequest>>,
    replies: Mutex<VecDeque<Result<Value, AppError>>>,
    default_reply: Value,
    gate: Option<Arc<Barrier>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::with_default(json!({ "id": "mock" }))
    }

    pub fn with_default(default_reply: Value) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            default_reply,
            gate: None,
        }
    }

    /// Hold every reply until `parties` requests are in flight at once
    pub fn gated(mut self, parties: usize) -> Self {
        self.gate = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn push_error(&self, err: AppError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<GraphRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<GraphRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl GraphTransport for MockTransport {
    fn send(&self, request: GraphRequest) -> BoxFuture<'_, Result<Value, AppError>> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.default_reply.clone()));
        let gate = self.gate.clone();
        async move {
            if let Some(gate) = gate {
                gate.wait().await;
            }
            reply
        }
        .boxed()
    }
}
