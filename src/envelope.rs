//! Uniform success/error result for every tool invocation

use crate::error::AppError;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEnvelope {
    pub is_error: bool,
    pub text: String,
}

impl ResultEnvelope {
    /// Pretty-printed JSON of the Graph response, unchanged
    pub fn success(result: &Value) -> Self {
        match serde_json::to_string_pretty(result) {
            Ok(text) => Self {
                is_error: false,
                text,
            },
            Err(e) => Self::failure(&AppError::from(e)),
        }
    }

    pub fn failure(err: &AppError) -> Self {
        Self {
            is_error: true,
            text: format!("Error: {}", err),
        }
    }

    pub fn from_result(result: Result<Value, AppError>) -> Self {
        match result {
            Ok(value) => Self::success(&value),
            Err(err) => {
                warn!("Tool call failed [{}]: {}", err.error_code(), err);
                Self::failure(&err)
            }
        }
    }
}
