use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures while dispatching a tool use to a local handler.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum AgentError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

/// Failures reported by, or while talking to, the model API.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Server error: {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("{kind}: {message}")]
    Api { kind: String, message: String },

    #[error("Request failed: {status}: {body}")]
    Request { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
