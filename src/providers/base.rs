use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::types::{message::Message, tool::Tool};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for model providers
pub trait Provider: Send + Sync {
    /// Generate the next assistant message for the conversation so far.
    ///
    /// Blocks until the API answers. `system` is omitted from the request when
    /// empty; `tools` is omitted when empty.
    fn complete(
        &self,
        model: &str,
        system: &str,
        messages: &[Message],
        tools: &[Tool],
        max_tokens: i32,
    ) -> Result<(Message, Usage)>;
}
