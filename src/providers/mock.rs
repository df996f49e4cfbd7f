use anyhow::{anyhow, Result};
use std::sync::Mutex;

use super::base::{Provider, Usage};
use super::types::{message::Message, tool::Tool};

/// What the mock provider was asked to complete
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    pub messages: Vec<Message>,
}

/// A mock provider that returns pre-configured responses and records every
/// request it receives
pub struct MockProvider {
    responses: Mutex<Vec<Message>>,
    requests: Mutex<Vec<RecordedRequest>>,
    usage: Usage,
}

impl MockProvider {
    pub fn new(responses: Vec<Message>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            usage: Usage::default(),
        }
    }

    /// Report `usage` with every response
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    /// The requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.to_vec())
            .unwrap_or_default()
    }
}

impl Provider for MockProvider {
    fn complete(
        &self,
        _model: &str,
        system: &str,
        messages: &[Message],
        _tools: &[Tool],
        _max_tokens: i32,
    ) -> Result<(Message, Usage)> {
        self.requests
            .lock()
            .map_err(|_| anyhow!("mock provider poisoned"))?
            .push(RecordedRequest {
                system: system.to_string(),
                messages: messages.to_vec(),
            });

        let mut responses = self
            .responses
            .lock()
            .map_err(|_| anyhow!("mock provider poisoned"))?;
        if responses.is_empty() {
            Err(anyhow!("mock provider has no responses left"))
        } else {
            Ok((responses.remove(0), self.usage.clone()))
        }
    }
}
