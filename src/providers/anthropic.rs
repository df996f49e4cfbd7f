use anyhow::Result;
use reqwest::blocking::Client; // blocking API, every request is a synchronous round trip
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use super::{
    base::{Provider, Usage},
    configs::anthropic::AnthropicProviderConfig,
    types::{message::Message, tool::Tool},
    utils::{
        anthropic_response_to_message, check_anthropic_error, messages_to_anthropic_spec,
        tools_to_anthropic_spec,
    },
};
use crate::errors::ProviderError;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    config: AnthropicProviderConfig,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    fn get_usage(data: &Value) -> Usage {
        let usage = &data["usage"];
        let input_tokens = usage["input_tokens"].as_i64().map(|v| v as i32);
        let output_tokens = usage["output_tokens"].as_i64().map(|v| v as i32);
        let total_tokens = match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        };

        Usage::new(input_tokens, output_tokens, total_tokens)
    }

    fn post(&self, payload: Value) -> Result<Value> {
        let url = format!("{}/v1/messages", self.config.host.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(response.json()?);
        }

        let body = response.text()?;
        let envelope = serde_json::from_str::<Value>(&body).ok();
        let detail = envelope.as_ref().and_then(check_anthropic_error);

        let err = match detail {
            Some(ProviderError::Api { message, .. })
                if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() =>
            {
                ProviderError::ServerError {
                    status: status.as_u16(),
                    message,
                }
            }
            Some(api_error) => api_error,
            None if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() => {
                ProviderError::ServerError {
                    status: status.as_u16(),
                    message: body,
                }
            }
            None => ProviderError::Request {
                status: status.as_u16(),
                body,
            },
        };
        Err(err.into())
    }
}

impl Provider for AnthropicProvider {
    fn complete(
        &self,
        model: &str,
        system: &str,
        messages: &[Message],
        tools: &[Tool],
        max_tokens: i32,
    ) -> Result<(Message, Usage)> {
        let mut payload = json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": messages_to_anthropic_spec(messages),
        });

        if let Some(fields) = payload.as_object_mut() {
            if !system.is_empty() {
                fields.insert("system".to_string(), json!(system));
            }
            if !tools.is_empty() {
                fields.insert("tools".to_string(), json!(tools_to_anthropic_spec(tools)?));
            }
        }

        tracing::debug!(model, messages = messages.len(), tools = tools.len(), "sending request");
        let response = self.post(payload)?;

        let message = anthropic_response_to_message(&response)?;
        let usage = Self::get_usage(&response);
        tracing::debug!(
            stop_reason = response["stop_reason"].as_str().unwrap_or("unknown"),
            "received response"
        );

        Ok((message, usage))
    }
}
