use anyhow::{anyhow, Result};
use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::OnceLock;

use super::types::{
    content::{Content, Text, ToolUse},
    message::{Message, Role},
    tool::Tool,
};
use crate::errors::ProviderError;

/// Convert internal Message format to Anthropic's Messages API specification
pub fn messages_to_anthropic_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            let content: Vec<Value> = message
                .content
                .iter()
                .map(|content| {
                    let kind = content.content_type();
                    match content {
                        Content::Text(Text { text }) => json!({
                            "type": kind,
                            "text": text,
                        }),
                        Content::ToolUse(tool_use) => json!({
                            "type": kind,
                            "id": tool_use.id,
                            "name": tool_use.name,
                            "input": tool_use.input,
                        }),
                        Content::ToolResult(tool_result) => json!({
                            "type": kind,
                            "tool_use_id": tool_result.tool_use_id,
                            "content": tool_result.content,
                            "is_error": tool_result.is_error,
                        }),
                    }
                })
                .collect();

            json!({
                "role": message.role,
                "content": content,
            })
        })
        .collect()
}

/// Convert internal Tool format to Anthropic's tool specification
pub fn tools_to_anthropic_spec(tools: &[Tool]) -> Result<Vec<Value>> {
    let mut tool_names = HashSet::new();
    let mut result = Vec::new();

    for tool in tools {
        if !tool_names.insert(&tool.name) {
            return Err(anyhow!("Duplicate tool name: {}", tool.name));
        }

        result.push(json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": tool.input_schema,
        }));
    }

    Ok(result)
}

/// Convert Anthropic's API response to internal Message format
pub fn anthropic_response_to_message(response: &Value) -> Result<Message> {
    let blocks = response
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::InvalidResponse("missing content array".to_string()))?;

    let mut content = Vec::new();
    for block in blocks {
        match block.get("type").and_then(Value::as_str) {
            Some("text") => {
                let text = block["text"].as_str().unwrap_or_default();
                content.push(Content::text(text));
            }
            Some("tool_use") => {
                let id = block["id"].as_str().unwrap_or_default().to_string();
                let name = block["name"].as_str().unwrap_or_default().to_string();
                let input = block.get("input").cloned().unwrap_or_else(|| json!({}));

                let mut tool_use = ToolUse::new(id, name, input);
                if !is_valid_tool_name(&tool_use.name) {
                    tool_use.is_error = true;
                    tool_use.error_message = Some(format!(
                        "The provided tool name '{}' had invalid characters, it must match this regex [a-zA-Z0-9_-]{{1,64}}",
                        tool_use.name
                    ));
                }
                content.push(Content::ToolUse(tool_use));
            }
            other => {
                tracing::debug!(block_type = ?other, "skipping unsupported content block");
            }
        }
    }

    Message::new(Role::Assistant, content)
}

/// Extract the error envelope Anthropic returns on failed requests
pub fn check_anthropic_error(body: &Value) -> Option<ProviderError> {
    if body.get("type").and_then(Value::as_str) != Some("error") {
        return None;
    }
    let error = body.get("error")?;
    let kind = error
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("error")
        .to_string();
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string();
    Some(ProviderError::Api { kind, message })
}

fn tool_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]{1,64}$").expect("tool name pattern is valid"))
}

fn is_valid_tool_name(name: &str) -> bool {
    tool_name_pattern().is_match(name)
}
