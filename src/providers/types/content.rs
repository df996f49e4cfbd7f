use serde::{Deserialize, Serialize};
use serde_json::Value;

// Shared behaviour of every content block
pub trait ContentType {
    /// The block's `type` tag on the wire
    fn content_type(&self) -> &'static str;
    /// How the block appears in the console transcript
    fn transcript(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
}

impl ContentType for Text {
    fn content_type(&self) -> &'static str {
        "text"
    }

    fn transcript(&self) -> String {
        self.text.clone()
    }
}

/// A tool invocation requested by the assistant.
///
/// `is_error` is set when the request could not be interpreted on our side,
/// for example because the tool name is not a valid identifier. Such a request
/// is still answered, with an error result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,
    pub name: String,
    pub input: Value,
    #[serde(default)]
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ToolUse {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
            is_error: false,
            error_message: None,
        }
    }
}

impl ContentType for ToolUse {
    fn content_type(&self) -> &'static str {
        "tool_use"
    }

    fn transcript(&self) -> String {
        format!("{}: {}", self.name, self.input)
    }
}

/// The answer to a [`ToolUse`], sent back in the next user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: true,
        }
    }
}

impl ContentType for ToolResult {
    fn content_type(&self) -> &'static str {
        "tool_result"
    }

    fn transcript(&self) -> String {
        self.content.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text(Text),
    ToolUse(ToolUse),
    ToolResult(ToolResult),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(Text { text: text.into() })
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Content::Text(t) => t.content_type(),
            Content::ToolUse(t) => t.content_type(),
            Content::ToolResult(t) => t.content_type(),
        }
    }

    pub fn transcript(&self) -> String {
        match self {
            Content::Text(t) => t.transcript(),
            Content::ToolUse(t) => t.transcript(),
            Content::ToolResult(t) => t.transcript(),
        }
    }
}
