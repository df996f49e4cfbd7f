//! Local tools the model may call, and dispatch of tool uses to them.
use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::errors::AgentError;
use crate::providers::types::content::{ToolResult, ToolUse};
use crate::providers::types::tool::Tool;

pub mod coordinates;

/// A registry of tools keyed by name.
#[derive(Debug, Default)]
pub struct Toolbox {
    tools: Vec<Tool>,
}

impl Toolbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tools shipped with this crate.
    pub fn with_defaults() -> Result<Self> {
        let mut toolbox = Self::new();
        toolbox.add(coordinates::tool()?)?;
        Ok(toolbox)
    }

    pub fn add(&mut self, tool: Tool) -> Result<()> {
        if self.get(&tool.name).is_some() {
            return Err(anyhow!("Duplicate tool name: {}", tool.name));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Run the handler for a tool use and wrap its outcome as a tool result.
    ///
    /// Unknown tools, tool uses flagged as erroneous when the response was
    /// parsed, and failing handlers are answered with an error result so the
    /// model can see what went wrong. Input that does not match the tool's
    /// shape aborts the conversation.
    pub fn dispatch(&self, tool_use: &ToolUse) -> Result<ToolResult> {
        if tool_use.is_error {
            let message = tool_use
                .error_message
                .clone()
                .unwrap_or_else(|| format!("Invalid tool use: {}", tool_use.name));
            return Ok(ToolResult::error(&tool_use.id, message));
        }

        let outcome = match self.get(&tool_use.name) {
            Some(tool) => tool.call(&tool_use.input),
            None => Err(AgentError::ToolNotFound(tool_use.name.clone())),
        };

        match outcome {
            Ok(output) => Ok(ToolResult::success(&tool_use.id, render(&output)?)),
            Err(err @ AgentError::InvalidParameters(_)) => Err(anyhow::Error::new(err)
                .context(format!("Could not decode input for tool {}", tool_use.name))),
            Err(err) => {
                tracing::warn!(tool = %tool_use.name, error = %err, "tool use failed");
                Ok(ToolResult::error(&tool_use.id, err.to_string()))
            }
        }
    }
}

fn render(output: &Value) -> Result<String> {
    Ok(serde_json::to_string(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failing_tool() -> Tool {
        Tool::new("flaky", "Always fails", json!({"type": "object"}), |_| {
            Err(AgentError::ExecutionError("upstream unavailable".to_string()))
        })
    }

    #[test]
    fn test_dispatch_known_tool() -> Result<()> {
        let toolbox = Toolbox::with_defaults()?;
        let tool_use = ToolUse::new("toolu_1", "get_coordinates", json!({"location": "Paris"}));

        let result = toolbox.dispatch(&tool_use)?;
        assert_eq!(result.tool_use_id, "toolu_1");
        assert!(!result.is_error);
        assert_eq!(result.content, r#"{"lat":37.7749,"long":-122.4194}"#);
        Ok(())
    }

    #[test]
    fn test_dispatch_unknown_tool_is_error_result() -> Result<()> {
        let toolbox = Toolbox::with_defaults()?;
        let tool_use = ToolUse::new("toolu_2", "get_weather", json!({}));

        let result = toolbox.dispatch(&tool_use)?;
        assert!(result.is_error);
        assert_eq!(result.tool_use_id, "toolu_2");
        assert_eq!(result.content, "Tool not found: get_weather");
        Ok(())
    }

    #[test]
    fn test_dispatch_flagged_tool_use_is_error_result() -> Result<()> {
        let toolbox = Toolbox::with_defaults()?;
        let mut tool_use = ToolUse::new("toolu_3", "get coordinates", json!({}));
        tool_use.is_error = true;
        tool_use.error_message = Some("bad name".to_string());

        let result = toolbox.dispatch(&tool_use)?;
        assert!(result.is_error);
        assert_eq!(result.content, "bad name");
        Ok(())
    }

    #[test]
    fn test_dispatch_handler_failure_is_error_result() -> Result<()> {
        let mut toolbox = Toolbox::new();
        toolbox.add(failing_tool())?;

        let result = toolbox.dispatch(&ToolUse::new("toolu_4", "flaky", json!({})))?;
        assert!(result.is_error);
        assert_eq!(result.content, "Tool execution failed: upstream unavailable");
        Ok(())
    }

    #[test]
    fn test_dispatch_bad_input_is_fatal() -> Result<()> {
        let toolbox = Toolbox::with_defaults()?;
        let tool_use = ToolUse::new("toolu_5", "get_coordinates", json!({"place": "Paris"}));

        let err = toolbox.dispatch(&tool_use).unwrap_err();
        assert!(err.to_string().contains("Could not decode input for tool get_coordinates"));
        Ok(())
    }

    #[test]
    fn test_duplicate_tool_names_rejected() -> Result<()> {
        let mut toolbox = Toolbox::with_defaults()?;
        let err = toolbox.add(coordinates::tool()?).unwrap_err();
        assert!(err.to_string().contains("Duplicate tool name"));
        assert_eq!(toolbox.tools().len(), 1);
        Ok(())
    }
}
