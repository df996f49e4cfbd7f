use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::content::{Content, ToolResult, ToolUse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<Content>,
}

impl Message {
    pub fn new(role: Role, content: Vec<Content>) -> Result<Self> {
        let msg = Self { role, content };
        msg.validate()?;
        Ok(msg)
    }

    fn validate(&self) -> Result<()> {
        match self.role {
            Role::User => {
                if !self.has_text() && !self.has_tool_result() {
                    return Err(anyhow!("User message must include a Text or ToolResult"));
                }
                if self.has_tool_use() {
                    return Err(anyhow!("User message does not support ToolUse"));
                }
            }
            // The API may legitimately answer with no content at all, so an
            // empty assistant message is accepted.
            Role::Assistant => {
                if self.has_tool_result() {
                    return Err(anyhow!("Assistant message does not support ToolResult"));
                }
            }
        }
        Ok(())
    }

    pub fn user(text: &str) -> Result<Self> {
        Self::new(Role::User, vec![Content::text(text)])
    }

    pub fn assistant(text: &str) -> Result<Self> {
        Self::new(Role::Assistant, vec![Content::text(text)])
    }

    /// A user message answering the tool uses of the previous assistant turn.
    pub fn tool_results(results: Vec<ToolResult>) -> Result<Self> {
        Self::new(
            Role::User,
            results.into_iter().map(Content::ToolResult).collect(),
        )
    }

    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|content| match content {
                Content::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tool_use(&self) -> Vec<&ToolUse> {
        self.content
            .iter()
            .filter_map(|content| match content {
                Content::ToolUse(tool_use) => Some(tool_use),
                _ => None,
            })
            .collect()
    }

    pub fn tool_result(&self) -> Vec<&ToolResult> {
        self.content
            .iter()
            .filter_map(|content| match content {
                Content::ToolResult(tool_result) => Some(tool_result),
                _ => None,
            })
            .collect()
    }

    fn has_text(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::Text(_)))
    }

    fn has_tool_use(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::ToolUse(_)))
    }

    fn has_tool_result(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::ToolResult(_)))
    }
}

/// Check that every tool use in an assistant message is answered by exactly
/// one tool result in the user message right after it.
///
/// A trailing assistant message is not checked: its answers have not been
/// produced yet.
pub fn check_tool_results_paired(messages: &[Message]) -> Result<()> {
    for (index, message) in messages.iter().enumerate() {
        if message.role != Role::Assistant {
            continue;
        }
        let tool_uses = message.tool_use();
        if tool_uses.is_empty() {
            continue;
        }
        let Some(reply) = messages.get(index + 1) else {
            continue;
        };
        let results = reply.tool_result();
        for tool_use in &tool_uses {
            let answers = results
                .iter()
                .filter(|r| r.tool_use_id == tool_use.id)
                .count();
            if answers != 1 {
                return Err(anyhow!(
                    "Tool use {} ({}) has {} results in the following message, expected exactly 1",
                    tool_use.id,
                    tool_use.name,
                    answers
                ));
            }
        }
        if let Some(orphan) = results
            .iter()
            .find(|r| !tool_uses.iter().any(|t| t.id == r.tool_use_id))
        {
            return Err(anyhow!(
                "Tool result {} does not answer any tool use",
                orphan.tool_use_id
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool_use(id: &str) -> Content {
        Content::ToolUse(ToolUse::new(id, "tool", json!({})))
    }

    fn tool_result(id: &str) -> Content {
        Content::ToolResult(ToolResult::success(id, "result"))
    }

    #[test]
    fn test_user_message() -> Result<()> {
        let user_message = Message::user("abcd")?;
        assert_eq!(user_message.role, Role::User);
        assert_eq!(user_message.text(), "abcd");
        Ok(())
    }

    #[test]
    fn test_message_tool_use() -> Result<()> {
        let message = Message::new(Role::Assistant, vec![tool_use("1"), tool_use("2")])?;

        let tool_uses = message.tool_use();
        assert_eq!(tool_uses.len(), 2);
        assert_eq!(tool_uses[1].id, "2");
        Ok(())
    }

    #[test]
    fn test_tool_results_message() -> Result<()> {
        let message = Message::tool_results(vec![
            ToolResult::success("1", "a"),
            ToolResult::success("2", "b"),
        ])?;

        assert_eq!(message.role, Role::User);
        assert_eq!(message.tool_result().len(), 2);
        assert_eq!(message.tool_result()[0].content, "a");
        Ok(())
    }

    #[test]
    fn test_message_validation() -> Result<()> {
        assert!(Message::new(Role::User, vec![Content::text(""), tool_use("1")]).is_err());
        assert!(Message::new(Role::Assistant, vec![Content::text(""), tool_result("1")]).is_err());
        assert!(Message::tool_results(vec![]).is_err());

        let empty = Message::new(Role::Assistant, vec![])?;
        assert!(empty.tool_use().is_empty());
        Ok(())
    }

    #[test]
    fn test_pairing_accepts_answered_tool_uses() -> Result<()> {
        let messages = vec![
            Message::user("Where is Paris?")?,
            Message::new(Role::Assistant, vec![Content::text("Let me check"), tool_use("a"), tool_use("b")])?,
            Message::new(Role::User, vec![tool_result("b"), tool_result("a")])?,
            Message::assistant("Done")?,
        ];
        check_tool_results_paired(&messages)
    }

    #[test]
    fn test_pairing_ignores_trailing_assistant() -> Result<()> {
        let messages = vec![
            Message::user("Where is Paris?")?,
            Message::new(Role::Assistant, vec![tool_use("a")])?,
        ];
        check_tool_results_paired(&messages)
    }

    #[test]
    fn test_pairing_rejects_missing_duplicate_and_orphan_results() -> Result<()> {
        let question = Message::user("Where is Paris?")?;
        let asked = Message::new(Role::Assistant, vec![tool_use("a")])?;

        let missing = vec![question.clone(), asked.clone(), Message::user("no answer")?];
        let err = check_tool_results_paired(&missing).unwrap_err();
        assert!(err.to_string().contains("has 0 results"));

        let duplicate = vec![
            question.clone(),
            asked.clone(),
            Message::new(Role::User, vec![tool_result("a"), tool_result("a")])?,
        ];
        let err = check_tool_results_paired(&duplicate).unwrap_err();
        assert!(err.to_string().contains("has 2 results"));

        let orphan = vec![
            question,
            asked,
            Message::new(Role::User, vec![tool_result("a"), tool_result("z")])?,
        ];
        let err = check_tool_results_paired(&orphan).unwrap_err();
        assert!(err.to_string().contains("Tool result z"));
        Ok(())
    }

    #[test]
    fn test_serialization() -> Result<()> {
        let message = Message::new(
            Role::Assistant,
            vec![
                Content::text("Using tool"),
                Content::ToolUse(ToolUse::new("toolu_1", "get_coordinates", json!({"location": "Paris"}))),
            ],
        )?;

        let serialized = serde_json::to_value(&message)?;
        assert_eq!(serialized["role"], "assistant");
        assert_eq!(serialized["content"][1]["type"], "tool_use");

        let deserialized: Message = serde_json::from_value(serialized)?;
        assert_eq!(deserialized.content, message.content);
        Ok(())
    }
}
