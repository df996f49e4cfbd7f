//! The tool-use conversation loop.
//!
//! Each round sends the whole history to the provider, prints the reply,
//! answers every tool use in it and goes again. The loop ends with the first
//! reply that requests no tools.
use anyhow::{Context, Result};
use std::io::Write;

use crate::providers::base::Provider;
use crate::providers::types::content::ContentType;
use crate::providers::types::message::{check_tool_results_paired, Message};
use crate::tools::Toolbox;

pub struct Conversation<'a> {
    provider: &'a dyn Provider,
    toolbox: &'a Toolbox,
    model: String,
    system: String,
    max_tokens: i32,
    messages: Vec<Message>,
}

impl<'a> Conversation<'a> {
    pub fn new(
        provider: &'a dyn Provider,
        toolbox: &'a Toolbox,
        model: impl Into<String>,
        max_tokens: i32,
    ) -> Self {
        Self {
            provider,
            toolbox,
            model: model.into(),
            system: String::new(),
            max_tokens,
            messages: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    /// The history accumulated so far.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Run the conversation for `prompt` until the model stops requesting
    /// tools, writing the transcript to `out`.
    pub fn run(&mut self, prompt: &str, out: &mut impl Write) -> Result<()> {
        writeln!(out, "[user]: {}", prompt)?;
        self.messages.push(Message::user(prompt)?);

        for round in 1.. {
            check_tool_results_paired(&self.messages)?;

            let (reply, usage) = self
                .provider
                .complete(
                    &self.model,
                    &self.system,
                    &self.messages,
                    self.toolbox.tools(),
                    self.max_tokens,
                )
                .with_context(|| format!("Completion request {} failed", round))?;
            tracing::info!(
                round,
                input_tokens = ?usage.input_tokens,
                output_tokens = ?usage.output_tokens,
                total_tokens = ?usage.total_tokens,
                "assistant replied"
            );

            write!(out, "[assistant]: ")?;
            if reply.content.is_empty() {
                writeln!(out)?;
            }
            for content in &reply.content {
                writeln!(out, "{}", content.transcript())?;
            }

            let mut results = Vec::new();
            for tool_use in reply.tool_use() {
                write!(out, "[user ({})]: ", tool_use.name)?;
                let result = self.toolbox.dispatch(tool_use)?;
                writeln!(out, "{}", result.transcript())?;
                results.push(result);
            }

            self.messages.push(reply);
            if results.is_empty() {
                break;
            }
            self.messages.push(Message::tool_results(results)?);
        }

        Ok(())
    }
}
