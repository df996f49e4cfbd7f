use anyhow::Result;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

use crate::errors::{AgentError, AgentResult};
use crate::schema::generate_schema;

type ToolFunction = Box<dyn Fn(&Value) -> AgentResult<Value> + Send + Sync>;

/// A tool that can be used by a model.
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// A json schema of the function input
    pub input_schema: Value,
    /// The function that powers the tool
    pub function: ToolFunction,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        function: impl Fn(&Value) -> AgentResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Tool {
            name: name.into(),
            description: description.into(),
            input_schema,
            function: Box::new(function),
        }
    }

    /// Build a tool from a typed handler.
    ///
    /// The input schema is derived from `I`. Raw input that does not decode
    /// into `I` yields [`AgentError::InvalidParameters`]; the handler's output
    /// is serialized back into JSON.
    pub fn typed<I, O, F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Result<Self>
    where
        I: DeserializeOwned + JsonSchema + 'static,
        O: Serialize + 'static,
        F: Fn(I) -> AgentResult<O> + Send + Sync + 'static,
    {
        let input_schema = generate_schema::<I>()?;
        Ok(Self::new(name, description, input_schema, move |input| {
            let input = I::deserialize(input)
                .map_err(|e| AgentError::InvalidParameters(e.to_string()))?;
            let output = handler(input)?;
            serde_json::to_value(output).map_err(|e| AgentError::Internal(e.to_string()))
        }))
    }

    pub fn call(&self, input: &Value) -> AgentResult<Value> {
        (self.function)(input)
    }
}

impl Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .field("function", &"<function>")
            .finish()
    }
}
