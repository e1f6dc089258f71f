//! Tool trait and the definitions a tool advertises.

use crate::types::ParamType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Definition of a tool exposed to the inference model (function calling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A declared tool parameter.
///
/// `param_type` is `None` when the parameter was declared without a type;
/// the manifest treats that as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(default, rename = "type")]
    pub param_type: Option<ParamType>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type: Some(param_type),
            description: None,
        }
    }

    /// A parameter declared without a type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: None,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Resolved type, defaulting to string.
    pub fn resolved_type(&self) -> ParamType {
        self.param_type.unwrap_or_default()
    }
}

/// Errors raised while registering or invoking tools.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing '{argument}' argument for tool {tool}")]
    MissingArgument { tool: String, argument: String },

    #[error("Argument '{argument}' for tool {tool} must be a {expected}")]
    InvalidArgument {
        tool: String,
        argument: String,
        expected: ParamType,
    },

    #[error("Tool already registered: {0}")]
    Duplicate(String),
}

/// A tool that the agent runtime can invoke by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (used in function calls).
    fn name(&self) -> &str;

    /// Description attached when the tool was tagged for exposure.
    fn description(&self) -> Option<&str>;

    /// Longer documentation, used when no tag description is set.
    fn doc(&self) -> Option<&str> {
        None
    }

    /// Declared parameters, in declaration order.
    fn parameters(&self) -> &[ToolParameter];

    /// Whether the tool is tagged for exposure to the runtime.
    /// Untagged members are plain helpers and never advertised.
    fn exposed(&self) -> bool {
        true
    }

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: serde_json::Value) -> Result<String, ToolError>;
}
